use crate::constants::{MAX_FRAME_DT_SEC, REFERENCE_FRAME_RATE};

/// Linear blend that lands exactly on `b` at `t >= 1` and stays exactly `a`
/// when both ends agree.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

#[inline]
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Cubic in-out: slow start, fastest at the midpoint, slow settle.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Blend factor for exponential approach, frame-rate independent.
///
/// `rate_per_frame` is the fraction of the remaining distance covered in one
/// frame at [`REFERENCE_FRAME_RATE`]. For other frame lengths this is
/// `1 - exp(-dt / tau)` with `tau = -(1 / 60) / ln(1 - rate_per_frame)`, so a
/// 60 Hz display reproduces the per-frame constant exactly.
#[inline]
pub fn smoothing_factor(rate_per_frame: f32, dt_sec: f32) -> f32 {
    let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
    1.0 - (1.0 - rate_per_frame).powf(dt * REFERENCE_FRAME_RATE)
}

/// Time constant equivalent to a per-frame rate at the reference cadence.
#[inline]
pub fn time_constant_sec(rate_per_frame: f32) -> f32 {
    -(1.0 / REFERENCE_FRAME_RATE) / (1.0 - rate_per_frame).ln()
}
