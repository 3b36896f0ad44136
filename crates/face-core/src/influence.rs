use crate::constants::AUDIO_SMOOTHING_PER_FRAME;
use crate::easing::smoothing_factor;
use crate::spectrum::FrequencyFrame;

/// Low-passed copy of the banded audio levels that feeds the shader.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioInfluence {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub volume: f32,
}

impl AudioInfluence {
    pub fn update(&mut self, frame: &FrequencyFrame<'_>, dt_sec: f32) {
        let k = smoothing_factor(AUDIO_SMOOTHING_PER_FRAME, dt_sec);
        approach(&mut self.bass, frame.bass, k);
        approach(&mut self.mid, frame.mid, k);
        approach(&mut self.treble, frame.treble, k);
        approach(&mut self.volume, frame.volume, k);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// a corrupt sample is skipped rather than poisoning every later frame
#[inline]
fn approach(value: &mut f32, input: f32, k: f32) {
    if input.is_finite() {
        *value += (input - *value) * k;
    }
}
