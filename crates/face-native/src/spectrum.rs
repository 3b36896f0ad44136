// Byte spectrum from raw microphone samples, computed the way a WebAudio
// AnalyserNode does it so the shared analyzer sees the same scale on every
// platform: Blackman window, FFT magnitude / N, temporal smoothing, then
// decibels mapped linearly onto 0..=255 between the min and max dB.

use std::sync::{Arc, Mutex};

use face_core::constants::{ANALYSER_SMOOTHING, FFT_SIZE};
use face_core::SpectrumSource;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

/// Fixed-size ring of the most recent mono samples.
pub struct SampleRing {
    buf: Vec<f32>,
    write: usize,
}

impl SampleRing {
    pub fn new(len: usize) -> Self {
        Self {
            buf: vec![0.0; len.max(1)],
            write: 0,
        }
    }

    pub fn push(&mut self, samples: &[f32]) {
        for &s in samples {
            self.buf[self.write] = s;
            self.write = (self.write + 1) % self.buf.len();
        }
    }

    /// Oldest sample first.
    pub fn copy_ordered(&self, out: &mut [f32]) {
        let n = self.buf.len();
        for (i, o) in out.iter_mut().take(n).enumerate() {
            *o = self.buf[(self.write + i) % n];
        }
    }
}

pub type SharedRing = Arc<Mutex<SampleRing>>;

pub fn shared_ring() -> SharedRing {
    Arc::new(Mutex::new(SampleRing::new(FFT_SIZE)))
}

pub fn blackman_window(n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![1.0; n];
    }
    let a = 0.16_f32;
    let (a0, a1, a2) = ((1.0 - a) / 2.0, 0.5, a / 2.0);
    let denom = (n - 1) as f32;
    (0..n)
        .map(|i| {
            let x = std::f32::consts::TAU * i as f32 / denom;
            a0 - a1 * x.cos() + a2 * (2.0 * x).cos()
        })
        .collect()
}

/// Decibels to the analyser's byte scale, clamped.
pub fn db_to_byte(db: f32) -> u8 {
    if !db.is_finite() {
        return 0;
    }
    let scaled = (db - MIN_DECIBELS) * 255.0 / (MAX_DECIBELS - MIN_DECIBELS);
    scaled.floor().clamp(0.0, 255.0) as u8
}

pub fn smooth(previous: f32, magnitude: f32, tau: f32) -> f32 {
    let v = tau * previous + (1.0 - tau) * magnitude;
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

pub fn magnitude_to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    db_to_byte(20.0 * magnitude.log10())
}

pub struct FftSpectrum {
    ring: SharedRing,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    samples: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    tau: f32,
}

impl FftSpectrum {
    pub fn new(ring: SharedRing) -> Self {
        let size = FFT_SIZE;
        let fft = FftPlanner::new().plan_fft_forward(size);
        Self {
            ring,
            fft,
            window: blackman_window(size),
            samples: vec![0.0; size],
            scratch: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; size / 2],
            tau: ANALYSER_SMOOTHING as f32,
        }
    }

    fn analyze(&mut self) {
        if let Ok(ring) = self.ring.lock() {
            ring.copy_ordered(&mut self.samples);
        }
        for ((c, &s), &w) in self.scratch.iter_mut().zip(&self.samples).zip(&self.window) {
            *c = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);
        let norm = 1.0 / self.samples.len() as f32;
        for (prev, c) in self.smoothed.iter_mut().zip(&self.scratch) {
            *prev = smooth(*prev, c.norm() * norm, self.tau);
        }
    }
}

impl SpectrumSource for FftSpectrum {
    fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyze();
        for (o, &m) in out.iter_mut().zip(&self.smoothed) {
            *o = magnitude_to_byte(m);
        }
    }
}
