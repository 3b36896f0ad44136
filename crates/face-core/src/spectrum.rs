//! Banded loudness from a byte magnitude spectrum.
//!
//! The analyzer reads whatever spectrum source the platform provides (a WebAudio
//! `AnalyserNode` on the web, an FFT over cpal samples natively) into one reused
//! buffer and reduces it to bass/mid/treble/volume in `[0, 1]`.

use crate::constants::{BASS_BINS, FREQUENCY_BIN_COUNT, MID_BINS, TREBLE_BINS};

/// Anything that can fill a buffer with `getByteFrequencyData`-style magnitudes.
pub trait SpectrumSource {
    fn bin_count(&self) -> usize;
    /// Writes up to `out.len()` magnitudes, 0..=255 per bin.
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// One frame of banded intensities. `raw` borrows the analyzer's buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrequencyFrame<'a> {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub volume: f32,
    pub raw: &'a [u8],
}

impl FrequencyFrame<'static> {
    pub const SILENT: Self = FrequencyFrame {
        bass: 0.0,
        mid: 0.0,
        treble: 0.0,
        volume: 0.0,
        raw: &[],
    };
}

impl<'a> FrequencyFrame<'a> {
    pub fn from_bins(bins: &'a [u8]) -> Self {
        FrequencyFrame {
            bass: band_average(bins, BASS_BINS),
            mid: band_average(bins, MID_BINS),
            treble: band_average(bins, TREBLE_BINS),
            volume: overall_average(bins),
            raw: bins,
        }
    }
}

pub struct FrequencyAnalyzer {
    bins: Vec<u8>,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new(FREQUENCY_BIN_COUNT)
    }
}

impl FrequencyAnalyzer {
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count],
        }
    }

    /// Samples the source; without one (device not ready) the frame is silent.
    pub fn sample(&mut self, source: Option<&mut dyn SpectrumSource>) -> FrequencyFrame<'_> {
        let Some(source) = source else {
            return FrequencyFrame::SILENT;
        };
        let n = source.bin_count();
        if n != self.bins.len() {
            // only when the device is swapped for one with another transform size
            self.bins.resize(n, 0);
        }
        source.byte_frequency_data(&mut self.bins);
        FrequencyFrame::from_bins(&self.bins)
    }
}

/// Mean of `bins[start..end]` over the nominal range width, normalized to [0, 1].
///
/// A spectrum shorter than `end` still divides by the full width, so missing bins
/// count as silence.
pub fn band_average(bins: &[u8], (start, end): (usize, usize)) -> f32 {
    if end <= start {
        return 0.0;
    }
    let hi = end.min(bins.len());
    let sum: u32 = bins
        .get(start..hi)
        .map(|s| s.iter().map(|&b| b as u32).sum())
        .unwrap_or(0);
    sum as f32 / (end - start) as f32 / 255.0
}

pub fn overall_average(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}
