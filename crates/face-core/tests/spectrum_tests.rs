use face_core::spectrum::{band_average, overall_average, FrequencyAnalyzer, FrequencyFrame, SpectrumSource};

struct Fixed {
    bins: Vec<u8>,
    reads: usize,
}

impl SpectrumSource for Fixed {
    fn bin_count(&self) -> usize {
        self.bins.len()
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.reads += 1;
        let n = out.len().min(self.bins.len());
        out[..n].copy_from_slice(&self.bins[..n]);
    }
}

#[test]
fn no_source_is_silent() {
    let mut a = FrequencyAnalyzer::default();
    assert_eq!(a.sample(None), FrequencyFrame::SILENT);
}

#[test]
fn all_zero_spectrum_is_a_zero_frame() {
    let mut src = Fixed { bins: vec![0; 1024], reads: 0 };
    let mut a = FrequencyAnalyzer::default();
    let f = a.sample(Some(&mut src));
    assert_eq!((f.bass, f.mid, f.treble, f.volume), (0.0, 0.0, 0.0, 0.0));
    assert_eq!(f.raw.len(), 1024);
    assert!(f.raw.iter().all(|&b| b == 0));
}

#[test]
fn full_scale_spectrum_is_one_everywhere() {
    let mut src = Fixed { bins: vec![255; 1024], reads: 0 };
    let mut a = FrequencyAnalyzer::default();
    let f = a.sample(Some(&mut src));
    for v in [f.bass, f.mid, f.treble, f.volume] {
        assert!((v - 1.0).abs() < 1e-6, "band {v}");
    }
    assert_eq!(f.raw.len(), 1024);
    assert_eq!(src.reads, 1);
}

#[test]
fn bands_use_bin_ranges() {
    let mut bins = vec![0u8; 1024];
    bins[..10].fill(255);
    let f = FrequencyFrame::from_bins(&bins);
    assert!((f.bass - 1.0).abs() < 1e-6);
    assert_eq!(f.mid, 0.0);
    assert_eq!(f.treble, 0.0);
    assert!((f.volume - 10.0 / 1024.0).abs() < 1e-6);
}

#[test]
fn short_spectrum_counts_missing_bins_as_silence() {
    let bins = vec![255u8; 50];
    assert!((band_average(&bins, (0, 10)) - 1.0).abs() < 1e-6);
    assert!((band_average(&bins, (10, 100)) - 40.0 / 90.0).abs() < 1e-6);
    assert_eq!(band_average(&bins, (100, 512)), 0.0);
    assert_eq!(band_average(&bins, (5, 5)), 0.0);
    assert_eq!(overall_average(&[]), 0.0);
}

#[test]
fn analyzer_follows_source_size() {
    let mut src = Fixed { bins: vec![128; 256], reads: 0 };
    let mut a = FrequencyAnalyzer::new(1024);
    let f = a.sample(Some(&mut src));
    assert_eq!(f.raw.len(), 256);
    assert!((f.volume - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn bands_stay_in_unit_range() {
    let bins: Vec<u8> = (0..1024).map(|i| (i * 37 % 256) as u8).collect();
    let f = FrequencyFrame::from_bins(&bins);
    for v in [f.bass, f.mid, f.treble, f.volume] {
        assert!((0.0..=1.0).contains(&v), "band {v}");
    }
}
