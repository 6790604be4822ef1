use std::sync::Arc;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
/// Computes one-sided amplitude spectra of fixed-length real sample windows.
///
/// The FFT plan and work buffers are allocated once for the window length;
/// `amplitude_spectrum` itself is allocation-free and deterministic.
pub struct SpectrumEngine {
    len: usize,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex64>,
    scratch: Vec<Complex64>,
}
impl SpectrumEngine {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);
        let scratch = vec![Complex64::ZERO; fft.get_inplace_scratch_len()];
        Self {
            len,
            fft,
            buffer: vec![Complex64::ZERO; len],
            scratch,
        }
    }
    /// Number of bins in the one-sided spectrum: floor(len / 2) + 1.
    pub fn bins(&self) -> usize {
        self.len / 2 + 1
    }
    /// Fill `out` with the amplitude spectrum of `samples`.
    ///
    /// Bin 0 is the DC magnitude and, for even lengths, the last bin is the
    /// Nyquist magnitude. Every other bin folds the conjugate-symmetric
    /// coefficient pair into a single non-negative magnitude.
    pub fn amplitude_spectrum(&mut self, samples: &[f64], out: &mut [f64]) {
        assert_eq!(samples.len(), self.len);
        assert_eq!(out.len(), self.bins());
        for (slot, &value) in self.buffer.iter_mut().zip(samples) {
            *slot = Complex64::new(value, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);
        out[0] = self.buffer[0].norm(); // DC component
        for k in 1..(self.len + 1) / 2 {
            out[k] = self.buffer[k].norm();
        }
        if self.len % 2 == 0 {
            out[self.len / 2] = self.buffer[self.len / 2].norm(); // Nyquist
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    fn spectrum_of(samples: &[f64]) -> Vec<f64> {
        let mut engine = SpectrumEngine::new(samples.len());
        let mut out = vec![0.0; engine.bins()];
        engine.amplitude_spectrum(samples, &mut out);
        out
    }
    #[test]
    fn bin_count_for_even_and_odd_lengths() {
        assert_eq!(SpectrumEngine::new(8).bins(), 5);
        assert_eq!(SpectrumEngine::new(7).bins(), 4);
        assert_eq!(spectrum_of(&[0.0; 8]).len(), 5);
        assert_eq!(spectrum_of(&[0.0; 7]).len(), 4);
    }
    #[test]
    fn dc_bin_is_magnitude_of_sample_sum() {
        let spectrum = spectrum_of(&[1.5; 8]);
        assert!((spectrum[0] - 12.0).abs() < 1e-9);
        let spectrum = spectrum_of(&[-1.0; 8]);
        assert!((spectrum[0] - 8.0).abs() < 1e-9);
    }
    #[test]
    fn zeros_stay_zero() {
        for value in spectrum_of(&[0.0; 16]) {
            assert_eq!(value, 0.0);
        }
    }
    #[test]
    fn bin_aligned_sine_peaks_at_its_bin() {
        let n = 64;
        let freq = 9;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * freq as f64 * i as f64 / n as f64).sin())
            .collect();
        let spectrum = spectrum_of(&samples);
        // A unit sine at a bin-aligned frequency concentrates all energy in
        // that bin with magnitude n / 2.
        assert!((spectrum[freq] - n as f64 / 2.0).abs() < 1e-9);
        for (k, value) in spectrum.iter().enumerate() {
            if k != freq {
                assert!(*value < 1e-9, "leakage at bin {k}: {value}");
            }
        }
    }
    #[test]
    fn nyquist_bin_captures_alternating_signal() {
        let n = 8;
        let samples: Vec<f64> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let spectrum = spectrum_of(&samples);
        assert!((spectrum[n / 2] - n as f64).abs() < 1e-9);
    }
    #[test]
    fn engine_is_reusable_across_calls() {
        let mut engine = SpectrumEngine::new(16);
        let mut first = vec![0.0; engine.bins()];
        let mut second = vec![0.0; engine.bins()];
        let samples: Vec<f64> = (0..16).map(|i| (i as f64 * 0.3).cos()).collect();
        engine.amplitude_spectrum(&samples, &mut first);
        engine.amplitude_spectrum(&samples, &mut second);
        assert_eq!(first, second);
    }
}
