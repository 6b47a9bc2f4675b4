//! Forward FFT backends and magnitude reduction
//!
//! Backends return the spectrum as interleaved (re, im) pairs for bins
//! 0..=N/2; `magnitude_spectrum` reduces that to the first N/2 magnitudes.

use crate::error::{SpectralError, SpectralResult};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward transform of a real sequence
pub trait ForwardTransform {
    /// Transform length in samples
    fn fft_size(&self) -> usize;

    /// Forward transform of `input` (exactly `fft_size()` samples)
    ///
    /// # Returns
    /// Interleaved [re0, im0, re1, im1, ...] for bins 0..=fft_size/2
    fn forward(&mut self, input: &[f64]) -> SpectralResult<Vec<f64>>;
}

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }
}

impl ForwardTransform for FftEngine {
    fn fft_size(&self) -> usize {
        self.fft_size
    }

    fn forward(&mut self, input: &[f64]) -> SpectralResult<Vec<f64>> {
        check_length(input, self.fft_size)?;

        // realfft uses the input as scratch space
        self.input_buffer.copy_from_slice(input);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| SpectralError::Transform(e.to_string()))?;

        Ok(interleave(&self.output_buffer))
    }
}

/// Complex-to-complex FFT engine (real input promoted to complex)
pub struct ComplexFftEngine {
    fft_size: usize,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl ComplexFftEngine {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Self {
            fft_size,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch,
        }
    }
}

impl ForwardTransform for ComplexFftEngine {
    fn fft_size(&self) -> usize {
        self.fft_size
    }

    fn forward(&mut self, input: &[f64]) -> SpectralResult<Vec<f64>> {
        check_length(input, self.fft_size)?;

        for (slot, &x) in self.buffer.iter_mut().zip(input) {
            *slot = Complex::new(x, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        // Positive-frequency half only, matching the real transform
        Ok(interleave(&self.buffer[..self.fft_size / 2 + 1]))
    }
}

fn check_length(input: &[f64], expected: usize) -> SpectralResult<()> {
    if input.len() != expected {
        return Err(SpectralError::Transform(format!(
            "expected {} samples, got {}",
            expected,
            input.len()
        )));
    }
    Ok(())
}

fn interleave(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().flat_map(|c| [c.re, c.im]).collect()
}

/// Reduce interleaved (re, im) pairs to magnitudes sqrt(re² + im²)
///
/// A trailing unpaired value is ignored.
pub fn calculate_magnitude(interleaved: &[f64]) -> Vec<f64> {
    interleaved
        .chunks_exact(2)
        .map(|pair| (pair[0] * pair[0] + pair[1] * pair[1]).sqrt())
        .collect()
}

/// Transform one window and return its magnitude spectrum
///
/// # Returns
/// |X[k]| for k = 0..N/2 (the Nyquist bin is dropped)
pub fn magnitude_spectrum<T: ForwardTransform + ?Sized>(
    transform: &mut T,
    window: &[f64],
) -> SpectralResult<Vec<f64>> {
    let interleaved = transform.forward(window)?;
    let mut magnitude = calculate_magnitude(&interleaved);
    magnitude.truncate(transform.fft_size() / 2);
    Ok(magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(128);

        let signal = vec![1.0; 128];
        let spectrum = magnitude_spectrum(&mut fft, &signal).unwrap();

        assert_eq!(spectrum.len(), 64);
        assert!((spectrum[0] - 128.0).abs() < 1e-9);
        assert!(spectrum[1..].iter().all(|&m| m < 1e-9));
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1024);

        // Exactly 100 cycles in the window
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 100.0 * n as f64 / 1024.0).sin())
            .collect();

        let spectrum = magnitude_spectrum(&mut fft, &signal).unwrap();

        let (peak_bin, &peak_mag) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 100);
        // Peak magnitude is N/2 for a unit sine
        assert!((peak_mag - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_interleaved_layout() {
        let mut fft = FftEngine::new(8);
        let output = fft.forward(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();

        // Impulse: every bin is 1 + 0i
        assert_eq!(output.len(), 10);
        for pair in output.chunks_exact(2) {
            assert!((pair[0] - 1.0).abs() < 1e-12);
            assert!(pair[1].abs() < 1e-12);
        }
    }

    #[test]
    fn test_backends_agree() {
        let signal: Vec<f64> = (0..96)
            .map(|n| (0.3 * n as f64).sin() + 0.25 * (1.7 * n as f64).cos())
            .collect();

        let mut real = FftEngine::new(96);
        let mut complex = ComplexFftEngine::new(96);

        let a = real.forward(&signal).unwrap();
        let b = complex.forward(&signal).unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_odd_length() {
        let mut fft = FftEngine::new(255);
        let signal = vec![0.5; 255];
        let spectrum = magnitude_spectrum(&mut fft, &signal).unwrap();

        assert_eq!(spectrum.len(), 127);
        assert!((spectrum[0] - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        let mut fft = FftEngine::new(16);
        assert!(matches!(
            fft.forward(&[0.0; 8]),
            Err(SpectralError::Transform(_))
        ));
    }

    #[test]
    fn test_calculate_magnitude() {
        let magnitude = calculate_magnitude(&[3.0, 4.0, 0.0, -2.0, 1.0]);
        assert_eq!(magnitude, vec![5.0, 2.0]);
    }
}
