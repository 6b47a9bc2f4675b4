//! Window energy terms for PSD normalisation

use crate::window::{generate_window, WindowType};

/// Window energy Σ f(w[n]) for a custom squaring `f`
pub fn window_energy_with(
    window_type: WindowType,
    length: usize,
    square: impl Fn(f64) -> f64,
) -> f64 {
    generate_window(window_type, length)
        .into_iter()
        .map(square)
        .sum()
}

/// Window energy Σ w[n]², the PSD normalisation term
pub fn window_energy(window_type: WindowType, length: usize) -> f64 {
    window_energy_with(window_type, length, |w| w * w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_energy() {
        // Symmetric Hann: Σ w² = 3(M-1)/8 for M > 1
        let energy = window_energy(WindowType::Hann, 257);
        assert!((energy - 3.0 * 256.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_energy_differs_by_window() {
        let hann = window_energy(WindowType::Hann, 256);
        let blackman = window_energy(WindowType::Blackman, 256);
        let flat_top = window_energy(WindowType::FlatTop, 256);

        assert!(blackman < hann);
        assert!(flat_top > hann);
    }
}
