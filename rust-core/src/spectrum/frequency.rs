//! Frequency axis for FFT bins

/// Frequency of every bin of a `window_size`-point transform
///
/// # Arguments
/// * `window_size` - Effective window length W'
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// W' frequencies, element i = i * sample_rate / W'
pub fn frequency_axis(window_size: usize, sample_rate: f64) -> Vec<f64> {
    let resolution = bin_resolution(window_size, sample_rate);
    (0..window_size).map(|i| i as f64 * resolution).collect()
}

/// Spacing between adjacent bins in Hz
pub fn bin_resolution(window_size: usize, sample_rate: f64) -> f64 {
    sample_rate / window_size as f64
}

/// Bin index closest to `frequency_hz`
pub fn nearest_bin(frequency_hz: f64, window_size: usize, sample_rate: f64) -> usize {
    (frequency_hz / bin_resolution(window_size, sample_rate))
        .round()
        .max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_axis() {
        let freqs = frequency_axis(256, 1000.0);

        assert_eq!(freqs.len(), 256);
        assert_eq!(freqs[0], 0.0);

        let spacing = 1000.0 / 256.0;
        for pair in freqs.windows(2) {
            assert!((pair[1] - pair[0] - spacing).abs() < 1e-9);
        }
        assert!((freqs[255] - 255.0 * spacing).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_bin() {
        assert_eq!(nearest_bin(50.0, 256, 1000.0), 13);
        assert_eq!(nearest_bin(0.0, 256, 1000.0), 0);
        assert_eq!(nearest_bin(500.0, 256, 1000.0), 128);
    }
}
