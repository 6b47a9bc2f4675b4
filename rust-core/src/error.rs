//! Error taxonomy for spectral estimation
//!
//! Every parameter error is raised before any transform work starts.

use thiserror::Error;

/// Result alias used throughout the crate
pub type SpectralResult<T> = Result<T, SpectralError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    /// Effective window length exceeds the signal length
    #[error("Window size must be smaller than data size (effective window {window_size}, signal length {signal_len})")]
    InvalidWindowSize { window_size: usize, signal_len: usize },

    /// Overlap factor exceeds half of the effective window length
    #[error("Too much overlap for the window size (overlap factor {overlap_factor}, effective window {window_size})")]
    ExcessiveOverlap { overlap_factor: usize, window_size: usize },

    /// Not a single full window fits in the signal
    #[error("Signal of {signal_len} samples is too short for a window of {window_size} samples")]
    SignalTooShort { window_size: usize, signal_len: usize },

    #[error("Unknown window function: {0}")]
    UnknownWindowFunction(String),

    /// Overlap fraction outside [0, 1)
    #[error("Overlap must be in [0, 1) (found: {0})")]
    InvalidOverlap(f64),

    #[error("Sample rate must be positive and finite (found: {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure reported by the forward transform backend
    #[error("Forward transform failed: {0}")]
    Transform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SpectralError::InvalidWindowSize {
            window_size: 500,
            signal_len: 100,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("100"));

        let err = SpectralError::UnknownWindowFunction("bartlett".into());
        assert_eq!(err.to_string(), "Unknown window function: bartlett");
    }
}
