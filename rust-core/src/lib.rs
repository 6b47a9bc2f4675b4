//! Windowed Spectrum - Spectral Estimation Core
//!
//! Raw FFT, Welch PSD and spectrogram estimation over overlapping,
//! tapered windows, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod spectrum;
pub mod window;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{SpectralError, SpectralResult};
pub use spectrum::{
    calculate_fft, spectrogram, welch, SpectralAnalyzer, SpectralConfig, Spectrogram, Spectrum,
};
pub use window::WindowType;
