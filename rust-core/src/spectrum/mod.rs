//! Spectral estimation with FFT

pub mod analysis;
pub mod fft;
pub mod frequency;
pub mod windowing;

pub use analysis::{
    calculate_fft, spectrogram, welch, AxisPairing, Combine, PsdScaling, SpectralAnalyzer,
    SpectralConfig, Spectrogram, Spectrum, Squaring, TransformBackend,
};
pub use fft::{magnitude_spectrum, ComplexFftEngine, FftEngine, ForwardTransform};
pub use frequency::frequency_axis;
pub use windowing::{window_energy, window_energy_with};
