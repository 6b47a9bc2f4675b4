//! Python bindings for spectral estimation

use crate::error::SpectralError;
use crate::spectrum::{SpectralAnalyzer, SpectralConfig};
use crate::window::WindowType;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<SpectralError> for PyErr {
    fn from(err: SpectralError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn analyzer(overlap: f64, windowing_function: &str) -> PyResult<SpectralAnalyzer> {
    let window_type: WindowType = windowing_function.parse()?;
    Ok(SpectralAnalyzer::new(SpectralConfig::with_window(
        overlap,
        window_type,
    )))
}

/// Raw FFT of data, summed over overlapping windows
///
/// Args:
///     input_data: Input signal as numpy array
///     sample_rate: Sample rate in Hz
///     window_size: Window length in samples
///     overlap: Fraction of window overlap in [0, 1) (default: 0.5)
///     windowing_function: Window name (default: "hann")
///
/// Returns:
///     (frequencies, magnitude spectrum)
#[pyfunction]
#[pyo3(signature = (input_data, sample_rate, window_size, overlap=0.5, windowing_function="hann"))]
pub fn calculate_fft<'py>(
    py: Python<'py>,
    input_data: PyReadonlyArray1<f64>,
    sample_rate: f64,
    window_size: usize,
    overlap: f64,
    windowing_function: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let signal = input_data.as_array().to_vec();
    let (freqs, values) = analyzer(overlap, windowing_function)?
        .calculate_fft(&signal, sample_rate, window_size)?
        .into_parts();

    Ok((PyArray1::from_vec(py, freqs), PyArray1::from_vec(py, values)))
}

/// Welch's method of power spectral density estimation
///
/// Returns:
///     (frequencies, PSD)
#[pyfunction]
#[pyo3(signature = (input_data, sample_rate, window_size, overlap=0.5, windowing_function="hann"))]
pub fn welch<'py>(
    py: Python<'py>,
    input_data: PyReadonlyArray1<f64>,
    sample_rate: f64,
    window_size: usize,
    overlap: f64,
    windowing_function: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let signal = input_data.as_array().to_vec();
    let (freqs, psd) = analyzer(overlap, windowing_function)?
        .welch(&signal, sample_rate, window_size)?
        .into_parts();

    Ok((PyArray1::from_vec(py, freqs), PyArray1::from_vec(py, psd)))
}

/// PSD per window, for plotting a spectrogram
///
/// Returns:
///     (frequencies, 2-D array of shape (bins, windows))
#[pyfunction]
#[pyo3(signature = (input_data, sample_rate, window_size, overlap=0.5, windowing_function="hann"))]
pub fn spectrogram<'py>(
    py: Python<'py>,
    input_data: PyReadonlyArray1<f64>,
    sample_rate: f64,
    window_size: usize,
    overlap: f64,
    windowing_function: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray2<f64>)> {
    let signal = input_data.as_array().to_vec();
    let (freqs, power) = analyzer(overlap, windowing_function)?
        .spectrogram(&signal, sample_rate, window_size)?
        .into_parts();

    Ok((PyArray1::from_vec(py, freqs), power.into_pyarray(py)))
}

/// Names accepted as `windowing_function`
#[pyfunction]
pub fn window_functions() -> Vec<&'static str> {
    WindowType::ALL.iter().map(|w| w.name()).collect()
}
