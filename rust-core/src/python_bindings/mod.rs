//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn windowed_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectrum_bindings::calculate_fft, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::welch, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::spectrogram, m)?)?;

    // Supported window identifiers
    m.add_function(wrap_pyfunction!(spectrum_bindings::window_functions, m)?)?;

    Ok(())
}
