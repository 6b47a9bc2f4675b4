//! Windowed spectral estimation
//!
//! Combines segmentation, the FFT backends and the frequency axis into the
//! three products: raw magnitude spectrum, Welch PSD and spectrogram.

use super::fft::{magnitude_spectrum, ComplexFftEngine, FftEngine, ForwardTransform};
use super::frequency::frequency_axis;
use super::windowing::window_energy_with;
use crate::error::{SpectralError, SpectralResult};
use crate::window::{WindowPlan, WindowSpec, WindowType};
use ndarray::Array2;

/// Overlap used when the caller does not pick one
pub const DEFAULT_OVERLAP: f64 = 0.5;

/// Window whose energy normalises the PSD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PsdScaling {
    /// Always the Hann window's energy, whatever taper was applied
    #[default]
    HannEnergy,

    /// Energy of the taper actually applied
    SelectedWindow,
}

/// How magnitudes (and window coefficients) are squared for the PSD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Squaring {
    /// x * x
    #[default]
    Arithmetic,

    /// Legacy `ToInt32(x) XOR 2`: truncates to a 32-bit integer and flips bit 1
    BitwiseXor,
}

impl Squaring {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Squaring::Arithmetic => x * x,
            Squaring::BitwiseXor => (to_int32(x) ^ 2) as f64,
        }
    }
}

/// Truncating wrap of a float into i32 (NaN and infinities map to 0)
fn to_int32(x: f64) -> i32 {
    if !x.is_finite() {
        return 0;
    }
    let wrapped = x.trunc().rem_euclid(4_294_967_296.0);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - 4_294_967_296.0) as i32
    } else {
        wrapped as i32
    }
}

/// How per-window results are combined into one spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// Element-wise sum over windows
    #[default]
    Sum,

    /// Element-wise mean over windows
    Mean,
}

/// Length of the frequency axis returned with each product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPairing {
    /// Axis truncated to W'/2, one frequency per value
    #[default]
    Matched,

    /// Full W'-length axis; only the first W'/2 entries label values
    Full,
}

/// Transform backend used per window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformBackend {
    /// Real-input FFT (realfft)
    #[default]
    RealFft,

    /// Complex FFT on zero-imaginary input (rustfft)
    ComplexFft,
}

impl TransformBackend {
    fn engine(&self, fft_size: usize) -> Box<dyn ForwardTransform> {
        match self {
            TransformBackend::RealFft => Box::new(FftEngine::new(fft_size)),
            TransformBackend::ComplexFft => Box::new(ComplexFftEngine::new(fft_size)),
        }
    }
}

/// Spectral estimation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralConfig {
    /// Fraction of each window shared with the next, in [0, 1)
    pub overlap: f64,

    /// Taper applied to every window
    pub window_type: WindowType,

    /// Window energy used for PSD normalisation
    pub psd_scaling: PsdScaling,

    /// Squaring used for PSD values and window energy
    pub squaring: Squaring,

    /// Combination of per-window results for FFT and Welch
    pub combine: Combine,

    /// Frequency axis length
    pub axis: AxisPairing,

    pub backend: TransformBackend,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            overlap: DEFAULT_OVERLAP,
            window_type: WindowType::Hann,
            psd_scaling: PsdScaling::default(),
            squaring: Squaring::default(),
            combine: Combine::default(),
            axis: AxisPairing::default(),
            backend: TransformBackend::default(),
        }
    }
}

impl SpectralConfig {
    /// Default configuration with the given overlap and taper
    pub fn with_window(overlap: f64, window_type: WindowType) -> Self {
        Self {
            overlap,
            window_type,
            ..Self::default()
        }
    }
}

/// One-dimensional spectral product paired with its frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz
    pub frequencies: Vec<f64>,

    /// Magnitude or power per bin
    pub values: Vec<f64>,

    /// Segmentation that produced this spectrum
    pub plan: WindowPlan,
}

impl Spectrum {
    /// (frequencies, values)
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.values)
    }
}

/// Time-varying PSD, indexed `[frequency_bin][window_index]`
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    /// Bin frequencies in Hz
    pub frequencies: Vec<f64>,

    /// PSD matrix, shape (bins, windows)
    pub power: Array2<f64>,

    pub plan: WindowPlan,
}

impl Spectrogram {
    pub fn num_bins(&self) -> usize {
        self.power.nrows()
    }

    pub fn num_windows(&self) -> usize {
        self.power.ncols()
    }

    /// Start time of every column in seconds
    pub fn times(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_windows())
            .map(|i| self.plan.offset(i) as f64 / sample_rate)
            .collect()
    }

    /// (frequencies, power)
    pub fn into_parts(self) -> (Vec<f64>, Array2<f64>) {
        (self.frequencies, self.power)
    }
}

/// Windowed spectrum estimator
#[derive(Debug, Clone, Default)]
pub struct SpectralAnalyzer {
    config: SpectralConfig,
}

impl SpectralAnalyzer {
    /// Create new analyzer
    pub fn new(config: SpectralConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Update configuration
    pub fn update_config(&mut self, config: SpectralConfig) {
        self.config = config;
    }

    /// Raw FFT: magnitude spectra of all windows, combined
    ///
    /// # Arguments
    /// * `signal` - Input samples
    /// * `sample_rate` - Sample rate in Hz
    /// * `window_size` - Requested window length in samples
    pub fn calculate_fft(
        &self,
        signal: &[f64],
        sample_rate: f64,
        window_size: usize,
    ) -> SpectralResult<Spectrum> {
        let plan = self.plan(signal, sample_rate, window_size)?;
        let spectra = self.window_spectra(signal, &plan, |magnitude| magnitude)?;
        let values = self.combine(&spectra, plan.num_bins());

        tracing::debug!(
            num_windows = plan.num_windows,
            bins = values.len(),
            "computed raw spectrum"
        );

        Ok(Spectrum {
            frequencies: self.frequencies(&plan, sample_rate),
            values,
            plan,
        })
    }

    /// Welch's method: scaled periodograms of all windows, combined
    pub fn welch(
        &self,
        signal: &[f64],
        sample_rate: f64,
        window_size: usize,
    ) -> SpectralResult<Spectrum> {
        let plan = self.plan(signal, sample_rate, window_size)?;
        let periodograms = self.periodograms(signal, sample_rate, &plan)?;
        let values = self.combine(&periodograms, plan.num_bins());

        tracing::debug!(
            num_windows = plan.num_windows,
            bins = values.len(),
            "computed welch psd"
        );

        Ok(Spectrum {
            frequencies: self.frequencies(&plan, sample_rate),
            values,
            plan,
        })
    }

    /// Spectrogram: one scaled periodogram per window, transposed to
    /// `[frequency_bin][window_index]`
    pub fn spectrogram(
        &self,
        signal: &[f64],
        sample_rate: f64,
        window_size: usize,
    ) -> SpectralResult<Spectrogram> {
        let plan = self.plan(signal, sample_rate, window_size)?;
        let periodograms = self.periodograms(signal, sample_rate, &plan)?;

        // Transpose needs at least one column
        if periodograms.is_empty() {
            return Err(SpectralError::SignalTooShort {
                window_size: plan.window_size,
                signal_len: signal.len(),
            });
        }

        let bins = plan.num_bins();
        let power = Array2::from_shape_fn((bins, periodograms.len()), |(bin, window)| {
            periodograms[window][bin]
        });

        tracing::debug!(
            num_windows = power.ncols(),
            bins = power.nrows(),
            "computed spectrogram"
        );

        Ok(Spectrogram {
            frequencies: self.frequencies(&plan, sample_rate),
            power,
            plan,
        })
    }

    /// Validate every parameter before any transform runs
    fn plan(
        &self,
        signal: &[f64],
        sample_rate: f64,
        window_size: usize,
    ) -> SpectralResult<WindowPlan> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectralError::InvalidSampleRate(sample_rate));
        }
        WindowSpec::new(window_size, self.config.overlap, self.config.window_type)
            .plan(signal.len())
    }

    fn frequencies(&self, plan: &WindowPlan, sample_rate: f64) -> Vec<f64> {
        let mut frequencies = frequency_axis(plan.window_size, sample_rate);
        if self.config.axis == AxisPairing::Matched {
            frequencies.truncate(plan.num_bins());
        }
        frequencies
    }

    /// PSD normalisation: 1 / (sample_rate * Σ square(w[n]))
    fn psd_scale(&self, sample_rate: f64, plan: &WindowPlan) -> SpectralResult<f64> {
        let window_type = match self.config.psd_scaling {
            PsdScaling::HannEnergy => WindowType::Hann,
            PsdScaling::SelectedWindow => plan.window_type,
        };
        let squaring = self.config.squaring;
        let energy = window_energy_with(window_type, plan.window_size, |w| squaring.apply(w));

        if !energy.is_finite() || energy == 0.0 {
            return Err(SpectralError::InvalidParameter(format!(
                "{} window of length {} has zero energy",
                window_type, plan.window_size
            )));
        }
        Ok(1.0 / (sample_rate * energy))
    }

    /// Scaled power spectrum of every window, in window order
    fn periodograms(
        &self,
        signal: &[f64],
        sample_rate: f64,
        plan: &WindowPlan,
    ) -> SpectralResult<Vec<Vec<f64>>> {
        let scale = self.psd_scale(sample_rate, plan)?;
        let squaring = self.config.squaring;

        self.window_spectra(signal, plan, move |magnitude| {
            magnitude
                .into_iter()
                .map(|m| squaring.apply(m) * scale)
                .collect()
        })
    }

    /// Transform every window and map its magnitude spectrum through `f`
    #[cfg(not(feature = "parallel"))]
    fn window_spectra<F>(
        &self,
        signal: &[f64],
        plan: &WindowPlan,
        f: F,
    ) -> SpectralResult<Vec<Vec<f64>>>
    where
        F: Fn(Vec<f64>) -> Vec<f64> + Sync + Send,
    {
        let mut engine = self.config.backend.engine(plan.window_size);

        plan.segments(signal)
            .enumerate()
            .map(|(index, window)| {
                tracing::trace!(index, offset = plan.offset(index), "transforming window");
                magnitude_spectrum(&mut *engine, &window).map(&f)
            })
            .collect()
    }

    /// Transform every window on the rayon pool, one engine per worker
    #[cfg(feature = "parallel")]
    fn window_spectra<F>(
        &self,
        signal: &[f64],
        plan: &WindowPlan,
        f: F,
    ) -> SpectralResult<Vec<Vec<f64>>>
    where
        F: Fn(Vec<f64>) -> Vec<f64> + Sync + Send,
    {
        use rayon::prelude::*;

        let backend = self.config.backend;
        let taper = plan.taper();

        (0..plan.num_windows)
            .into_par_iter()
            .map_init(
                || backend.engine(plan.window_size),
                |engine, index| {
                    tracing::trace!(index, offset = plan.offset(index), "transforming window");
                    let window = plan.window(signal, &taper, index);
                    magnitude_spectrum(&mut **engine, &window).map(&f)
                },
            )
            .collect()
    }

    /// Element-wise combination of per-window spectra
    fn combine(&self, spectra: &[Vec<f64>], bins: usize) -> Vec<f64> {
        let mut total = vec![0.0; bins];
        for spectrum in spectra {
            for (acc, &value) in total.iter_mut().zip(spectrum) {
                *acc += value;
            }
        }

        if self.config.combine == Combine::Mean && !spectra.is_empty() {
            let count = spectra.len() as f64;
            for acc in total.iter_mut() {
                *acc /= count;
            }
        }
        total
    }
}

fn analyzer_for(overlap: Option<f64>, window_type: Option<WindowType>) -> SpectralAnalyzer {
    SpectralAnalyzer::new(SpectralConfig::with_window(
        overlap.unwrap_or(DEFAULT_OVERLAP),
        window_type.unwrap_or_default(),
    ))
}

/// Raw FFT of data. 50% window overlap and Hann taper unless given.
///
/// # Returns
/// Frequencies and the summed magnitude spectrum
pub fn calculate_fft(
    input: &[f64],
    sample_rate: f64,
    window_size: usize,
    overlap: Option<f64>,
    window_type: Option<WindowType>,
) -> SpectralResult<Spectrum> {
    analyzer_for(overlap, window_type).calculate_fft(input, sample_rate, window_size)
}

/// Welch's method of power spectral density estimation
///
/// # Returns
/// Frequencies and the summed, scaled PSD
pub fn welch(
    input: &[f64],
    sample_rate: f64,
    window_size: usize,
    overlap: Option<f64>,
    window_type: Option<WindowType>,
) -> SpectralResult<Spectrum> {
    analyzer_for(overlap, window_type).welch(input, sample_rate, window_size)
}

/// PSD per window for plotting a spectrogram
///
/// # Returns
/// Frequencies and a (bins, windows) PSD matrix
pub fn spectrogram(
    input: &[f64],
    sample_rate: f64,
    window_size: usize,
    overlap: Option<f64>,
    window_type: Option<WindowType>,
) -> SpectralResult<Spectrogram> {
    analyzer_for(overlap, window_type).spectrogram(input, sample_rate, window_size)
}
