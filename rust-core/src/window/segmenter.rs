//! Overlapping window segmentation
//!
//! Validates the requested window length and overlap, rounds them to an
//! integer step, and slices the signal into tapered windows.

use super::functions::{generate_window, WindowType};
use crate::error::{SpectralError, SpectralResult};

/// Requested segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    /// Requested window length in samples
    pub window_size: usize,

    /// Fraction of each window shared with the next one, in [0, 1)
    pub overlap: f64,

    /// Taper applied to every window
    pub window_type: WindowType,
}

impl WindowSpec {
    pub fn new(window_size: usize, overlap: f64, window_type: WindowType) -> Self {
        Self {
            window_size,
            overlap,
            window_type,
        }
    }

    /// Overlap factor k = round(1 / (1 - overlap))
    pub fn overlap_factor(&self) -> SpectralResult<usize> {
        if !self.overlap.is_finite() || !(0.0..1.0).contains(&self.overlap) {
            return Err(SpectralError::InvalidOverlap(self.overlap));
        }
        Ok((1.0 / (1.0 - self.overlap)).round() as usize)
    }

    /// Window length rounded down to a multiple of the overlap factor
    pub fn effective_window_size(&self) -> SpectralResult<usize> {
        let k = self.overlap_factor()?;
        Ok(k * (self.window_size / k))
    }

    /// Validate against a signal length and derive the segmentation plan
    pub fn plan(&self, signal_len: usize) -> SpectralResult<WindowPlan> {
        if self.window_size == 0 {
            return Err(SpectralError::InvalidParameter(
                "window size must be greater than zero".into(),
            ));
        }

        let overlap_factor = self.overlap_factor()?;
        let window_size = self.effective_window_size()?;

        if window_size > signal_len {
            return Err(SpectralError::InvalidWindowSize {
                window_size,
                signal_len,
            });
        }
        if overlap_factor > window_size / 2 {
            return Err(SpectralError::ExcessiveOverlap {
                overlap_factor,
                window_size,
            });
        }

        let step = window_size / overlap_factor;

        // n = floor(k * len / W') - (k - 1)
        let fitted = overlap_factor * signal_len / window_size;
        let num_windows = match fitted.checked_sub(overlap_factor - 1) {
            Some(n) if n >= 1 => n,
            _ => {
                return Err(SpectralError::SignalTooShort {
                    window_size,
                    signal_len,
                })
            }
        };

        tracing::debug!(
            requested = self.window_size,
            window_size,
            overlap_factor,
            step,
            num_windows,
            window = %self.window_type,
            "planned segmentation"
        );

        Ok(WindowPlan {
            window_size,
            overlap_factor,
            step,
            num_windows,
            window_type: self.window_type,
        })
    }
}

/// Validated segmentation of one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    /// Effective window length W' (multiple of the overlap factor)
    pub window_size: usize,

    /// Overlap factor k
    pub overlap_factor: usize,

    /// Hop between consecutive windows, W' / k
    pub step: usize,

    /// Number of windows n
    pub num_windows: usize,

    pub window_type: WindowType,
}

impl WindowPlan {
    /// Number of spectral bins per window (W' / 2)
    pub fn num_bins(&self) -> usize {
        self.window_size / 2
    }

    /// Start offset of window `index`
    pub fn offset(&self, index: usize) -> usize {
        index * self.step
    }

    /// Taper coefficients for the effective window length
    pub fn taper(&self) -> Vec<f64> {
        generate_window(self.window_type, self.window_size)
    }

    /// Slice window `index` out of `signal` and apply `taper`
    pub fn window(&self, signal: &[f64], taper: &[f64], index: usize) -> Vec<f64> {
        let start = self.offset(index);
        signal[start..start + self.window_size]
            .iter()
            .zip(taper)
            .map(|(&s, &w)| s * w)
            .collect()
    }

    /// Single pass over the tapered windows of `signal`
    pub fn segments<'a>(&self, signal: &'a [f64]) -> Segments<'a> {
        Segments {
            plan: *self,
            signal,
            taper: self.taper(),
            next: 0,
        }
    }
}

/// Iterator over tapered windows, in signal order
pub struct Segments<'a> {
    plan: WindowPlan,
    signal: &'a [f64],
    taper: Vec<f64>,
    next: usize,
}

impl Iterator for Segments<'_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.plan.num_windows {
            return None;
        }
        let window = self.plan.window(self.signal, &self.taper, self.next);
        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.num_windows - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Split `signal` into tapered, overlapping windows
///
/// # Arguments
/// * `signal` - Input samples
/// * `spec` - Requested window length, overlap and taper
///
/// # Returns
/// The validated plan and an iterator over its windows
pub fn segment<'a>(
    signal: &'a [f64],
    spec: &WindowSpec,
) -> SpectralResult<(WindowPlan, Segments<'a>)> {
    let plan = spec.plan(signal.len())?;
    Ok((plan, plan.segments(signal)))
}
