//! Window (taper) functions for spectral analysis
//!
//! All windows use the symmetric formulation: w[n] for n = 0..M-1 with the
//! phase normalised by (M-1).

use crate::error::SpectralError;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Gaussian window width (fraction of the half length)
const GAUSSIAN_ALPHA: f64 = 0.4;
/// Fraction of the Tukey window inside the cosine tapers
const TUKEY_ALPHA: f64 = 0.5;
const BLACKMAN_ALPHA: f64 = 0.16;
/// Kaiser shape parameter, beta = π·alpha
const KAISER_ALPHA: f64 = 3.0;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Cosine (sine) window: w[n] = sin(πn/(M-1))
    Cosine,

    /// Lanczos window: w[n] = sinc(2n/(M-1) - 1)
    Lanczos,

    /// Gaussian window with α = 0.4
    Gaussian,

    /// Tukey (tapered cosine) window with α = 0.5
    Tukey,

    /// Blackman window with α = 0.16
    Blackman,

    /// Exact Blackman window (coefficients place zeros at the third and fourth sidelobes)
    ExactBlackman,

    /// Kaiser window with β = 3π
    Kaiser,

    /// Nuttall window (4-term, continuous first derivative)
    Nuttall,

    /// Blackman-Harris window (4-term, ~92 dB sidelobes)
    BlackmanHarris,

    /// Blackman-Nuttall window (4-term)
    BlackmanNuttall,

    /// Flat top window, for amplitude accuracy
    FlatTop,
}

impl WindowType {
    /// Every supported window, in identifier order
    pub const ALL: [WindowType; 13] = [
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Cosine,
        WindowType::Lanczos,
        WindowType::Gaussian,
        WindowType::Tukey,
        WindowType::Blackman,
        WindowType::ExactBlackman,
        WindowType::Kaiser,
        WindowType::Nuttall,
        WindowType::BlackmanHarris,
        WindowType::BlackmanNuttall,
        WindowType::FlatTop,
    ];

    /// Identifier used by callers to select this window
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Cosine => "cosine",
            WindowType::Lanczos => "lanczos",
            WindowType::Gaussian => "gaussian",
            WindowType::Tukey => "tukey",
            WindowType::Blackman => "blackman",
            WindowType::ExactBlackman => "exact_blackman",
            WindowType::Kaiser => "kaiser",
            WindowType::Nuttall => "nuttall",
            WindowType::BlackmanHarris => "blackman_harris",
            WindowType::BlackmanNuttall => "blackman_nuttall",
            WindowType::FlatTop => "flat_top",
        }
    }

    /// Coefficient for sample `n` of a window with `length` samples.
    ///
    /// `length` must be at least 2.
    fn coefficient(&self, n: usize, length: usize) -> f64 {
        let n = n as f64;
        let span = (length - 1) as f64;

        match self {
            WindowType::Hann => 0.5 - 0.5 * (2.0 * PI * n / span).cos(),
            WindowType::Hamming => 0.54 - 0.46 * (2.0 * PI * n / span).cos(),
            WindowType::Cosine => (PI * n / span).sin(),
            WindowType::Lanczos => sinc(2.0 * n / span - 1.0),
            WindowType::Gaussian => {
                let x = (n - span / 2.0) / (GAUSSIAN_ALPHA * span / 2.0);
                (-0.5 * x * x).exp()
            }
            WindowType::Tukey => {
                let edge = TUKEY_ALPHA * span / 2.0;
                if n < edge {
                    0.5 * (1.0 + (PI * (2.0 * n / (TUKEY_ALPHA * span) - 1.0)).cos())
                } else if n <= span * (1.0 - TUKEY_ALPHA / 2.0) {
                    1.0
                } else {
                    0.5 * (1.0
                        + (PI * (2.0 * n / (TUKEY_ALPHA * span) - 2.0 / TUKEY_ALPHA + 1.0)).cos())
                }
            }
            WindowType::Blackman => {
                let a0 = (1.0 - BLACKMAN_ALPHA) / 2.0;
                let a2 = BLACKMAN_ALPHA / 2.0;
                cosine_sum(&[a0, 0.5, a2], n, span)
            }
            WindowType::ExactBlackman => cosine_sum(
                &[7938.0 / 18608.0, 9240.0 / 18608.0, 1430.0 / 18608.0],
                n,
                span,
            ),
            WindowType::Kaiser => {
                let x = 2.0 * n / span - 1.0;
                let beta = PI * KAISER_ALPHA;
                bessel_i0(beta * (1.0 - x * x).max(0.0).sqrt()) / bessel_i0(beta)
            }
            WindowType::Nuttall => {
                cosine_sum(&[0.355768, 0.487396, 0.144232, 0.012604], n, span)
            }
            WindowType::BlackmanHarris => {
                cosine_sum(&[0.35875, 0.48829, 0.14128, 0.01168], n, span)
            }
            WindowType::BlackmanNuttall => {
                cosine_sum(&[0.3635819, 0.4891775, 0.1365995, 0.0106411], n, span)
            }
            WindowType::FlatTop => cosine_sum(&[1.0, 1.93, 1.29, 0.388, 0.032], n, span),
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        WindowType::ALL
            .iter()
            .copied()
            .find(|w| w.name() == wanted)
            .ok_or_else(|| SpectralError::UnknownWindowFunction(s.to_string()))
    }
}

/// Generalised cosine window: Σ (-1)^k a_k cos(2πkn/(M-1))
fn cosine_sum(coefficients: &[f64], n: f64, span: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(k, &a)| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sign * a * (2.0 * PI * k as f64 * n / span).cos()
        })
        .sum()
}

/// Normalised sinc: sin(πx)/(πx)
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Modified Bessel function of the first kind, order 0.
///
/// Polynomial approximation from Abramowitz & Stegun (9.8.1, 9.8.2).
fn bessel_i0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let t = (x / 3.75).powi(2);
        1.0 + t
            * (3.5156229
                + t * (3.0899424
                    + t * (1.2067492 + t * (0.2659732 + t * (0.0360768 + t * 0.0045813)))))
    } else {
        let t = 3.75 / ax;
        (ax.exp() / ax.sqrt())
            * (0.39894228
                + t * (0.01328592
                    + t * (0.00225319
                        + t * (-0.00157565
                            + t * (0.00916281
                                + t * (-0.02057706
                                    + t * (0.02635537 + t * (-0.01647633 + t * 0.00392377))))))))
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..length)
            .map(|n| window_type.coefficient(n, length))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 161;

        for window_type in WindowType::ALL {
            let window = generate_window(window_type, length);
            assert_eq!(window.len(), length, "{window_type}");

            // Symmetric
            for n in 0..length / 2 {
                assert!(
                    (window[n] - window[length - 1 - n]).abs() < 1e-9,
                    "{window_type} not symmetric at {n}"
                );
            }
        }
    }

    #[test]
    fn test_center_values() {
        let length = 161;
        let center = length / 2;

        for window_type in [
            WindowType::Hann,
            WindowType::Hamming,
            WindowType::Cosine,
            WindowType::Lanczos,
            WindowType::Gaussian,
            WindowType::Tukey,
            WindowType::Kaiser,
        ] {
            let window = generate_window(window_type, length);
            assert!((window[center] - 1.0).abs() < 1e-6, "{window_type}");
        }

        // Flat top peaks well above unity
        let flat_top = generate_window(WindowType::FlatTop, length);
        assert!((flat_top[center] - 4.64).abs() < 1e-9);
    }

    #[test]
    fn test_endpoints() {
        let hann = generate_window(WindowType::Hann, 64);
        assert!(hann[0].abs() < 1e-12);
        assert!(hann[63].abs() < 1e-12);

        // Hamming should have non-zero endpoints (0.08)
        let hamming = generate_window(WindowType::Hamming, 64);
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);

        let blackman = generate_window(WindowType::Blackman, 64);
        assert!(blackman[0].abs() < 1e-12);

        let tukey = generate_window(WindowType::Tukey, 64);
        assert!(tukey[0].abs() < 1e-12);
        assert!((tukey[32] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_lengths() {
        for window_type in WindowType::ALL {
            assert!(generate_window(window_type, 0).is_empty());
            assert_eq!(generate_window(window_type, 1), vec![1.0]);
        }
    }

    #[test]
    fn test_parse_identifiers() {
        for window_type in WindowType::ALL {
            let parsed: WindowType = window_type.name().parse().unwrap();
            assert_eq!(parsed, window_type);
        }

        assert_eq!("Blackman_Harris".parse::<WindowType>().unwrap(), WindowType::BlackmanHarris);
        assert_eq!(
            "bartlett".parse::<WindowType>(),
            Err(SpectralError::UnknownWindowFunction("bartlett".into()))
        );
    }

    #[test]
    fn test_bessel_i0() {
        assert!((bessel_i0(0.0) - 1.0).abs() < 1e-7);
        // I0(1) = 1.2660658...
        assert!((bessel_i0(1.0) - 1.2660658).abs() < 1e-6);
        // I0(5) = 27.239871...
        assert!((bessel_i0(5.0) - 27.239871).abs() / 27.239871 < 1e-6);
    }
}
