//! Pearson product-moment correlation with a t-test p-value.

use super::student_t::student_t_two_tailed_p;
use crate::error::SampleError;
use serde::{Deserialize, Serialize};

/// Minimum paired observations for a correlation test.
pub const MIN_PEARSON_SAMPLES: usize = 3;

/// Correlation coefficient with its two-tailed significance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Pearson r, clamped to [-1, 1].
    pub r: f64,
    /// Two-tailed p-value for H0: r = 0.
    pub p_value: f64,
    /// Number of pairs.
    pub n: usize,
}

impl Correlation {
    /// Coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

/// Pearson correlation of paired samples.
///
/// Zero variance in either series is "no evidence": `r = 0`, `p = 1`.
/// Otherwise `t = r sqrt((n-2) / (1-r^2))` is tested against Student's t
/// with `n - 2` degrees of freedom. A perfect correlation yields `p = 0`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<Correlation, SampleError> {
    if x.len() != y.len() {
        return Err(SampleError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < MIN_PEARSON_SAMPLES {
        return Err(SampleError::InsufficientSamples {
            found: n,
            required: MIN_PEARSON_SAMPLES,
        });
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(Correlation {
            r: 0.0,
            p_value: 1.0,
            n,
        });
    }

    let r = (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0);
    let df = nf - 2.0;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let p_value = student_t_two_tailed_p(t, df);

    Ok(Correlation { r, p_value, n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_linear_relation() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let c = pearson_correlation(&x, &y).unwrap();
        assert!((c.r - 1.0).abs() < 1e-12);
        assert!(c.p_value < 1e-6);
        assert_eq!(c.n, 10);
    }

    #[test]
    fn negative_relation_is_signed() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.5, 3.0, 1.0];
        let c = pearson_correlation(&x, &y).unwrap();
        assert!(c.r < -0.95);
        assert!(c.p_value < 0.05);
    }

    #[test]
    fn constant_series_is_no_evidence() {
        let x = [1.0, 5.0, 2.0, 9.0];
        let y = [3.0; 4];
        let c = pearson_correlation(&x, &y).unwrap();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.p_value, 1.0);

        let c = pearson_correlation(&y, &x).unwrap();
        assert_eq!((c.r, c.p_value), (0.0, 1.0));
    }

    #[test]
    fn known_moderate_correlation() {
        // r = 0.8697, n = 10 -> p = 0.00107
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let y = [2.0, 1.0, 4.0, 3.0, 7.0, 5.0, 6.0, 9.0, 8.0, 7.0];
        let c = pearson_correlation(&x, &y).unwrap();
        assert!(c.r > 0.8 && c.r < 0.9, "r={}", c.r);
        assert!(c.p_value < 0.01, "p={}", c.p_value);
        assert!((c.r_squared() - c.r * c.r).abs() < f64::EPSILON);
    }

    #[test]
    fn too_few_pairs() {
        let err = pearson_correlation(&[1.0, 2.0], &[2.0, 4.0]).unwrap_err();
        assert_eq!(
            err,
            SampleError::InsufficientSamples {
                found: 2,
                required: 3
            }
        );
    }

    #[test]
    fn mismatched_lengths() {
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(SampleError::LengthMismatch { left: 3, right: 2 })
        ));
    }
}
