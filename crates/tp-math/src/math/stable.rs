//! Log-domain gamma primitives.

use std::f64::consts::PI;

const LOG_SQRT_2PI: f64 = 0.918_938_533_204_672_8; // 0.5 * ln(2*pi)
const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)] // These are published numerical constants
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the Gamma function (log |Gamma(z)|).
///
/// Uses a Lanczos approximation with reflection for z < 0.5.
pub fn log_gamma(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return f64::INFINITY;
    }
    if z == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if z <= 0.0 && (z - z.round()).abs() < 1e-15 {
        // Poles at non-positive integers.
        return f64::NAN;
    }
    if z < 0.5 {
        let sin_pi = (PI * z).sin();
        if sin_pi == 0.0 {
            return f64::NAN;
        }
        return PI.ln() - sin_pi.abs().ln() - log_gamma(1.0 - z);
    }

    let z_minus = z - 1.0;
    let mut x = LANCZOS_COEFFS[0];
    for (i, coeff) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        x += coeff / (z_minus + i as f64);
    }
    let t = z_minus + LANCZOS_G + 0.5;
    LOG_SQRT_2PI + (z_minus + 0.5) * t.ln() - t + x.ln()
}

/// log Beta(a, b) = log Gamma(a) + log Gamma(b) - log Gamma(a+b).
pub fn log_beta(a: f64, b: f64) -> f64 {
    log_gamma(a) + log_gamma(b) - log_gamma(a + b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn log_gamma_known_values() {
        assert!(approx_eq(log_gamma(1.0), 0.0, 1e-12));
        assert!(approx_eq(log_gamma(2.0), 0.0, 1e-12));
        assert!(approx_eq(log_gamma(0.5), 0.5 * PI.ln(), 1e-10));
        assert!(approx_eq(log_gamma(5.0), 24.0f64.ln(), 1e-10));
        // Gamma(10) = 362880
        assert!(approx_eq(log_gamma(10.0), 362_880.0f64.ln(), 1e-9));
    }

    #[test]
    fn log_gamma_large_argument_stays_finite() {
        // Stirling: ln Gamma(500) ~ 2605.1158
        let lg = log_gamma(500.0);
        assert!(lg.is_finite());
        assert!(approx_eq(lg, 2_605.115_850_361_7, 1e-6));
    }

    #[test]
    fn log_beta_matches_closed_forms() {
        assert!(approx_eq(log_beta(1.0, 1.0), 0.0, 1e-12));
        // B(2,3) = 1/12
        assert!(approx_eq(log_beta(2.0, 3.0), (1.0f64 / 12.0).ln(), 1e-12));
        // B(1/2, 1/2) = pi
        assert!(approx_eq(log_beta(0.5, 0.5), PI.ln(), 1e-10));
    }

    #[test]
    fn log_gamma_poles_are_nan() {
        assert!(log_gamma(0.0).is_nan());
        assert!(log_gamma(-2.0).is_nan());
        assert!(log_gamma(f64::NAN).is_nan());
    }
}
