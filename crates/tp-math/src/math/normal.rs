//! Standard normal distribution.

use super::gamma::reg_upper_gamma;

/// CDF of the standard normal distribution.
///
/// `Phi(z) = erfc(-z / sqrt 2) / 2`, with `erfc(u) = Q(1/2, u^2)` for
/// `u >= 0`. The lower tail is computed directly, so `Phi(-8)` keeps its
/// relative precision instead of cancelling against 1.
pub fn normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    let tail = 0.5 * reg_upper_gamma(0.5, 0.5 * z * z);
    if z < 0.0 {
        tail
    } else {
        1.0 - tail
    }
}
