//! Mann-Whitney U test over a median split of a grouping variable.

use super::normal::normal_cdf;
use super::percentile::median;
use crate::error::SampleError;
use serde::{Deserialize, Serialize};

/// Minimum paired observations for the test.
pub const MIN_MANN_WHITNEY_SAMPLES: usize = 4;

/// Below this group size the normal approximation is unreliable.
pub const SMALL_GROUP_SIZE: usize = 8;

/// Result of a Mann-Whitney U test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitney {
    /// Count of (low, high) pairs with low < high, ties counting one half.
    pub u: f64,
    /// Standardized statistic under the normal approximation.
    pub z: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
    /// Size of the group at or below the grouping median.
    pub n_low: usize,
    /// Size of the group strictly above the grouping median.
    pub n_high: usize,
}

impl MannWhitney {
    /// Whether either group is small enough that `p_value` should be read
    /// with caution.
    pub fn small_groups(&self) -> bool {
        self.n_low < SMALL_GROUP_SIZE || self.n_high < SMALL_GROUP_SIZE
    }
}

/// Compare `metric_values` between observations whose `grouping_values`
/// lie strictly above the grouping median ("high") and the rest ("low").
pub fn mann_whitney_u(
    grouping_values: &[f64],
    metric_values: &[f64],
) -> Result<MannWhitney, SampleError> {
    if grouping_values.len() != metric_values.len() {
        return Err(SampleError::LengthMismatch {
            left: grouping_values.len(),
            right: metric_values.len(),
        });
    }
    let n = grouping_values.len();
    if n < MIN_MANN_WHITNEY_SAMPLES {
        return Err(SampleError::InsufficientSamples {
            found: n,
            required: MIN_MANN_WHITNEY_SAMPLES,
        });
    }

    let split = median(grouping_values).ok_or(SampleError::InsufficientSamples {
        found: 0,
        required: MIN_MANN_WHITNEY_SAMPLES,
    })?;

    let (high, low): (Vec<(f64, f64)>, Vec<(f64, f64)>) = grouping_values
        .iter()
        .copied()
        .zip(metric_values.iter().copied())
        .partition(|(g, _)| *g > split);

    let n_low = low.len();
    let n_high = high.len();
    if n_low == 0 || n_high == 0 {
        return Err(SampleError::EmptyGroup {
            low: n_low,
            high: n_high,
        });
    }

    let mut u = 0.0;
    for (_, lo) in &low {
        for (_, hi) in &high {
            if lo < hi {
                u += 1.0;
            } else if lo == hi {
                u += 0.5;
            }
        }
    }

    let n1 = n_low as f64;
    let n2 = n_high as f64;
    let mean_u = n1 * n2 / 2.0;
    let sigma_u = (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();

    let (z, p_value) = if sigma_u == 0.0 {
        (0.0, 1.0)
    } else {
        let z = (u - mean_u) / sigma_u;
        (z, 2.0 * normal_cdf(-z.abs()))
    };

    Ok(MannWhitney {
        u,
        z,
        p_value,
        n_low,
        n_high,
    })
}
