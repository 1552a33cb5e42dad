//! Throughput math utilities.
//!
//! Everything here is implemented from scratch and is pure: identical
//! inputs always produce bit-identical outputs.

pub mod error;
pub mod math;

pub use error::SampleError;
pub use math::beta::reg_inc_beta;
pub use math::gamma::{reg_lower_gamma, reg_upper_gamma};
pub use math::mann_whitney::{
    mann_whitney_u, MannWhitney, MIN_MANN_WHITNEY_SAMPLES, SMALL_GROUP_SIZE,
};
pub use math::normal::normal_cdf;
pub use math::pearson::{pearson_correlation, Correlation, MIN_PEARSON_SAMPLES};
pub use math::percentile::{mean, median, p90, percentile};
pub use math::significance::SignificanceLabel;
pub use math::stable::{log_beta, log_gamma};
pub use math::student_t::{student_t_cdf, student_t_two_tailed_p};
