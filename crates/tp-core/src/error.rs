//! "Not computable" outcomes.
//!
//! These are expected results on sparse data and travel through `Result`
//! alongside real statistics. Structural faults use `tp_common::Error`.

use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;
use tp_math::SampleError;

/// Why a statistic could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotComputable {
    #[error("no period has any merged pull requests")]
    NoActivePeriods,

    #[error("only {found} period(s) remain after the activity filter, need at least {required}")]
    TooFewPeriods { found: usize, required: usize },

    #[error("threshold {threshold}% left an empty group (below={below}, above={above})")]
    EmptyThresholdGroup {
        threshold: f64,
        below: usize,
        above: usize,
    },

    #[error("insufficient samples: found {found}, need at least {required}")]
    InsufficientSamples { found: usize, required: usize },

    #[error("median split left an empty group (low={low}, high={high})")]
    EmptyMedianGroup { low: usize, high: usize },

    #[error("paired series differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

impl From<SampleError> for NotComputable {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::InsufficientSamples { found, required } => {
                NotComputable::InsufficientSamples { found, required }
            }
            SampleError::LengthMismatch { left, right } => {
                NotComputable::LengthMismatch { left, right }
            }
            SampleError::EmptyGroup { low, high } => NotComputable::EmptyMedianGroup { low, high },
        }
    }
}
