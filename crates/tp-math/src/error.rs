//! Sample-size faults for the statistical tests.

use thiserror::Error;

/// Why a statistical test could not be evaluated on its input.
///
/// These are expected outcomes on sparse data, not bugs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("insufficient samples: found {found}, need at least {required}")]
    InsufficientSamples { found: usize, required: usize },

    #[error("paired inputs differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("median split left an empty group (low={low}, high={high})")]
    EmptyGroup { low: usize, high: usize },
}
