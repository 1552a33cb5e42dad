//! Core math modules.

pub mod beta;
pub mod gamma;
pub mod mann_whitney;
pub mod normal;
pub mod pearson;
pub mod percentile;
pub mod significance;
pub mod stable;
pub mod student_t;
