//! Throughput common types and errors.
//!
//! This crate provides the data model shared by the analysis crates:
//! - Merged pull-request records with optional duration facts
//! - Monday-aligned week ranges and partition validation
//! - The unified error type with stable codes

pub mod error;
pub mod record;
pub mod sentinel;
pub mod week;

pub use error::{Error, ErrorCategory, Result};
pub use record::{DurationKind, FlagKind, Record};
pub use sentinel::{from_sentinel, or_sentinel, NO_DATA};
pub use week::{validate_partition, WeekRange};

/// Schema version stamped on serialized analysis output.
pub const SCHEMA_VERSION: &str = "1.0.0";
