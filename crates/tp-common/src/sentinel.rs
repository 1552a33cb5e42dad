//! Bridge between typed missing values and the legacy "no data" marker.
//!
//! Inside the analysis a missing duration is `None`. Presentation code that
//! still speaks the flat numeric format maps it back with [`or_sentinel`].

/// Reserved marker for a missing duration in flat numeric output.
pub const NO_DATA: f64 = -1.0;

/// Flatten an optional duration, mapping `None` to [`NO_DATA`].
pub fn or_sentinel(value: Option<f64>) -> f64 {
    value.unwrap_or(NO_DATA)
}

/// Inverse of [`or_sentinel`]: any negative value means "no data".
pub fn from_sentinel(value: f64) -> Option<f64> {
    if value < 0.0 || value.is_nan() {
        None
    } else {
        Some(value)
    }
}
