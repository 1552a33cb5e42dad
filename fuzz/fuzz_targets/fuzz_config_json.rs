//! Fuzz target for JSON analysis configuration.
//!
//! Parsing and validation must return errors, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tp_config::{validate_config, AnalysisConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<AnalysisConfig>(data) {
        let _ = validate_config(&config);
    }
});
