//! Fuzz target for TOML analysis configuration.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tp_config::{validate_config, AnalysisConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = toml::from_str::<AnalysisConfig>(text) {
        let _ = validate_config(&config);
    }
});
