//! Fuzz target for the TOML configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text through `AppConfig::parse()`, which covers both
//! deserialization and validation. Any `Err` is fine; panics are not.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = glowtech_config::AppConfig::parse(s) {
            assert!(config.resolver.max_results > 0);
            assert!(!config.vocabulary.triggers.is_empty());
        }
    }
});
