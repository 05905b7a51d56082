//! Fuzz target for the query classifier.
//!
//! Run with: cargo +nightly fuzz run fuzz_classifier
//!
//! Classifies arbitrary messages against the default vocabulary. The
//! classifier must never panic, and every combination key it produces
//! must already be canonical.

#![no_main]

use glowtech_core::{CombinationKey, QueryClassification, QueryClassifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let message = String::from_utf8_lossy(data);
    let classifier = QueryClassifier::default();

    match classifier.classify(&message) {
        QueryClassification::Compatibility { ingredients, key } => {
            assert!(ingredients.len() >= 2);
            assert_eq!(CombinationKey::parse(key.as_str()), key);
            assert_eq!(CombinationKey::from_names(&ingredients), key);
        }
        QueryClassification::Product { ingredient, brand } => {
            assert!(ingredient.is_some() || brand.is_some());
        }
        QueryClassification::Unclassified => {}
    }
});
