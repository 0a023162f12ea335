// Host-side tests for the DOM-facing constants and formatting helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn ids_are_distinct() {
    let ids = [ROOT_ID, PROGRESS_ID, PREV_BUTTON_ID, NEXT_BUTTON_ID, COUNTER_ID];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn config_keys_are_valid_data_attribute_suffixes() {
    for key in CONFIG_KEYS {
        assert!(!key.is_empty());
        assert!(
            key.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
            "bad key {key}"
        );
    }
}

#[test]
fn panel_selector_targets_panel_class() {
    assert_eq!(panel_selector(), ".reel-panel");
}

#[test]
fn counter_is_one_based() {
    assert_eq!(counter_text(0, 29), "1 / 29");
    assert_eq!(counter_text(28, 29), "29 / 29");
}

#[test]
fn progress_width_is_clamped_for_display() {
    assert_eq!(progress_width(50.0), "50.00%");
    assert_eq!(progress_width(-3.0), "0.00%");
    assert_eq!(progress_width(104.2), "100.00%");
    assert_eq!(progress_width(f64::NAN), "0.00%");
}

#[test]
fn scale_transform_formats_four_decimals() {
    assert_eq!(scale_transform(1.0), "scale(1.0000)");
    assert_eq!(scale_transform(0.86666), "scale(0.8667)");
}
