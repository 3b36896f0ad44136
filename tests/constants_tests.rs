// Host-side tests for the page configuration helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn recorder_prefers_opus_webm() {
    assert_eq!(pick_mime(|_| true), Some("audio/webm;codecs=opus"));
}

#[test]
fn recorder_falls_through_the_preference_list() {
    assert_eq!(pick_mime(|m| m == "audio/webm"), Some("audio/webm"));
    assert_eq!(
        pick_mime(|m| m.starts_with("audio/ogg")),
        Some("audio/ogg;codecs=opus")
    );
}

#[test]
fn recorder_uses_browser_default_when_nothing_matches() {
    assert_eq!(pick_mime(|_| false), None);
    assert_eq!(pick_mime(|m| m == "audio/mp4"), None);
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(capped_pixel_ratio(1.0), 1.0);
    assert_eq!(capped_pixel_ratio(1.5), 1.5);
    assert_eq!(capped_pixel_ratio(2.0), 2.0);
    assert_eq!(capped_pixel_ratio(3.0), 2.0);
}

#[test]
fn pixel_ratio_rejects_nonsense() {
    assert_eq!(capped_pixel_ratio(0.0), 1.0);
    assert_eq!(capped_pixel_ratio(-2.0), 1.0);
    assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);
    assert_eq!(capped_pixel_ratio(f64::INFINITY), 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn turn_timings_are_sane() {
    assert!(RECORD_WINDOW_MS > TURN_PAUSE_MS);
    assert!(TOAST_MS > 0);
    assert!(MAX_CHAT_MESSAGES >= 2, "room for a user and an AI message");
    assert!(MODEL_URL.ends_with(".glb"));
    assert!(ANALYZE_ENDPOINT.starts_with("/api/"));
    assert!(HEALTH_ENDPOINT.starts_with("/api/"));
}
