//! Gesture tuning
//!
//! Timing windows, the pixel threshold, and the policy hooks for
//! platform-specific target handling.

use serde::{Deserialize, Serialize};
use tact_input::PlatformProfile;

/// Tuning for the gesture recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Hold duration before a stationary contact becomes a long tap
    pub long_tap_delay_ms: u64,
    /// Delay before a finished contact is confirmed as a single tap
    pub tap_confirm_delay_ms: u64,
    /// Window after the previous start inside which a new start is a
    /// double-tap candidate
    pub double_tap_window_ms: u64,
    /// Per-axis displacement beyond which a contact classifies as a swipe
    pub swipe_threshold_px: f64,
    /// Tag name of visual ripple overlays; gestures on one are redirected to
    /// its parent element
    pub ripple_tag: Option<String>,
    /// Ignore starts on targets carrying a disabled attribute
    pub honor_disabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_tap_delay_ms: 750,
            tap_confirm_delay_ms: 150,
            double_tap_window_ms: 450,
            swipe_threshold_px: 20.0,
            ripple_tag: Some("ripple".to_string()),
            honor_disabled: true,
        }
    }
}

impl GestureConfig {
    /// Defaults adjusted for a platform: known slower touch platforms get a
    /// longer tap-confirm delay
    pub fn for_profile(profile: &PlatformProfile) -> Self {
        let mut config = Self::default();
        if profile.slow_tap {
            config.tap_confirm_delay_ms = 200;
        }
        config
    }
}
