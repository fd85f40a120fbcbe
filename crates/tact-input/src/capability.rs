//! Capability detection
//!
//! Maps what the host platform reports it can do onto one canonical
//! quadruplet of low-level event names. Evaluated once at startup; the
//! selection never changes at runtime.

use serde::{Deserialize, Serialize};

/// Input capabilities reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProfile {
    /// Native pointer-event support
    pub pointer_events: bool,
    /// Legacy prefixed pointer-event support
    pub ms_pointer_events: bool,
    /// Touch-event support
    pub touch_events: bool,
    /// Known slower touch platform (lengthens the tap-confirm delay)
    pub slow_tap: bool,
}

impl PlatformProfile {
    /// Plain desktop: no pointer or touch capabilities, mouse fallback
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Touch device, with the slow-tap hint sniffed from the user agent
    pub fn touch_device(user_agent: &str) -> Self {
        Self {
            touch_events: true,
            slow_tap: Self::is_slow_tap_user_agent(user_agent),
            ..Self::default()
        }
    }

    /// Whether a user agent identifies a known slower touch platform
    pub fn is_slow_tap_user_agent(user_agent: &str) -> bool {
        user_agent.to_ascii_lowercase().contains("android")
    }
}

/// Which family of low-level input events the platform delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScheme {
    Pointer,
    MsPointer,
    Touch,
    Mouse,
}

impl InputScheme {
    /// Select the scheme for a platform. Priority order, first match wins;
    /// the mouse fallback always matches, so there is no error path.
    pub fn detect(profile: &PlatformProfile) -> Self {
        let scheme = if profile.pointer_events {
            Self::Pointer
        } else if profile.ms_pointer_events {
            Self::MsPointer
        } else if profile.touch_events {
            Self::Touch
        } else {
            Self::Mouse
        };
        tracing::debug!("input scheme selected: {:?}", scheme);
        scheme
    }

    /// The event-name quadruplet for this scheme
    pub fn event_names(&self) -> EventNames {
        match self {
            Self::Pointer => EventNames {
                start: "pointerdown",
                end: "pointerup",
                move_: "pointermove",
                cancel: "pointercancel",
            },
            Self::MsPointer => EventNames {
                start: "MSPointerDown",
                end: "MSPointerUp",
                move_: "MSPointerMove",
                cancel: "MSPointerCancel",
            },
            Self::Touch => EventNames {
                start: "touchstart",
                end: "touchend",
                move_: "touchmove",
                cancel: "touchcancel",
            },
            Self::Mouse => EventNames {
                start: "mousedown",
                end: "mouseup",
                move_: "mousemove",
                cancel: "mouseout",
            },
        }
    }

    /// Whether events on this scheme carry per-contact-point lists
    pub fn has_contact_list(&self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Canonical low-level event names {start, move, end, cancel}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventNames {
    pub start: &'static str,
    pub end: &'static str,
    pub move_: &'static str,
    pub cancel: &'static str,
}

impl EventNames {
    /// Detect the names for a platform in one step
    pub fn detect(profile: &PlatformProfile) -> Self {
        InputScheme::detect(profile).event_names()
    }

    /// Classify an incoming event name against this quadruplet
    pub fn phase_of(&self, name: &str) -> Option<PointerPhase> {
        if name == self.start {
            Some(PointerPhase::Start)
        } else if name == self.move_ {
            Some(PointerPhase::Move)
        } else if name == self.end {
            Some(PointerPhase::End)
        } else if name == self.cancel {
            Some(PointerPhase::Cancel)
        } else {
            None
        }
    }
}

/// Phase of a low-level pointer event within a gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let all = PlatformProfile {
            pointer_events: true,
            ms_pointer_events: true,
            touch_events: true,
            slow_tap: false,
        };
        assert_eq!(InputScheme::detect(&all), InputScheme::Pointer);

        let legacy = PlatformProfile {
            ms_pointer_events: true,
            touch_events: true,
            ..PlatformProfile::default()
        };
        assert_eq!(InputScheme::detect(&legacy), InputScheme::MsPointer);

        let touch = PlatformProfile {
            touch_events: true,
            ..PlatformProfile::default()
        };
        assert_eq!(InputScheme::detect(&touch), InputScheme::Touch);
    }

    #[test]
    fn test_mouse_fallback_always_matches() {
        let names = EventNames::detect(&PlatformProfile::desktop());
        assert_eq!(names.start, "mousedown");
        assert_eq!(names.end, "mouseup");
        assert_eq!(names.move_, "mousemove");
        assert_eq!(names.cancel, "mouseout");
    }

    #[test]
    fn test_touch_names() {
        let names = InputScheme::Touch.event_names();
        assert_eq!(names.start, "touchstart");
        assert_eq!(names.cancel, "touchcancel");
        assert!(InputScheme::Touch.has_contact_list());
        assert!(!InputScheme::Mouse.has_contact_list());
    }

    #[test]
    fn test_phase_classification() {
        let names = InputScheme::Pointer.event_names();
        assert_eq!(names.phase_of("pointerdown"), Some(PointerPhase::Start));
        assert_eq!(names.phase_of("pointermove"), Some(PointerPhase::Move));
        assert_eq!(names.phase_of("pointerup"), Some(PointerPhase::End));
        assert_eq!(names.phase_of("pointercancel"), Some(PointerPhase::Cancel));
        assert_eq!(names.phase_of("click"), None);
    }

    #[test]
    fn test_slow_tap_sniff() {
        let profile = PlatformProfile::touch_device("Mozilla/5.0 (Linux; Android 14)");
        assert!(profile.slow_tap);
        assert!(!PlatformProfile::touch_device("iPhone OS 17").slow_tap);
    }
}
