//! Tact Gestures - Gesture recognition
//!
//! Classifies a stream of low-level pointer observations into tap, double
//! tap, long tap, and directional swipe events, and synthesizes them as
//! bubbling custom events on the element the gesture started on.
//!
//! The host feeds platform events through a [`GestureEngine`] (or a bare
//! [`Recognizer`]) and pumps once per tick of its event loop; deferred
//! classification runs off named timer slots compared against the host's
//! clock, so behavior is deterministic and the host's scroll detection can
//! cancel a pending tap by calling [`GestureEngine::cancel`] before the
//! pump.

mod config;
mod emitter;
mod engine;
mod recognizer;
mod selection;
mod timers;

pub use config::GestureConfig;
pub use emitter::{trigger, EventTarget, TriggerError};
pub use engine::GestureEngine;
pub use recognizer::{Gesture, GestureEmission, PollOutcome, Recognizer, SwipeDirection};
pub use selection::{disable_text_selection, enable_text_selection, MARKER_CLASS};
pub use timers::{TimerKind, TimerSet};
