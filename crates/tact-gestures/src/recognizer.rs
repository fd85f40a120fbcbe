//! Gesture recognizer
//!
//! The timing-sensitive classifier that turns a stream of start/move/end/
//! cancel observations into tap, double-tap, long-tap, and swipe events.
//!
//! Deferred work is held in named timer slots and fired by [`Recognizer::poll`]
//! (or [`Recognizer::pump`], which also dispatches), so a host delivers
//! platform events, then polls once per tick of its loop. A zero-delay slot
//! therefore fires on the tick after it was armed, which is what lets an
//! external scroll signal cancel a pending tap first.

use tact_dom::{Document, NodeId};
use tact_input::{PagePoint, PointerSample};

use crate::emitter::{self, TriggerError};
use crate::timers::{TimerKind, TimerSet};
use crate::GestureConfig;

/// Direction a swipe moved away from, on its dominant axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// A recognized gesture, ready to be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    DoubleTap,
    LongTap,
    /// Generic swipe event; carries the direction string as payload
    Swipe(SwipeDirection),
    /// Direction-specific swipe event, no payload
    DirectionalSwipe(SwipeDirection),
}

impl Gesture {
    /// Name of the synthesized event
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "dbltap",
            Self::LongTap => "longtap",
            Self::Swipe(_) => "swipe",
            Self::DirectionalSwipe(SwipeDirection::Left) => "swipeleft",
            Self::DirectionalSwipe(SwipeDirection::Right) => "swiperight",
            Self::DirectionalSwipe(SwipeDirection::Up) => "swipeup",
            Self::DirectionalSwipe(SwipeDirection::Down) => "swipedown",
        }
    }

    /// Payload attached as the event's `data` field
    pub fn payload(&self) -> Option<&'static str> {
        match self {
            Self::Swipe(direction) => Some(direction.as_str()),
            _ => None,
        }
    }
}

/// A gesture addressed to the element it started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEmission {
    pub target: NodeId,
    pub gesture: Gesture,
}

/// Result of firing due timers
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Gestures recognized this poll, in firing order
    pub emissions: Vec<GestureEmission>,
    /// The host should suppress the platform default action for the end
    /// event that finished this gesture (set when a double tap resolves)
    pub suppress_default: bool,
}

/// The one mutable record of the gesture in progress
#[derive(Debug, Default)]
struct TouchRecord {
    element: Option<NodeId>,
    start: PagePoint,
    end: Option<PagePoint>,
    start_time_ms: u64,
    is_double_tap: bool,
    moved: bool,
}

/// Gesture recognition state machine
///
/// Owns the touch record and the timer slots; all transitions run on the
/// host's single event-handling thread.
pub struct Recognizer {
    config: GestureConfig,
    touch: TouchRecord,
    timers: TimerSet,
    /// Timestamp of the previous start. Lives outside the record so it
    /// survives record resets between lifecycles.
    last_start_ms: Option<u64>,
}

impl Recognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            touch: TouchRecord::default(),
            timers: TimerSet::new(),
            last_start_ms: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Element captured by the gesture in progress, if any
    pub fn captured_element(&self) -> Option<NodeId> {
        self.touch.element
    }

    /// Earliest armed deadline, for hosts that sleep between events
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// A contact came down
    pub fn on_start(&mut self, doc: &Document, target: NodeId, sample: PointerSample, now_ms: u64) {
        let delta = now_ms.saturating_sub(self.last_start_ms.unwrap_or(now_ms));

        if sample.is_single() {
            if self.config.honor_disabled && doc.is_disabled(target) {
                tracing::trace!("start on disabled target ignored");
                return;
            }
            if let Some(element) = self.resolve_target(doc, target) {
                // A new start supersedes a stale pending tap from a
                // fast-finished previous lifecycle.
                self.timers.cancel(TimerKind::TapConfirm);
                self.touch = TouchRecord {
                    element: Some(element),
                    start: sample.point,
                    end: None,
                    start_time_ms: now_ms,
                    is_double_tap: false,
                    moved: false,
                };
            }
        }
        // Multi-contact starts leave the record untouched but still advance
        // the start clock and arm the hold timer.

        if delta > 0 && delta <= self.config.double_tap_window_ms {
            self.touch.is_double_tap = true;
        }
        self.last_start_ms = Some(now_ms);
        self.timers
            .schedule(TimerKind::LongTap, now_ms + self.config.long_tap_delay_ms);
    }

    /// A contact moved
    pub fn on_move(&mut self, sample: PointerSample) {
        // Movement invalidates a long tap regardless of distance.
        self.timers.cancel(TimerKind::LongTap);
        match sample.contacts {
            1 => {
                if self.touch.element.is_some() {
                    self.touch.end = Some(sample.point);
                    self.touch.moved = true;
                }
            }
            2 => {
                // TODO: pinch and rotate recognition
            }
            _ => {}
        }
    }

    /// The contact lifted
    pub fn on_end(&mut self, now_ms: u64) {
        self.timers.cancel(TimerKind::LongTap);
        if self.touch.element.is_none() {
            return;
        }
        tracing::trace!(
            "contact ended after {} ms",
            now_ms.saturating_sub(self.touch.start_time_ms)
        );

        if self.swipe_threshold_crossed() {
            // Classification is deferred one tick, like the tap path.
            self.timers.schedule(TimerKind::Swipe, now_ms);
        } else {
            // One tick of grace so an external scroll signal can cancel the
            // tap before it is confirmed.
            self.timers.schedule(TimerKind::TapTick, now_ms);
        }
    }

    /// Abort the gesture in progress: every timer is disarmed, the record is
    /// cleared, nothing is emitted. Also the hook for external scroll
    /// cancellation.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
        self.touch = TouchRecord::default();
    }

    /// Fire every due timer, re-validating the record inside each deferred
    /// action, and collect the gestures to emit.
    pub fn poll(&mut self, now_ms: u64) -> PollOutcome {
        let mut outcome = PollOutcome::default();
        for kind in self.timers.take_due(now_ms) {
            match kind {
                TimerKind::LongTap => self.fire_long_tap(&mut outcome),
                TimerKind::Swipe => self.fire_swipe(&mut outcome),
                TimerKind::TapTick => self.fire_tap_tick(now_ms, &mut outcome),
                TimerKind::TapConfirm => self.fire_tap_confirm(&mut outcome),
            }
        }
        outcome
    }

    /// Poll, then dispatch each recognized gesture on its captured element.
    ///
    /// Long-tap dispatch failures are best-effort and swallowed; any other
    /// dispatch failure propagates.
    pub fn pump(&mut self, doc: &mut Document, now_ms: u64) -> Result<PollOutcome, TriggerError> {
        let outcome = self.poll(now_ms);
        for emission in &outcome.emissions {
            let payload = emission.gesture.payload().map(str::to_string);
            let result = emitter::trigger(doc, emission.target, emission.gesture.event_name(), payload);
            match result {
                Ok(_) => {}
                Err(err) if emission.gesture == Gesture::LongTap => {
                    tracing::debug!("long-tap dispatch failed: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(outcome)
    }

    fn fire_long_tap(&mut self, outcome: &mut PollOutcome) {
        if let Some(element) = self.touch.element {
            tracing::debug!("longtap on {:?}", element);
            outcome.emissions.push(GestureEmission {
                target: element,
                gesture: Gesture::LongTap,
            });
            self.reset();
        }
    }

    fn fire_swipe(&mut self, outcome: &mut PollOutcome) {
        if let (Some(element), Some(end)) = (self.touch.element, self.touch.end) {
            let direction = swipe_direction(self.touch.start, end);
            tracing::debug!("swipe {} on {:?}", direction.as_str(), element);
            outcome.emissions.push(GestureEmission {
                target: element,
                gesture: Gesture::Swipe(direction),
            });
            outcome.emissions.push(GestureEmission {
                target: element,
                gesture: Gesture::DirectionalSwipe(direction),
            });
            self.reset();
        }
    }

    fn fire_tap_tick(&mut self, now_ms: u64, outcome: &mut PollOutcome) {
        let Some(element) = self.touch.element else {
            return;
        };
        if self.touch.is_double_tap {
            tracing::debug!("dbltap on {:?}", element);
            outcome.emissions.push(GestureEmission {
                target: element,
                gesture: Gesture::DoubleTap,
            });
            outcome.suppress_default = true;
            self.reset();
        } else {
            self.timers
                .schedule(TimerKind::TapConfirm, now_ms + self.config.tap_confirm_delay_ms);
        }
    }

    fn fire_tap_confirm(&mut self, outcome: &mut PollOutcome) {
        match self.touch.element {
            Some(element) if !self.touch.moved => {
                tracing::debug!("tap on {:?}", element);
                outcome.emissions.push(GestureEmission {
                    target: element,
                    gesture: Gesture::Tap,
                });
                self.reset();
            }
            _ => {
                // A drag that crossed neither threshold is neither tap nor
                // swipe.
                self.timers.cancel_all();
                self.reset();
            }
        }
    }

    fn swipe_threshold_crossed(&self) -> bool {
        let Some(end) = self.touch.end else {
            return false;
        };
        let threshold = self.config.swipe_threshold_px;
        (self.touch.start.x - end.x).abs() > threshold
            || (self.touch.start.y - end.y).abs() > threshold
    }

    /// Elements only, never raw text nodes; ripple overlays hand the gesture
    /// to their parent element.
    fn resolve_target(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        let element = doc.tree().nearest_element(target)?;
        if let Some(ripple_tag) = &self.config.ripple_tag {
            let is_ripple = doc
                .element(element)
                .map(|e| &e.tag_name == ripple_tag)
                .unwrap_or(false);
            if is_ripple {
                let parent = doc.tree().parent(element)?;
                return doc.tree().nearest_element(parent);
            }
        }
        Some(element)
    }

    /// Clear the record between lifecycles. `last_start_ms` is kept: the
    /// next start still needs it for its double-tap delta.
    fn reset(&mut self) {
        self.touch = TouchRecord::default();
    }
}

/// Dominant-axis direction, named for where the contact moved away from
fn swipe_direction(start: PagePoint, end: PagePoint) -> SwipeDirection {
    if (start.x - end.x).abs() >= (start.y - end.y).abs() {
        if start.x - end.x > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        }
    } else if start.y - end.y > 0.0 {
        SwipeDirection::Up
    } else {
        SwipeDirection::Down
    }
}
