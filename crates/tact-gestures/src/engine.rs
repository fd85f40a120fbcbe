//! Engine glue
//!
//! Binds the detected event-name quadruplet to a recognizer, so a host can
//! forward raw platform events by name and pump the timers once per tick of
//! its loop.

use tact_dom::{Document, NodeId};
use tact_input::{EventNames, InputScheme, PlatformProfile, PointerPhase, PointerSample};

use crate::emitter::TriggerError;
use crate::recognizer::{PollOutcome, Recognizer};
use crate::GestureConfig;

/// Gesture recognition bound to a platform's event names
pub struct GestureEngine {
    scheme: InputScheme,
    names: EventNames,
    recognizer: Recognizer,
}

impl GestureEngine {
    /// Detect the platform's event scheme once and build a recognizer tuned
    /// for it
    pub fn new(profile: &PlatformProfile) -> Self {
        let scheme = InputScheme::detect(profile);
        Self {
            scheme,
            names: scheme.event_names(),
            recognizer: Recognizer::new(GestureConfig::for_profile(profile)),
        }
    }

    /// Build with explicit tuning
    pub fn with_config(profile: &PlatformProfile, config: GestureConfig) -> Self {
        let scheme = InputScheme::detect(profile);
        Self {
            scheme,
            names: scheme.event_names(),
            recognizer: Recognizer::new(config),
        }
    }

    /// The low-level event names the host should listen for
    pub fn event_names(&self) -> EventNames {
        self.names
    }

    pub fn scheme(&self) -> InputScheme {
        self.scheme
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    /// Route one platform event, by name, into the recognizer.
    ///
    /// `target` is the hit-tested node (only consulted for start events).
    /// Events whose name is not in the quadruplet are ignored. This only
    /// records the transition; call [`GestureEngine::pump`] after delivering
    /// the tick's events (cancellation signals included) to fire timers.
    pub fn handle(
        &mut self,
        doc: &Document,
        name: &str,
        target: NodeId,
        sample: PointerSample,
        now_ms: u64,
    ) {
        match self.names.phase_of(name) {
            Some(PointerPhase::Start) => self.recognizer.on_start(doc, target, sample, now_ms),
            Some(PointerPhase::Move) => self.recognizer.on_move(sample),
            Some(PointerPhase::End) => self.recognizer.on_end(now_ms),
            Some(PointerPhase::Cancel) => self.recognizer.cancel(),
            None => tracing::trace!("ignoring unrelated event {name:?}"),
        }
    }

    /// Fire due timers and dispatch recognized gestures on the document
    pub fn pump(&mut self, doc: &mut Document, now_ms: u64) -> Result<PollOutcome, TriggerError> {
        self.recognizer.pump(doc, now_ms)
    }

    /// External cancellation hook (e.g. a scroll signal). Wins against a
    /// pending tap if invoked before the tick is pumped.
    pub fn cancel(&mut self) {
        self.recognizer.cancel();
    }

    /// Earliest armed deadline, for hosts that sleep between events
    pub fn next_deadline(&self) -> Option<u64> {
        self.recognizer.next_deadline()
    }
}
