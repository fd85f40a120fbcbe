//! Tact Input - Platform input adaptation
//!
//! Picks the low-level event names a host should listen to, once, from the
//! platform's reported capabilities, and normalizes heterogeneous platform
//! payloads into one pointer sample type the gesture state machine consumes.

mod capability;
mod sample;

pub use capability::{EventNames, InputScheme, PlatformProfile, PointerPhase};
pub use sample::{PagePoint, PointerSample};
