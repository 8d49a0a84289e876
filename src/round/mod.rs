//! Round lifecycle: the phase state machine and the round entity.
//!
//! The machine is driven purely by external events (round requested,
//! content loaded, betting closed, audio finished, answer revealed). It
//! holds no timers; a host timer delivers the same events a user would.

mod phase;
#[allow(clippy::module_inception)]
mod round;

pub use phase::{Phase, PhaseEvent, PhaseMachine, Transition};
pub use round::Round;
