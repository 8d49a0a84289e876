//! Core engine types: players, RNG, clock, configuration, errors, history.
//!
//! This module holds the building blocks every other module leans on.
//! Game rules live in `betting`, `scoring`, `effects`, `round` and `session`.

pub mod player;
pub mod rng;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, RandomSource};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AwardWeights, GameMode, SessionConfig};
pub use error::{ConfigError, EngineError, NotFound, PowerCardError, ValidationError};
pub use event::{EventRecord, SessionEvent};
