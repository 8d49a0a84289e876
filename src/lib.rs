//! # trivia-engine
//!
//! Game session engine for a party music-trivia game.
//!
//! Players take turns identifying songs from short audio previews. A round
//! moves through loading, betting, audio, question and answer phases; the
//! operator reveals who answered correctly and the engine settles bets,
//! power card effects, scores and the win condition in one step.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: a `Session` owns all game state. Hosts serialize
//!    calls into it; there are no locks and no timers inside.
//!
//! 2. **Validate, Then Commit**: every operation either fails without
//!    changing anything or applies all of its effects before returning.
//!
//! 3. **Injected Collaborators**: content, audio durations, randomness and
//!    time come from traits, so games are reproducible in tests.
//!
//! ## Modules
//!
//! - `core`: players, RNG, clock, configuration, errors, history
//! - `cards`: power card catalog and instances, round content
//! - `betting`: token bets and the forfeit pot
//! - `scoring`: the points formula
//! - `effects`: power card eligibility, resolution and awards
//! - `round`: the phase state machine
//! - `session`: the orchestrator

pub mod core;
pub mod cards;
pub mod betting;
pub mod scoring;
pub mod effects;
pub mod round;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, EngineError, FixedClock, GameMode, GameRng, Player, PlayerId, PlayerMap, RandomSource,
    SessionConfig, SessionEvent, SystemClock, ValidationError,
};

pub use crate::cards::{Difficulty, PowerCardId, PowerCardType, RoundCard, TrackInfo};

pub use crate::effects::{PowerOutcome, UseTarget};

pub use crate::round::{Phase, PhaseEvent, Transition};

pub use crate::scoring::BetScoring;

pub use crate::session::{
    ContentProvider, GameResult, QueueProvider, Resolution, ScoringResult, Session, SessionBuilder,
};
