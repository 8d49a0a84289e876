//! Error taxonomy.
//!
//! - [`EngineError::InvalidPhaseTransition`]: an event arrived in a phase
//!   that does not define it. Hosts drop it silently (see
//!   [`EngineError::is_silent`]).
//! - [`ValidationError`]: the request was well-formed but breaks a rule.
//!   Always carries a readable reason and never mutates state.
//! - [`NotFound`]: unknown player or card id; the caller should re-sync.
//! - [`EngineError::ContentExhausted`]: no more rounds, the game is over.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{PowerCardId, UnknownCardCode};
use crate::core::config::GameMode;
use crate::round::{Phase, PhaseEvent};

/// Top-level error returned by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{event} ignored in phase {phase}")]
    InvalidPhaseTransition { event: PhaseEvent, phase: Phase },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("no more rounds available")]
    ContentExhausted,
}

impl EngineError {
    /// Errors the host should swallow rather than show to a player.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, EngineError::InvalidPhaseTransition { .. })
    }
}

impl From<PowerCardError> for EngineError {
    fn from(err: PowerCardError) -> Self {
        EngineError::Validation(ValidationError::Power(err))
    }
}

/// A rule was broken. No state was changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bet of {requested} exceeds token balance of {available}")]
    InsufficientTokens { requested: u8, available: u32 },

    #[error("bet amount {0} is outside 1-3")]
    InvalidAmount(u8),

    #[error("a bet is already placed this round")]
    DuplicateBet,

    #[error("not allowed during the {phase} phase")]
    WrongPhase { phase: Phase },

    #[error("the session has ended")]
    SessionInactive,

    #[error("resolution does not match the {mode} round")]
    ResolutionMismatch { mode: GameMode },

    #[error("winner is not one of the battle contenders")]
    NotAContender,

    #[error("peek already used this game")]
    PeekSpent,

    #[error("round card is worth {points} base points, above the limit of {max}")]
    BasePointsOutOfRange { points: u32, max: u32 },

    #[error(transparent)]
    UnknownCardCode(#[from] UnknownCardCode),

    #[error(transparent)]
    Power(#[from] PowerCardError),
}

/// Why a power card could not be used or acquired.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PowerCardError {
    #[error("card has already been used")]
    CardExhausted,

    #[error("invalid target")]
    InvalidTarget,

    #[error("target is protected by a shield")]
    TargetShielded,

    #[error("effect is already active")]
    DuplicateEffect,

    #[error("no eligible card")]
    NoEligibleCard,

    #[error("card triggers automatically and cannot be played")]
    PassiveCard,

    #[error("no copies of this card remain in the deck")]
    SupplyExhausted,

    #[error("no pending effect to resolve")]
    NoPendingEffect,
}

/// An id did not resolve.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    #[error("unknown player {0}")]
    Player(PlayerId),

    #[error("unknown power card {0}")]
    Card(PowerCardId),
}

/// Session construction failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count {0} outside 2-8")]
    PlayerCount(usize),

    #[error("target score must be positive")]
    TargetScore,

    #[error("starting tokens {starting} invalid for cap {max}")]
    TokenCap { starting: u32, max: u32 },

    #[error("award weights must be within 0-1 and non-decreasing by difficulty")]
    AwardWeights,

    #[error("no content provider configured")]
    NoContentProvider,
}
