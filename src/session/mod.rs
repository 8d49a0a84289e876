//! The game session: the single orchestrator hosts talk to.
//!
//! ## Key Types
//!
//! - `Session`: owns players, rounds, pot, card supply and history
//! - `SessionBuilder`: validated construction with injected collaborators
//! - `Resolution`: the operator's verdict, one variant per game mode
//! - `ScoringResult`: everything a round resolution changed

mod engine;
mod builder;
mod outcome;
mod provider;
mod resolution;

pub use engine::Session;
pub use builder::SessionBuilder;
pub use outcome::{BetReceipt, GameResult, PlayerAward, RoundStarted, ScoringResult};
pub use provider::{AudioDurationSource, ContentProvider, ContentRequest, FixedDuration, QueueProvider};
pub use resolution::Resolution;
