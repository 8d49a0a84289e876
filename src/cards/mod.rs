//! Card system: power card catalog and instances, round content.
//!
//! ## Key Types
//!
//! - `PowerCardType`: the seven power cards and their fixed properties
//! - `CardSupply`: per-session deck scarcity
//! - `PowerCardInstance`: a card owned by a player, with its lifecycle state
//! - `RoundCard`: the music card and question for one round

pub mod catalog;
pub mod instance;
pub mod content;

pub use catalog::{CardCategory, CardSupply, ChallengeKind, EffectKind, PowerCardType, UnknownCardCode};
pub use instance::{CardState, PowerCardId, PowerCardInstance};
pub use content::{Difficulty, QuestionKind, RoundCard, TrackInfo};
