//! The round entity.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cards::RoundCard;
use crate::core::GameMode;

/// One card/question cycle.
///
/// The round owns its card; nothing else points at "the current card".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Starts at 1.
    pub number: u32,
    pub card: RoundCard,
    pub mode: GameMode,
    /// How long the audio phase should last, if the host's audio source
    /// reported one.
    pub audio_duration: Option<Duration>,
}

impl Round {
    #[must_use]
    pub fn new(number: u32, card: RoundCard, mode: GameMode) -> Self {
        debug_assert!(number >= 1, "rounds are numbered from 1");
        Self {
            number,
            card,
            mode,
            audio_duration: None,
        }
    }

    /// Round 1 has nothing to bet against; later rounds always bet.
    #[must_use]
    pub fn offers_betting(&self) -> bool {
        self.number >= 2
    }
}
