//! Session history.
//!
//! Every committed mutation is recorded as a [`SessionEvent`]. Hosts that
//! mirror the session on another device can replay the history instead of
//! diffing state.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{ChallengeKind, PowerCardId, PowerCardType};
use crate::round::Phase;
use crate::session::GameResult;

/// Something that happened in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    RoundStarted { round: u32, betting: bool },
    PhaseChanged { from: Phase, to: Phase },
    BetPlaced { player: PlayerId, amount: u8 },
    BetForfeited { player: PlayerId, amount: u8 },
    PointsAwarded { player: PlayerId, points: u32 },
    TokensEarned { player: PlayerId, tokens: u32 },
    CardAwarded { player: PlayerId, card: PowerCardId, kind: PowerCardType },
    CardUsed { player: PlayerId, card: PowerCardId, kind: PowerCardType },
    CardExpired { player: PlayerId, card: PowerCardId, kind: PowerCardType },
    CardStolen { from: PlayerId, to: PlayerId, card: PowerCardId },
    StealCountered { thief: PlayerId, target: PlayerId, counter: PowerCardId },
    CardResurrected { player: PlayerId, card: PowerCardId },
    ChallengePresented { player: PlayerId, challenge: ChallengeKind },
    BonusEarned { player: PlayerId, points: u32 },
    PeekUsed { player: PlayerId },
    RoundAbandoned { round: u32 },
    GameEnded { result: GameResult },
}

/// A history entry with its position in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 0.
    pub sequence: u64,
    /// Round the event belongs to (0 before the first round).
    pub round: u32,
    pub event: SessionEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(sequence: u64, round: u32, event: SessionEvent) -> Self {
        Self {
            sequence,
            round,
            event,
        }
    }
}
