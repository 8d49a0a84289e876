//! Power card instances - one physical or drawn card owned by a player.
//!
//! Lifecycle:
//!
//! ```text
//!  awarded / scanned            invoked (instant)
//!  ───────────────► Held ─────────────────────────► Used
//!                    │  invoked (persistent)          ▲
//!                    └──────────► Active ─────────────┘
//!                                          consumed
//!  Used ──(RESURRECT)──► Held
//! ```

use serde::{Deserialize, Serialize};

use super::catalog::PowerCardType;
use crate::core::PlayerId;

/// Unique id of a card instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PowerCardId(pub u32);

impl PowerCardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PowerCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PowerCard({})", self.0)
    }
}

/// Where a card is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// In hand, unused.
    Held,
    /// Held with its persistent effect running.
    Active,
    /// Effect spent, at the given timestamp (ms).
    Used { at: u64 },
}

/// A power card owned by a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerCardInstance {
    pub id: PowerCardId,
    pub kind: PowerCardType,
    pub owner: PlayerId,
    pub state: CardState,
}

impl PowerCardInstance {
    /// Create a freshly acquired card.
    #[must_use]
    pub fn new(id: PowerCardId, kind: PowerCardType, owner: PlayerId) -> Self {
        Self {
            id,
            kind,
            owner,
            state: CardState::Held,
        }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.state == CardState::Held
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == CardState::Active
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        matches!(self.state, CardState::Used { .. })
    }

    /// When the effect was spent, if it has been.
    #[must_use]
    pub fn used_at(&self) -> Option<u64> {
        match self.state {
            CardState::Used { at } => Some(at),
            _ => None,
        }
    }

    pub fn activate(&mut self) {
        debug_assert!(self.is_held(), "only held cards can be activated");
        self.state = CardState::Active;
    }

    pub fn mark_used(&mut self, at: u64) {
        self.state = CardState::Used { at };
    }

    /// Return a used card to hand.
    pub fn restore(&mut self) {
        debug_assert!(self.is_used(), "only used cards can be restored");
        self.state = CardState::Held;
    }
}
