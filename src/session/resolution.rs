//! How a round is resolved, per game mode.
//!
//! Every mode runs the same phase machine; only the resolution rule at the
//! end of the question phase differs. A resolution names who earns base
//! points and how many; bets, boosts, bonuses and forfeits are then applied
//! uniformly by the session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::cards::RoundCard;
use crate::core::config::{SPEED_POINTS_PER_ANSWER, VIRAL_MULTIPLIER};
use crate::core::{EngineError, GameMode, NotFound, Player, PlayerId, PlayerMap, ValidationError};

/// The operator's verdict for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Normal round: one winner, or nobody.
    Single(Option<PlayerId>),
    /// Two contenders race on the card.
    Battle {
        contenders: [PlayerId; 2],
        winner: Option<PlayerId>,
    },
    /// Correct answers per player in a rapid-fire round.
    Speed { correct: Vec<(PlayerId, u8)> },
    /// Players who completed the viral challenge.
    Viral { succeeded: Vec<PlayerId> },
}

impl Resolution {
    /// Mode this resolution belongs to.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        match self {
            Resolution::Single(_) => GameMode::Normal,
            Resolution::Battle { .. } => GameMode::Battle,
            Resolution::Speed { .. } => GameMode::Speed,
            Resolution::Viral { .. } => GameMode::Viral,
        }
    }

    /// Players credited with base points, and the base each one earns, in
    /// turn order. Validates ids without touching state.
    pub(crate) fn base_points(
        &self,
        players: &PlayerMap<Player>,
        card: &RoundCard,
    ) -> Result<Vec<(PlayerId, u32)>, EngineError> {
        let known = |id: PlayerId| -> Result<PlayerId, EngineError> {
            if players.contains(id) {
                Ok(id)
            } else {
                Err(NotFound::Player(id).into())
            }
        };

        match self {
            Resolution::Single(None) => Ok(Vec::new()),
            Resolution::Single(Some(winner)) => Ok(vec![(known(*winner)?, card.base_points)]),
            Resolution::Battle { contenders, winner } => {
                let [a, b] = *contenders;
                known(a)?;
                known(b)?;
                if a == b {
                    return Err(ValidationError::NotAContender.into());
                }
                match winner {
                    None => Ok(Vec::new()),
                    Some(w) if *w == a || *w == b => Ok(vec![(*w, card.base_points)]),
                    Some(_) => Err(ValidationError::NotAContender.into()),
                }
            }
            Resolution::Speed { correct } => {
                let mut counts = BTreeMap::new();
                for &(player, count) in correct {
                    counts.insert(known(player)?, count);
                }
                Ok(counts
                    .into_iter()
                    .filter(|&(_, count)| count > 0)
                    .map(|(player, count)| (player, u32::from(count) * SPEED_POINTS_PER_ANSWER))
                    .collect())
            }
            Resolution::Viral { succeeded } => {
                let mut winners = BTreeSet::new();
                for &player in succeeded {
                    winners.insert(known(player)?);
                }
                Ok(winners
                    .into_iter()
                    .map(|player| (player, card.base_points * VIRAL_MULTIPLIER))
                    .collect())
            }
        }
    }
}
