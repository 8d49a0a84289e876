//! Power card targets.

use serde::{Deserialize, Serialize};

use crate::cards::PowerCardId;
use crate::core::PlayerId;

/// What a power card is aimed at.
///
/// - STEAL needs `Player`
/// - RESURRECT takes `Card` or `None` (most recently used card)
/// - everything else takes `None`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseTarget {
    #[default]
    None,
    Player(PlayerId),
    Card(PowerCardId),
}

impl UseTarget {
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            UseTarget::Player(p) => Some(p),
            _ => None,
        }
    }
}

impl From<PlayerId> for UseTarget {
    fn from(player: PlayerId) -> Self {
        UseTarget::Player(player)
    }
}

impl From<PowerCardId> for UseTarget {
    fn from(card: PowerCardId) -> Self {
        UseTarget::Card(card)
    }
}

impl From<Option<PlayerId>> for UseTarget {
    fn from(player: Option<PlayerId>) -> Self {
        player.map_or(UseTarget::None, UseTarget::Player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(UseTarget::from(PlayerId::new(2)), UseTarget::Player(PlayerId::new(2)));
        assert_eq!(UseTarget::from(None::<PlayerId>), UseTarget::None);
        assert_eq!(UseTarget::from(PowerCardId::new(3)).player(), None);
        assert_eq!(UseTarget::Player(PlayerId::new(1)).player(), Some(PlayerId::new(1)));
    }
}
