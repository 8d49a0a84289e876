//! Player identification, per-player storage and player state.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. The id doubles as the player's position in
//! the round-robin turn order: the first player is `PlayerId(0)`.
//!
//! ## PlayerMap
//!
//! Roster storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! Score, token balance, the bet held this round, effect flags and the
//! power cards the player owns.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::cards::{ChallengeKind, PowerCardId, PowerCardInstance, PowerCardType};

/// Player identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use trivia_engine::core::{PlayerId, PlayerMap};
///
/// let mut tokens: PlayerMap<u32> = PlayerMap::new(4, |_| 2);
/// tokens[PlayerId::new(1)] = 5;
/// assert_eq!(tokens[PlayerId::new(0)], 2);
/// assert_eq!(tokens[PlayerId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `player` belongs to this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data, if the player exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the player exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over values in turn order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seated player.
///
/// `current_bet` is 0 when no bet is held. A held bet never exceeds
/// `tokens`; the tokens are only deducted when the round is lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub tokens: u32,
    pub current_bet: u8,

    /// SHIELD active: steals against this player fail.
    pub is_immune: bool,
    /// BOOST active: the next scored points are doubled.
    pub boost_active: bool,
    /// The once-per-game peek has been spent.
    pub peek_used: bool,

    /// Owned power cards in acquisition order.
    pub power_cards: SmallVec<[PowerCardInstance; 4]>,

    /// Position in the round-robin turn order.
    pub turn_position: usize,

    // === Pending power-card bonuses ===
    /// A PRECISION sub-round is open and awaiting its answer count.
    pub precision_open: bool,
    /// Precision points waiting to be paid at the next resolution.
    pub precision_bonus: u8,
    /// A CHALLENGE is open and awaiting the operator's verdict.
    pub challenge: Option<ChallengeKind>,
    /// Challenge points waiting to be paid at the next resolution.
    pub challenge_bonus: u32,
}

impl Player {
    /// Create a player with a starting token balance.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, tokens: u32) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            tokens,
            current_bet: 0,
            is_immune: false,
            boost_active: false,
            peek_used: false,
            power_cards: SmallVec::new(),
            turn_position: id.index(),
            precision_open: false,
            precision_bonus: 0,
            challenge: None,
            challenge_bonus: 0,
        }
    }

    /// Check if the player holds a bet this round.
    #[must_use]
    pub fn has_bet(&self) -> bool {
        self.current_bet > 0
    }

    /// Check if flat bonuses are waiting to be paid.
    #[must_use]
    pub fn has_pending_bonus(&self) -> bool {
        self.precision_bonus > 0 || self.challenge_bonus > 0
    }

    /// Look up an owned card.
    #[must_use]
    pub fn card(&self, card: PowerCardId) -> Option<&PowerCardInstance> {
        self.power_cards.iter().find(|c| c.id == card)
    }

    /// Look up an owned card mutably.
    pub fn card_mut(&mut self, card: PowerCardId) -> Option<&mut PowerCardInstance> {
        self.power_cards.iter_mut().find(|c| c.id == card)
    }

    /// Cards that are held and not already running a persistent effect.
    pub fn held_cards(&self) -> impl Iterator<Item = &PowerCardInstance> {
        self.power_cards.iter().filter(|c| c.is_held())
    }

    /// Cards whose effect has been spent.
    pub fn used_cards(&self) -> impl Iterator<Item = &PowerCardInstance> {
        self.power_cards.iter().filter(|c| c.is_used())
    }

    /// First held card of the given type.
    #[must_use]
    pub fn held_of_type(&self, kind: PowerCardType) -> Option<&PowerCardInstance> {
        self.held_cards().find(|c| c.kind == kind)
    }

    /// First card of the given type whose persistent effect is running.
    pub fn active_of_type_mut(&mut self, kind: PowerCardType) -> Option<&mut PowerCardInstance> {
        self.power_cards
            .iter_mut()
            .find(|c| c.kind == kind && c.is_active())
    }

    /// Remove an owned card, returning it.
    pub fn take_card(&mut self, card: PowerCardId) -> Option<PowerCardInstance> {
        let pos = self.power_cards.iter().position(|c| c.id == card)?;
        Some(self.power_cards.remove(pos))
    }

    /// Add a card to the collection, taking ownership of it.
    pub fn give_card(&mut self, mut card: PowerCardInstance) {
        card.owner = self.id;
        self.power_cards.push(card);
    }
}
