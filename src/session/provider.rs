//! Collaborators the session pulls content from.

use std::collections::VecDeque;
use std::time::Duration;

use crate::cards::RoundCard;
use crate::core::{GameMode, PlayerId};

/// What the session knows when it asks for the next round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentRequest {
    /// Number the new round will get.
    pub round: u32,
    pub mode: GameMode,
    /// Player whose turn the round is.
    pub turn: PlayerId,
    /// Highest score at the table, for difficulty ramps.
    pub leading_score: u32,
}

/// Supplies the card and question for each round.
pub trait ContentProvider {
    /// Next round's card, or `None` when content has run out.
    fn next_card(&mut self, request: &ContentRequest) -> Option<RoundCard>;
}

/// Cards served in a fixed order.
///
/// ```
/// use trivia_engine::cards::{QuestionKind, RoundCard, TrackInfo};
/// use trivia_engine::session::QueueProvider;
///
/// let deck: QueueProvider = (1..=3)
///     .map(|i| RoundCard::new(QuestionKind::Title, "?", format!("Song {i}"), TrackInfo::new("t", "a")))
///     .collect();
/// assert_eq!(deck.remaining(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct QueueProvider {
    cards: VecDeque<RoundCard>,
}

impl QueueProvider {
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = RoundCard>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Cards not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl FromIterator<RoundCard> for QueueProvider {
    fn from_iter<I: IntoIterator<Item = RoundCard>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl ContentProvider for QueueProvider {
    fn next_card(&mut self, _request: &ContentRequest) -> Option<RoundCard> {
        self.cards.pop_front()
    }
}

/// Reports how long a round's audio preview should play.
///
/// Purely informational: the engine does not measure elapsed time, the host
/// delivers `signal_audio_finished` when playback ends.
pub trait AudioDurationSource {
    fn duration_for(&self, card: &RoundCard) -> Option<Duration>;
}

/// Same duration for every card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDuration(pub Duration);

impl AudioDurationSource for FixedDuration {
    fn duration_for(&self, _card: &RoundCard) -> Option<Duration> {
        Some(self.0)
    }
}
