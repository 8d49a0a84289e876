//! Round content: the music card and the question asked about it.
//!
//! Content comes from a `ContentProvider`; the engine only reads it.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a question. Drives the power card award chance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// What the question asks about the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Title,
    Artist,
    Year,
    Decade,
    /// Free-form trivia about the track.
    Trivia,
}

/// Metadata of the track a card reflects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub year: Option<u16>,
    /// Preview URL handed to the audio collaborator.
    pub audio_url: Option<String>,
}

impl TrackInfo {
    #[must_use]
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year: None,
            audio_url: None,
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }
}

/// The card played in one round.
///
/// ```
/// use trivia_engine::cards::{Difficulty, QuestionKind, RoundCard, TrackInfo};
///
/// let card = RoundCard::new(
///     QuestionKind::Artist,
///     "Who sings this?",
///     "ABBA",
///     TrackInfo::new("Waterloo", "ABBA").with_year(1974),
/// )
/// .with_base_points(2)
/// .with_difficulty(Difficulty::Hard);
///
/// assert_eq!(card.base_points, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundCard {
    pub question: QuestionKind,
    pub prompt: String,
    pub answer: String,
    pub base_points: u32,
    pub difficulty: Difficulty,
    pub track: TrackInfo,
}

impl RoundCard {
    /// Create a card worth 1 point at medium difficulty.
    #[must_use]
    pub fn new(
        question: QuestionKind,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        track: TrackInfo,
    ) -> Self {
        Self {
            question,
            prompt: prompt.into(),
            answer: answer.into(),
            base_points: 1,
            difficulty: Difficulty::default(),
            track,
        }
    }

    #[must_use]
    pub fn with_base_points(mut self, points: u32) -> Self {
        self.base_points = points;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}
