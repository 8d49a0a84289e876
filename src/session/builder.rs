//! Session construction.

use crate::cards::RoundCard;
use crate::core::{Clock, ConfigError, GameRng, RandomSource, SessionConfig, SystemClock};
use crate::core::config::{MAX_PLAYERS, MIN_PLAYERS};

use super::engine::{Collaborators, Session};
use super::provider::{AudioDurationSource, ContentProvider, QueueProvider};

/// Builder for [`Session`].
///
/// A content provider is required. Randomness defaults to a `GameRng`
/// seeded from the wall clock; pass [`seed`](Self::seed) or
/// [`rng`](Self::rng) for reproducible games.
///
/// ```
/// use trivia_engine::cards::{QuestionKind, RoundCard, TrackInfo};
/// use trivia_engine::core::SessionConfig;
/// use trivia_engine::round::Phase;
/// use trivia_engine::session::Session;
///
/// let card = RoundCard::new(QuestionKind::Year, "Release year?", "1985", TrackInfo::new("Take On Me", "a-ha"));
/// let mut session = Session::builder(SessionConfig::default())
///     .players(["Ana", "Ben"])
///     .cards([card])
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let started = session.request_next_round().unwrap();
/// assert_eq!(started.phase, Phase::Audio);
/// ```
pub struct SessionBuilder {
    config: SessionConfig,
    names: Vec<String>,
    provider: Option<Box<dyn ContentProvider + Send>>,
    audio: Option<Box<dyn AudioDurationSource + Send>>,
    rng: Option<Box<dyn RandomSource + Send>>,
    clock: Option<Box<dyn Clock + Send>>,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            names: Vec::new(),
            provider: None,
            audio: None,
            rng: None,
            clock: None,
        }
    }

    /// Add a player. Join order is turn order.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    #[must_use]
    pub fn players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: impl ContentProvider + Send + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Serve these cards in order.
    #[must_use]
    pub fn cards(self, cards: impl IntoIterator<Item = RoundCard>) -> Self {
        self.provider(QueueProvider::new(cards))
    }

    #[must_use]
    pub fn audio_source(mut self, source: impl AudioDurationSource + Send + 'static) -> Self {
        self.audio = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Use a seeded `GameRng`.
    #[must_use]
    pub fn seed(self, seed: u64) -> Self {
        self.rng(GameRng::new(seed))
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Validate and build the session.
    pub fn build(self) -> Result<Session, ConfigError> {
        let count = self.names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count));
        }
        self.config.validate()?;
        let provider = self.provider.ok_or(ConfigError::NoContentProvider)?;

        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(GameRng::new(clock.now_millis())));

        Ok(Session::from_parts(
            self.config,
            self.names,
            Collaborators {
                provider,
                audio: self.audio,
                rng,
                clock,
            },
        ))
    }
}
