//! Session configuration.
//!
//! Hosts configure a session at startup with a [`SessionConfig`]. Every
//! field has a default, so a config can be deserialized from a partial
//! document:
//!
//! ```
//! use trivia_engine::core::{GameMode, SessionConfig};
//!
//! let config = SessionConfig::default()
//!     .with_target_score(20)
//!     .with_mode(GameMode::Speed);
//!
//! assert_eq!(config.target_score, 20);
//! assert_eq!(config.max_tokens, 5);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Fixed rules of the game (bet range, bonus sizes, roster bounds) are
//! constants rather than configuration.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::Difficulty;
use crate::scoring::BetScoring;

/// Fewest players a session can seat.
pub const MIN_PLAYERS: usize = 2;
/// Most players a session can seat.
pub const MAX_PLAYERS: usize = 8;
/// Largest bet a player may place.
pub const MAX_BET: u8 = 3;
/// Flat bonus for a completed CHALLENGE.
pub const CHALLENGE_BONUS: u32 = 3;
/// Questions in a PRECISION sub-round, and the bonus cap.
pub const PRECISION_MAX_QUESTIONS: u8 = 3;
/// Base-point multiplier for a successful viral challenge.
pub const VIRAL_MULTIPLIER: u32 = 3;
/// Base points per correct answer in a speed round.
pub const SPEED_POINTS_PER_ANSWER: u32 = 1;
/// Largest base value a round card may carry. Cards above it are refused
/// before the round loads.
pub const MAX_BASE_POINTS: u32 = 100;

/// Round variant the session plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// One card, one winner (or none).
    #[default]
    Normal,
    /// Two contenders race on one card.
    Battle,
    /// Rapid-fire answers, points per correct answer.
    Speed,
    /// Challenge-only, triple points on success.
    Viral,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameMode::Normal => "normal",
            GameMode::Battle => "battle",
            GameMode::Speed => "speed",
            GameMode::Viral => "viral",
        };
        f.write_str(name)
    }
}

/// Chance that a round winner receives a random power card, by difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardWeights {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub expert: f64,
}

impl Default for AwardWeights {
    fn default() -> Self {
        Self {
            easy: 0.10,
            medium: 0.25,
            hard: 0.45,
            expert: 0.70,
        }
    }
}

impl AwardWeights {
    /// Award probability for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let tiers = [self.easy, self.medium, self.hard, self.expert];
        let in_range = tiers.iter().all(|w| (0.0..=1.0).contains(w));
        let monotonic = tiers.windows(2).all(|pair| pair[0] <= pair[1]);
        if in_range && monotonic {
            Ok(())
        } else {
            Err(ConfigError::AwardWeights)
        }
    }
}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Score that ends the game when reached.
    pub target_score: u32,

    /// Time budget in seconds. Informational: the host's timer delivers the
    /// expiry via `Session::signal_time_expired`.
    pub time_budget_secs: Option<u64>,

    /// Tokens each player starts with.
    pub starting_tokens: u32,

    /// Token balance cap.
    pub max_tokens: u32,

    /// Tokens a round winner earns, subject to the cap.
    pub tokens_per_win: u32,

    /// Round variant for every round of the session.
    pub mode: GameMode,

    /// How a bet feeds into the score.
    pub bet_scoring: BetScoring,

    /// Close betting as soon as every player who can bet has done so.
    pub auto_close_betting: bool,

    /// Power card award chance per difficulty tier.
    pub award_weights: AwardWeights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_score: 15,
            time_budget_secs: None,
            starting_tokens: 2,
            max_tokens: 5,
            tokens_per_win: 1,
            mode: GameMode::Normal,
            bet_scoring: BetScoring::TokenBonus,
            auto_close_betting: true,
            award_weights: AwardWeights::default(),
        }
    }
}

impl SessionConfig {
    /// Set the score that ends the game.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Set an informational time budget.
    #[must_use]
    pub fn with_time_budget_secs(mut self, secs: u64) -> Self {
        self.time_budget_secs = Some(secs);
        self
    }

    /// Set the starting token balance.
    #[must_use]
    pub fn with_starting_tokens(mut self, tokens: u32) -> Self {
        self.starting_tokens = tokens;
        self
    }

    /// Set the token cap.
    #[must_use]
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    /// Set the tokens earned per win.
    #[must_use]
    pub fn with_tokens_per_win(mut self, tokens: u32) -> Self {
        self.tokens_per_win = tokens;
        self
    }

    /// Set the round variant.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the bet scoring rule.
    #[must_use]
    pub fn with_bet_scoring(mut self, rule: BetScoring) -> Self {
        self.bet_scoring = rule;
        self
    }

    /// Enable or disable closing betting once all bets are in.
    #[must_use]
    pub fn with_auto_close_betting(mut self, enabled: bool) -> Self {
        self.auto_close_betting = enabled;
        self
    }

    /// Set the award weights.
    #[must_use]
    pub fn with_award_weights(mut self, weights: AwardWeights) -> Self {
        self.award_weights = weights;
        self
    }

    /// Check the configuration for values the rules cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score == 0 {
            return Err(ConfigError::TargetScore);
        }
        if self.max_tokens == 0 || self.starting_tokens > self.max_tokens {
            return Err(ConfigError::TokenCap {
                starting: self.starting_tokens,
                max: self.max_tokens,
            });
        }
        self.award_weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_score, 15);
        assert_eq!(config.starting_tokens, 2);
        assert_eq!(config.max_tokens, 5);
        assert_eq!(config.mode, GameMode::Normal);
    }

    #[test]
    fn test_zero_target_rejected() {
        let config = SessionConfig::default().with_target_score(0);
        assert_eq!(config.validate(), Err(ConfigError::TargetScore));
    }

    #[test]
    fn test_starting_tokens_above_cap_rejected() {
        let config = SessionConfig::default().with_starting_tokens(6);
        assert!(matches!(config.validate(), Err(ConfigError::TokenCap { starting: 6, max: 5 })));
    }

    #[test]
    fn test_non_monotonic_weights_rejected() {
        let weights = AwardWeights {
            easy: 0.5,
            medium: 0.25,
            hard: 0.45,
            expert: 0.70,
        };
        let config = SessionConfig::default().with_award_weights(weights);
        assert_eq!(config.validate(), Err(ConfigError::AwardWeights));
    }

    #[test]
    fn test_weights_by_difficulty() {
        let weights = AwardWeights::default();
        assert_eq!(weights.for_difficulty(Difficulty::Easy), 0.10);
        assert_eq!(weights.for_difficulty(Difficulty::Expert), 0.70);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"target_score": 22, "mode": "viral"}"#).unwrap();

        assert_eq!(config.target_score, 22);
        assert_eq!(config.mode, GameMode::Viral);
        assert_eq!(config.max_tokens, 5);
        assert!(config.auto_close_betting);
    }
}
