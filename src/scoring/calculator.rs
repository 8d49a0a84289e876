//! Final point computation.

use serde::{Deserialize, Serialize};

use crate::betting::multiplier;
use crate::core::config::PRECISION_MAX_QUESTIONS;

/// Everything that feeds one player's score for one round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub base_points: u32,
    /// Tokens wagered this round (0 = no bet).
    pub bet: u8,
    /// BOOST effect active.
    pub boost: bool,
    /// PRECISION sub-round points, 0-3.
    pub precision_bonus: u8,
    /// CHALLENGE bonus, 0 or the flat bonus.
    pub challenge_bonus: u32,
}

impl ScoreInput {
    #[must_use]
    pub fn new(base_points: u32) -> Self {
        Self {
            base_points,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bet(mut self, bet: u8) -> Self {
        self.bet = bet;
        self
    }

    #[must_use]
    pub fn with_boost(mut self, boost: bool) -> Self {
        self.boost = boost;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, bonus: u8) -> Self {
        self.precision_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_challenge(mut self, bonus: u32) -> Self {
        self.challenge_bonus = bonus;
        self
    }

    /// 2 with an active boost, else 1.
    #[must_use]
    pub fn boost_multiplier(&self) -> u32 {
        if self.boost {
            2
        } else {
            1
        }
    }

    fn flat_bonus(&self) -> u32 {
        debug_assert!(self.precision_bonus <= PRECISION_MAX_QUESTIONS);
        u32::from(self.precision_bonus) + self.challenge_bonus
    }
}

/// How a bet contributes to the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetScoring {
    /// `(base + bet) × boost + precision + challenge`.
    #[default]
    TokenBonus,
    /// `base × multiplier(bet) × boost + precision + challenge`.
    Multiplier,
}

impl BetScoring {
    /// Points for the given input under this rule.
    #[must_use]
    pub fn points(self, input: &ScoreInput) -> u32 {
        match self {
            BetScoring::TokenBonus => final_points(input),
            BetScoring::Multiplier => {
                input.base_points * multiplier(input.bet) * input.boost_multiplier()
                    + input.flat_bonus()
            }
        }
    }
}

/// `(base + bet) × boost + precision + challenge`.
///
/// The bet is added before the boost doubles the sum; flat bonuses are
/// added after.
///
/// ```
/// use trivia_engine::scoring::{final_points, ScoreInput};
///
/// let input = ScoreInput::new(2).with_bet(3).with_boost(true);
/// assert_eq!(final_points(&input), 10);
/// ```
#[must_use]
pub fn final_points(input: &ScoreInput) -> u32 {
    (input.base_points + u32::from(input.bet)) * input.boost_multiplier() + input.flat_bonus()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(final_points(&ScoreInput::new(2).with_bet(3).with_boost(true)), 10);
        assert_eq!(final_points(&ScoreInput::new(1)), 1);
        assert_eq!(
            final_points(&ScoreInput::new(2).with_bet(2).with_boost(true).with_precision(2)),
            10
        );
    }

    #[test]
    fn test_bet_added_before_boost() {
        // (2 + 3) × 2, not 2 × 2 + 3
        let input = ScoreInput::new(2).with_bet(3).with_boost(true);
        assert_ne!(final_points(&input), 7);
    }

    #[test]
    fn test_bonus_only() {
        let input = ScoreInput::new(0).with_challenge(3).with_boost(true);
        assert_eq!(final_points(&input), 3);
    }

    #[test]
    fn test_multiplier_rule() {
        let input = ScoreInput::new(2).with_bet(1);
        assert_eq!(BetScoring::Multiplier.points(&input), 4);

        let boosted = ScoreInput::new(2).with_bet(3).with_boost(true).with_challenge(3);
        assert_eq!(BetScoring::Multiplier.points(&boosted), 2 * 4 * 2 + 3);

        assert_eq!(BetScoring::Multiplier.points(&ScoreInput::new(5)), 5);
    }

    #[test]
    fn test_token_bonus_rule_matches_formula() {
        let input = ScoreInput::new(3).with_bet(2).with_precision(1);
        assert_eq!(BetScoring::TokenBonus.points(&input), final_points(&input));
    }
}
