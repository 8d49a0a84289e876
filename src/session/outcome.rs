//! Values returned by session operations.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cards::{PowerCardInstance, RoundCard};
use crate::core::{Player, PlayerId, PlayerMap};
use crate::round::Phase;
use crate::scoring::ScoreInput;

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Players tied on the top score share the victory.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// Decide the result from current scores: highest score wins, a tie on
    /// the top score is a shared victory.
    #[must_use]
    pub fn from_scores(players: &PlayerMap<Player>) -> Self {
        let top = players.values().map(|p| p.score).max().unwrap_or(0);
        let mut leaders: Vec<PlayerId> = players
            .values()
            .filter(|p| p.score == top)
            .map(|p| p.id)
            .collect();

        if leaders.len() == 1 {
            GameResult::Winner(leaders.remove(0))
        } else {
            GameResult::Winners(leaders)
        }
    }
}

/// Returned when a round starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStarted {
    pub round: u32,
    pub card: RoundCard,
    /// `Betting` from round 2, `Audio` for round 1.
    pub phase: Phase,
    pub audio_duration: Option<Duration>,
}

impl RoundStarted {
    #[must_use]
    pub fn betting_open(&self) -> bool {
        self.phase == Phase::Betting
    }
}

/// Returned when a bet is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetReceipt {
    pub player: PlayerId,
    pub amount: u8,
    /// This bet was the last one outstanding and closed the betting phase.
    pub betting_closed: bool,
}

/// Points paid to one player at resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAward {
    pub player: PlayerId,
    pub input: ScoreInput,
    pub points: u32,
}

/// Everything a round resolution changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub round: u32,
    /// Players credited with the round's base points.
    pub winners: Vec<PlayerId>,
    pub awards: Vec<PlayerAward>,
    /// Losing bets, deducted from balances.
    pub forfeits: Vec<(PlayerId, u8)>,
    /// Pot total after forfeits.
    pub pot: u32,
    /// Power cards won on the award roll.
    pub cards_awarded: Vec<PowerCardInstance>,
    pub next_turn: PlayerId,
    /// Set when this resolution ended the game.
    pub game_result: Option<GameResult>,
}

impl ScoringResult {
    /// Points awarded to `player` this round.
    #[must_use]
    pub fn points_for(&self, player: PlayerId) -> u32 {
        self.awards
            .iter()
            .filter(|a| a.player == player)
            .map(|a| a.points)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(scores: &[u32]) -> PlayerMap<Player> {
        PlayerMap::new(scores.len(), |id| {
            let mut p = Player::new(id, "x", 0);
            p.score = scores[id.index()];
            p
        })
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let shared = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(shared.is_winner(PlayerId::new(0)));
        assert!(!shared.is_winner(PlayerId::new(1)));
        assert!(shared.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_unique_leader_wins() {
        let players = roster(&[4, 9, 7]);
        assert_eq!(GameResult::from_scores(&players), GameResult::Winner(PlayerId::new(1)));
    }

    #[test]
    fn test_tie_is_shared() {
        let players = roster(&[9, 3, 9, 1]);
        assert_eq!(
            GameResult::from_scores(&players),
            GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)])
        );
    }

    #[test]
    fn test_points_for_sums_awards() {
        let result = ScoringResult {
            round: 2,
            winners: vec![PlayerId::new(0)],
            awards: vec![
                PlayerAward {
                    player: PlayerId::new(0),
                    input: ScoreInput::new(2),
                    points: 2,
                },
                PlayerAward {
                    player: PlayerId::new(1),
                    input: ScoreInput::new(0).with_challenge(3),
                    points: 3,
                },
            ],
            forfeits: vec![],
            pot: 0,
            cards_awarded: vec![],
            next_turn: PlayerId::new(1),
            game_result: None,
        };
        assert_eq!(result.points_for(PlayerId::new(1)), 3);
        assert_eq!(result.points_for(PlayerId::new(2)), 0);
    }
}
