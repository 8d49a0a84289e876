//! Bet validation, placement and settlement.
//!
//! A bet is held against the player's token balance, not deducted. Losing
//! the round forfeits the wagered tokens; winning leaves the balance
//! untouched.

use tracing::debug;

use crate::core::config::MAX_BET;
use crate::core::{Player, PlayerMap, ValidationError};

/// Bet size to point multiplier: 0 → ×1, 1 → ×2, 2 → ×3, 3+ → ×4.
///
/// ```
/// use trivia_engine::betting::multiplier;
///
/// assert_eq!(multiplier(0), 1);
/// assert_eq!(multiplier(2), 3);
/// assert_eq!(multiplier(3), 4);
/// ```
#[must_use]
pub const fn multiplier(bet: u8) -> u32 {
    match bet {
        0 => 1,
        1 => 2,
        2 => 3,
        _ => 4,
    }
}

/// Check whether `player` may bet `amount` this round.
pub fn check_bet(player: &Player, amount: u8) -> Result<(), ValidationError> {
    if u32::from(amount) > player.tokens {
        return Err(ValidationError::InsufficientTokens {
            requested: amount,
            available: player.tokens,
        });
    }
    if !(1..=MAX_BET).contains(&amount) {
        return Err(ValidationError::InvalidAmount(amount));
    }
    if player.has_bet() {
        return Err(ValidationError::DuplicateBet);
    }
    Ok(())
}

/// Validate and record a bet.
pub fn place_bet(player: &mut Player, amount: u8) -> Result<(), ValidationError> {
    check_bet(player, amount)?;
    player.current_bet = amount;
    debug!(player = %player.id, amount, "Bet placed");
    Ok(())
}

/// Reset every player's bet to 0. Idempotent.
pub fn clear_bets(players: &mut PlayerMap<Player>) {
    for player in players.values_mut() {
        player.current_bet = 0;
    }
}

/// True once every player who can bet holds a bet.
///
/// Players without tokens are skipped. When nobody can bet this is false,
/// so betting is closed by the host rather than by a bet.
#[must_use]
pub fn all_bets_placed(players: &PlayerMap<Player>) -> bool {
    let mut eligible = players.values().filter(|p| p.tokens > 0).peekable();
    eligible.peek().is_some() && eligible.all(Player::has_bet)
}

/// Deduct a losing player's held bet. Returns the forfeited amount.
pub fn forfeit(player: &mut Player) -> u8 {
    let amount = player.current_bet;
    assert!(
        u32::from(amount) <= player.tokens,
        "{} holds a bet of {} above balance {}",
        player.id,
        amount,
        player.tokens
    );
    player.tokens -= u32::from(amount);
    player.current_bet = 0;
    amount
}
