//! Betting subsystem.
//!
//! Players wager 1-3 tokens during the betting phase of rounds 2 and later.
//! At most one bet per player per round; a bet never exceeds the balance.

mod bet;
mod pot;

pub use bet::{all_bets_placed, check_bet, clear_bets, forfeit, multiplier, place_bet};
pub use pot::GamePot;
