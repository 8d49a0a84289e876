//! Scoring calculator.
//!
//! A pure function from base points, bet, boost and flat bonuses to the
//! points a player is awarded. Evaluation order matters:
//!
//! ```text
//! final = (base + bet) × boost + precision + challenge
//! ```
//!
//! `BetScoring::Multiplier` swaps the additive bet for the bet multiplier
//! table; everything else is unchanged.

mod calculator;

pub use calculator::{final_points, BetScoring, ScoreInput};
