//! Power card acquisition: random awards and scanned cards.

use tracing::debug;

use crate::cards::{CardSupply, Difficulty, PowerCardType};
use crate::core::{AwardWeights, PowerCardError, RandomSource};

/// Roll for a random power card.
///
/// The award chance depends on difficulty; on success the type is drawn
/// uniformly from the types still in supply. Returns `None` when the roll
/// fails or the deck is empty.
pub fn roll_award(
    supply: &mut CardSupply,
    weights: &AwardWeights,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> Option<PowerCardType> {
    let chance = weights.for_difficulty(difficulty);
    if !rng.gen_bool(chance) {
        debug!(?difficulty, chance, "Award roll missed");
        return None;
    }

    let obtainable = supply.obtainable();
    if obtainable.is_empty() {
        debug!("Award roll hit but the deck is empty");
        return None;
    }

    let kind = obtainable[rng.gen_index(obtainable.len())];
    supply.take(kind);
    Some(kind)
}

/// Take a specific card from supply, for a scanned physical card.
pub fn draw_specific(supply: &mut CardSupply, kind: PowerCardType) -> Result<(), PowerCardError> {
    if supply.take(kind) {
        Ok(())
    } else {
        Err(PowerCardError::SupplyExhausted)
    }
}
