//! Power card effect resolution.
//!
//! Resolution is check-then-act. [`plan`] validates the use and makes any
//! random choice (which card a STEAL takes, which challenge is drawn)
//! without touching state; [`apply`] then commits the plan. A failed plan
//! leaves every player exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{ChallengeKind, EffectKind, PowerCardId, PowerCardType};
use crate::core::config::{CHALLENGE_BONUS, PRECISION_MAX_QUESTIONS};
use crate::core::{EngineError, NotFound, Player, PlayerId, PlayerMap, PowerCardError, RandomSource};

use super::eligibility::{can_use, resurrect_candidate};
use super::targeting::UseTarget;

/// A validated power card use, one variant per card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PowerPlan {
    Boost,
    Shield,
    Steal { target: PlayerId, steal: StealPlan },
    Precision,
    Challenge { challenge: ChallengeKind },
    Resurrect { card: PowerCardId },
}

/// What a STEAL will do once applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StealPlan {
    /// Take this card from the target.
    Take(PowerCardId),
    /// The target's COUNTER reverses the steal.
    Countered(PowerCardId),
}

/// What happened when a card was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerOutcome {
    BoostActivated,
    ShieldRaised,
    Stole {
        from: PlayerId,
        card: PowerCardId,
        kind: PowerCardType,
    },
    Countered {
        by: PlayerId,
        counter: PowerCardId,
    },
    PrecisionOpened {
        questions: u8,
    },
    ChallengePresented(ChallengeKind),
    Resurrected {
        card: PowerCardId,
        kind: PowerCardType,
    },
}

/// Validate a use and settle its random choices.
pub(crate) fn plan(
    players: &PlayerMap<Player>,
    caster: PlayerId,
    card: PowerCardId,
    target: UseTarget,
    rng: &mut dyn RandomSource,
) -> Result<PowerPlan, EngineError> {
    let kind = can_use(players, caster, card, target)?;

    let plan = match kind {
        PowerCardType::Boost => PowerPlan::Boost,
        PowerCardType::Shield => PowerPlan::Shield,
        PowerCardType::Steal => {
            // can_use guarantees a valid player target.
            let victim_id = target.player().ok_or(PowerCardError::InvalidTarget)?;
            let victim = &players[victim_id];
            let steal = match victim.held_of_type(PowerCardType::Counter) {
                Some(counter) => StealPlan::Countered(counter.id),
                None => {
                    let held: Vec<PowerCardId> = victim.held_cards().map(|c| c.id).collect();
                    StealPlan::Take(held[rng.gen_index(held.len())])
                }
            };
            PowerPlan::Steal {
                target: victim_id,
                steal,
            }
        }
        PowerCardType::Precision => PowerPlan::Precision,
        PowerCardType::Challenge => {
            let challenge = ChallengeKind::ALL[rng.gen_index(ChallengeKind::ALL.len())];
            PowerPlan::Challenge { challenge }
        }
        PowerCardType::Resurrect => PowerPlan::Resurrect {
            card: resurrect_candidate(&players[caster], target)?,
        },
        PowerCardType::Counter => return Err(PowerCardError::PassiveCard.into()),
    };

    Ok(plan)
}

/// Commit a plan produced by [`plan`] against the same state.
///
/// Every card the plan names is checked before anything changes, so a plan
/// that went stale returns an error and leaves `players` untouched.
pub(crate) fn apply(
    players: &mut PlayerMap<Player>,
    caster: PlayerId,
    card: PowerCardId,
    plan: PowerPlan,
    now: u64,
) -> Result<PowerOutcome, EngineError> {
    let kind = verify(players, caster, card, plan)?;

    let used = players[caster].card_mut(card).ok_or(NotFound::Card(card))?;
    match kind.effect_kind() {
        EffectKind::Persistent => used.activate(),
        EffectKind::Instant => used.mark_used(now),
    }

    let outcome = match plan {
        PowerPlan::Boost => {
            players[caster].boost_active = true;
            PowerOutcome::BoostActivated
        }
        PowerPlan::Shield => {
            players[caster].is_immune = true;
            PowerOutcome::ShieldRaised
        }
        PowerPlan::Steal {
            target,
            steal: StealPlan::Countered(counter),
        } => {
            players[target]
                .card_mut(counter)
                .ok_or(NotFound::Card(counter))?
                .mark_used(now);
            PowerOutcome::Countered { by: target, counter }
        }
        PowerPlan::Steal {
            target,
            steal: StealPlan::Take(taken),
        } => {
            let instance = players[target]
                .take_card(taken)
                .ok_or(NotFound::Card(taken))?;
            let kind = instance.kind;
            players[caster].give_card(instance);
            PowerOutcome::Stole {
                from: target,
                card: taken,
                kind,
            }
        }
        PowerPlan::Precision => {
            players[caster].precision_open = true;
            PowerOutcome::PrecisionOpened {
                questions: PRECISION_MAX_QUESTIONS,
            }
        }
        PowerPlan::Challenge { challenge } => {
            players[caster].challenge = Some(challenge);
            PowerOutcome::ChallengePresented(challenge)
        }
        PowerPlan::Resurrect { card: revived } => {
            let instance = players[caster]
                .card_mut(revived)
                .ok_or(NotFound::Card(revived))?;
            instance.restore();
            PowerOutcome::Resurrected {
                card: revived,
                kind: instance.kind,
            }
        }
    };

    debug!(player = %caster, %card, ?outcome, "Power card resolved");
    Ok(outcome)
}

/// Read-only check that every card a plan touches is still where the plan
/// left it. Returns the kind of the card being used.
fn verify(
    players: &PlayerMap<Player>,
    caster: PlayerId,
    card: PowerCardId,
    plan: PowerPlan,
) -> Result<PowerCardType, EngineError> {
    let owner = players.get(caster).ok_or(NotFound::Player(caster))?;
    let instance = owner.card(card).ok_or(NotFound::Card(card))?;
    if !instance.is_held() {
        return Err(PowerCardError::CardExhausted.into());
    }

    match plan {
        PowerPlan::Steal { target, steal } => {
            let victim = players.get(target).ok_or(NotFound::Player(target))?;
            let (StealPlan::Take(id) | StealPlan::Countered(id)) = steal;
            if !victim.card(id).is_some_and(|c| c.is_held()) {
                return Err(NotFound::Card(id).into());
            }
        }
        PowerPlan::Resurrect { card: revived } => {
            if !owner.card(revived).is_some_and(|c| c.is_used()) {
                return Err(NotFound::Card(revived).into());
            }
        }
        PowerPlan::Boost | PowerPlan::Shield | PowerPlan::Precision | PowerPlan::Challenge { .. } => {}
    }

    Ok(instance.kind)
}

/// Spend an active BOOST after its holder scored. Returns the spent card.
pub fn consume_boost(player: &mut Player, now: u64) -> Option<PowerCardId> {
    if !player.boost_active {
        return None;
    }
    player.boost_active = false;
    let card = player.active_of_type_mut(PowerCardType::Boost)?;
    card.mark_used(now);
    Some(card.id)
}

/// Drop an active SHIELD at the end of the round it covered.
pub fn expire_shield(player: &mut Player, now: u64) -> Option<PowerCardId> {
    if !player.is_immune {
        return None;
    }
    player.is_immune = false;
    let card = player.active_of_type_mut(PowerCardType::Shield)?;
    card.mark_used(now);
    Some(card.id)
}

/// Close an open PRECISION sub-round with the number of correct answers.
///
/// Each correct answer is worth 1 point, capped at 3. Returns the bonus.
pub fn close_precision(player: &mut Player, correct: u8) -> Result<u8, PowerCardError> {
    if !player.precision_open {
        return Err(PowerCardError::NoPendingEffect);
    }
    let bonus = correct.min(PRECISION_MAX_QUESTIONS);
    player.precision_open = false;
    player.precision_bonus = bonus;
    Ok(bonus)
}

/// Close an open CHALLENGE with the operator's verdict. Returns the bonus.
pub fn close_challenge(player: &mut Player, success: bool) -> Result<u32, PowerCardError> {
    if player.challenge.take().is_none() {
        return Err(PowerCardError::NoPendingEffect);
    }
    let bonus = if success { CHALLENGE_BONUS } else { 0 };
    player.challenge_bonus = bonus;
    Ok(bonus)
}
