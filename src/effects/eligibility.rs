//! Whether a player may use a power card right now.
//!
//! Checks read state only. A failed check names the violated precondition
//! and the caller surfaces it to the acting player.

use crate::cards::{PowerCardId, PowerCardInstance, PowerCardType};
use crate::core::{EngineError, NotFound, Player, PlayerId, PlayerMap, PowerCardError};

use super::targeting::UseTarget;

/// Validate a use of `card` by `caster` against `target`.
///
/// Returns the card's type on success.
pub fn can_use(
    players: &PlayerMap<Player>,
    caster: PlayerId,
    card: PowerCardId,
    target: UseTarget,
) -> Result<PowerCardType, EngineError> {
    let player = players.get(caster).ok_or(NotFound::Player(caster))?;
    let instance = player.card(card).ok_or(NotFound::Card(card))?;

    if !instance.is_held() {
        return Err(PowerCardError::CardExhausted.into());
    }

    match instance.kind {
        PowerCardType::Boost => {
            if player.boost_active {
                return Err(PowerCardError::DuplicateEffect.into());
            }
        }
        PowerCardType::Shield => {
            if player.is_immune {
                return Err(PowerCardError::DuplicateEffect.into());
            }
        }
        PowerCardType::Counter => return Err(PowerCardError::PassiveCard.into()),
        PowerCardType::Steal => check_steal_target(players, caster, target)?,
        PowerCardType::Precision => {
            if player.precision_open || player.precision_bonus > 0 {
                return Err(PowerCardError::DuplicateEffect.into());
            }
        }
        PowerCardType::Challenge => {
            if player.challenge.is_some() || player.challenge_bonus > 0 {
                return Err(PowerCardError::DuplicateEffect.into());
            }
        }
        PowerCardType::Resurrect => {
            resurrect_candidate(player, target)?;
        }
    }

    Ok(instance.kind)
}

fn check_steal_target(
    players: &PlayerMap<Player>,
    caster: PlayerId,
    target: UseTarget,
) -> Result<(), EngineError> {
    let victim_id = target.player().ok_or(PowerCardError::InvalidTarget)?;
    if victim_id == caster {
        return Err(PowerCardError::InvalidTarget.into());
    }
    let victim = players.get(victim_id).ok_or(NotFound::Player(victim_id))?;
    if victim.is_immune {
        return Err(PowerCardError::TargetShielded.into());
    }
    if victim.held_cards().next().is_none() {
        return Err(PowerCardError::NoEligibleCard.into());
    }
    Ok(())
}

/// Card a RESURRECT would bring back.
///
/// An explicit `Card` target must be one of the player's used, non-RESURRECT
/// cards. Without a target the most recently used such card is picked.
pub(crate) fn resurrect_candidate(
    player: &Player,
    target: UseTarget,
) -> Result<PowerCardId, EngineError> {
    match target {
        UseTarget::Card(id) => {
            let card = player.card(id).ok_or(NotFound::Card(id))?;
            if is_resurrectable(card) {
                Ok(id)
            } else {
                Err(PowerCardError::InvalidTarget.into())
            }
        }
        UseTarget::None => player
            .power_cards
            .iter()
            .filter(|c| is_resurrectable(c))
            .max_by_key(|c| c.used_at())
            .map(|c| c.id)
            .ok_or_else(|| PowerCardError::NoEligibleCard.into()),
        UseTarget::Player(_) => Err(PowerCardError::InvalidTarget.into()),
    }
}

fn is_resurrectable(card: &PowerCardInstance) -> bool {
    card.is_used() && card.kind != PowerCardType::Resurrect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardState;

    fn roster() -> PlayerMap<Player> {
        PlayerMap::new(3, |id| Player::new(id, format!("P{}", id.0), 2))
    }

    fn give(players: &mut PlayerMap<Player>, owner: u8, id: u32, kind: PowerCardType) {
        let owner = PlayerId::new(owner);
        players[owner].give_card(PowerCardInstance::new(PowerCardId::new(id), kind, owner));
    }

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn c(id: u32) -> PowerCardId {
        PowerCardId::new(id)
    }

    #[test]
    fn test_unknown_player_and_card() {
        let players = roster();
        assert_eq!(
            can_use(&players, p(7), c(1), UseTarget::None),
            Err(EngineError::from(NotFound::Player(p(7))))
        );
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(NotFound::Card(c(1))))
        );
    }

    #[test]
    fn test_used_card_exhausted() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Boost);
        players[p(0)].card_mut(c(1)).unwrap().mark_used(5);

        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::CardExhausted))
        );
    }

    #[test]
    fn test_boost_does_not_stack() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Boost);
        assert_eq!(can_use(&players, p(0), c(1), UseTarget::None), Ok(PowerCardType::Boost));

        players[p(0)].boost_active = true;
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::DuplicateEffect))
        );
    }

    #[test]
    fn test_shield_does_not_stack() {
        let mut players = roster();
        give(&mut players, 1, 1, PowerCardType::Shield);
        players[p(1)].is_immune = true;
        assert_eq!(
            can_use(&players, p(1), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::DuplicateEffect))
        );
    }

    #[test]
    fn test_counter_is_passive() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Counter);
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::PassiveCard))
        );
    }

    #[test]
    fn test_steal_targets() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Steal);

        // No target, self target.
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::InvalidTarget))
        );
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Player(p(0))),
            Err(EngineError::from(PowerCardError::InvalidTarget))
        );

        // Target holds nothing.
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Player(p(1))),
            Err(EngineError::from(PowerCardError::NoEligibleCard))
        );

        give(&mut players, 1, 2, PowerCardType::Boost);
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Player(p(1))),
            Ok(PowerCardType::Steal)
        );

        players[p(1)].is_immune = true;
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Player(p(1))),
            Err(EngineError::from(PowerCardError::TargetShielded))
        );
    }

    #[test]
    fn test_steal_ignores_active_and_used_cards() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Steal);
        give(&mut players, 1, 2, PowerCardType::Boost);
        give(&mut players, 1, 3, PowerCardType::Precision);
        players[p(1)].card_mut(c(2)).unwrap().state = CardState::Active;
        players[p(1)].card_mut(c(3)).unwrap().mark_used(1);

        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Player(p(1))),
            Err(EngineError::from(PowerCardError::NoEligibleCard))
        );
    }

    #[test]
    fn test_resurrect_needs_used_card() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Resurrect);
        give(&mut players, 0, 2, PowerCardType::Steal);

        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::NoEligibleCard))
        );
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::Card(c(2))),
            Err(EngineError::from(PowerCardError::InvalidTarget))
        );

        players[p(0)].card_mut(c(2)).unwrap().mark_used(3);
        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Ok(PowerCardType::Resurrect)
        );
    }

    #[test]
    fn test_resurrect_skips_used_resurrect() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Resurrect);
        give(&mut players, 0, 2, PowerCardType::Resurrect);
        players[p(0)].card_mut(c(2)).unwrap().mark_used(3);

        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::NoEligibleCard))
        );
    }

    #[test]
    fn test_resurrect_picks_most_recent() {
        let mut players = roster();
        give(&mut players, 0, 2, PowerCardType::Steal);
        give(&mut players, 0, 3, PowerCardType::Boost);
        players[p(0)].card_mut(c(2)).unwrap().mark_used(50);
        players[p(0)].card_mut(c(3)).unwrap().mark_used(20);

        assert_eq!(resurrect_candidate(&players[p(0)], UseTarget::None), Ok(c(2)));
    }

    #[test]
    fn test_pending_sub_rounds_block_reuse() {
        let mut players = roster();
        give(&mut players, 0, 1, PowerCardType::Precision);
        give(&mut players, 0, 2, PowerCardType::Challenge);
        players[p(0)].precision_bonus = 2;
        players[p(0)].challenge = Some(crate::cards::ChallengeKind::Singing);

        assert_eq!(
            can_use(&players, p(0), c(1), UseTarget::None),
            Err(EngineError::from(PowerCardError::DuplicateEffect))
        );
        assert_eq!(
            can_use(&players, p(0), c(2), UseTarget::None),
            Err(EngineError::from(PowerCardError::DuplicateEffect))
        );
    }
}
