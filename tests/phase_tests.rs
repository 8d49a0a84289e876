//! Phase machine integration tests.
//!
//! The machine is total: every (phase, event) pair either moves along the
//! round lifecycle or is ignored without side effects.

use proptest::prelude::*;
use trivia_engine::round::{Phase, PhaseEvent, PhaseMachine, Transition};

const EVENTS: [PhaseEvent; 8] = [
    PhaseEvent::RequestNextRound,
    PhaseEvent::RoundLoaded,
    PhaseEvent::LoadFailed,
    PhaseEvent::EndBetting,
    PhaseEvent::AudioFinished,
    PhaseEvent::RevealAnswer,
    PhaseEvent::PrepareNextRound,
    PhaseEvent::Reset,
];

/// Drive a machine through one full round from idle.
fn play_round(machine: &mut PhaseMachine) {
    machine.handle(PhaseEvent::RequestNextRound);
    machine.handle(PhaseEvent::RoundLoaded);
    machine.handle(PhaseEvent::EndBetting);
    machine.handle(PhaseEvent::AudioFinished);
    machine.handle(PhaseEvent::RevealAnswer);
}

/// Test the happy path of the first two rounds.
#[test]
fn test_two_round_lifecycle() {
    let mut machine = PhaseMachine::new();

    play_round(&mut machine);
    assert_eq!(machine.phase(), Phase::Answer);
    assert_eq!(machine.round_number(), 1);

    // Round 2 may start straight from the answer phase.
    assert!(machine.can_start_next_round());
    machine.handle(PhaseEvent::RequestNextRound);
    assert_eq!(
        machine.handle(PhaseEvent::RoundLoaded),
        Transition::Moved {
            from: Phase::Loading,
            to: Phase::Betting,
        }
    );
    assert_eq!(machine.round_number(), 2);
}

/// Test that only the defined events move each phase.
#[test]
fn test_defined_events_per_phase() {
    let defined = [
        (Phase::Idle, vec![PhaseEvent::RequestNextRound]),
        (
            Phase::Loading,
            vec![PhaseEvent::RoundLoaded, PhaseEvent::LoadFailed, PhaseEvent::Reset],
        ),
        (Phase::Betting, vec![PhaseEvent::EndBetting, PhaseEvent::Reset]),
        (Phase::Audio, vec![PhaseEvent::AudioFinished, PhaseEvent::Reset]),
        (Phase::Question, vec![PhaseEvent::RevealAnswer, PhaseEvent::Reset]),
        (
            Phase::Answer,
            vec![
                PhaseEvent::RequestNextRound,
                PhaseEvent::PrepareNextRound,
                PhaseEvent::Reset,
            ],
        ),
    ];

    // Reach each phase on round 2 so loading leads to betting.
    let reach = |target: Phase| -> PhaseMachine {
        let mut machine = PhaseMachine::new();
        play_round(&mut machine);
        machine.handle(PhaseEvent::PrepareNextRound);
        let path = [
            PhaseEvent::RequestNextRound,
            PhaseEvent::RoundLoaded,
            PhaseEvent::EndBetting,
            PhaseEvent::AudioFinished,
            PhaseEvent::RevealAnswer,
        ];
        for event in path {
            if machine.phase() == target {
                break;
            }
            machine.handle(event);
        }
        assert_eq!(machine.phase(), target);
        machine
    };

    for (phase, events) in defined {
        for event in EVENTS {
            let mut machine = reach(phase);
            let transition = machine.handle(event);
            assert_eq!(
                transition.is_moved(),
                events.contains(&event),
                "{event} in {phase}"
            );
            if !transition.is_moved() {
                assert_eq!(transition, Transition::Ignored { event, phase });
                assert_eq!(machine.phase(), phase);
            }
        }
    }
}

/// Test that a failed load returns to idle without counting a round.
#[test]
fn test_load_failed() {
    let mut machine = PhaseMachine::new();
    machine.handle(PhaseEvent::RequestNextRound);
    machine.handle(PhaseEvent::LoadFailed);

    assert_eq!(machine.phase(), Phase::Idle);
    assert_eq!(machine.round_number(), 0);
}

/// Test that next_phase predicts without applying.
#[test]
fn test_next_phase_is_pure() {
    let machine = PhaseMachine::new();
    assert_eq!(machine.next_phase(PhaseEvent::RequestNextRound), Some(Phase::Loading));
    assert_eq!(machine.next_phase(PhaseEvent::RevealAnswer), None);
    assert_eq!(machine.phase(), Phase::Idle);
}

proptest! {
    /// Any event sequence keeps the round counter monotonic, and betting
    /// is only ever entered from round 2 on.
    #[test]
    fn prop_event_sequences(indices in prop::collection::vec(0..EVENTS.len(), 0..64)) {
        let mut machine = PhaseMachine::new();
        let mut last_round = 0;

        for i in indices {
            let transition = machine.handle(EVENTS[i]);
            prop_assert!(machine.round_number() >= last_round);
            prop_assert!(machine.round_number() <= last_round + 1);
            last_round = machine.round_number();

            if let Transition::Moved { to: Phase::Betting, .. } = transition {
                prop_assert!(machine.round_number() >= 2);
            }
            if let Transition::Moved { to: Phase::Audio, from: Phase::Loading } = transition {
                prop_assert_eq!(machine.round_number(), 1);
            }
        }
    }
}
