//! Game mode integration tests.
//!
//! All modes share the phase machine; these tests check each mode's
//! resolution rule and that bets, boosts and forfeits apply uniformly.

use trivia_engine::cards::{PowerCardType, QuestionKind, RoundCard, TrackInfo};
use trivia_engine::core::config::MAX_BASE_POINTS;
use trivia_engine::core::{
    EngineError, GameMode, PlayerId, RandomSource, SessionConfig, ValidationError,
};
use trivia_engine::effects::UseTarget;
use trivia_engine::round::Phase;
use trivia_engine::scoring::BetScoring;
use trivia_engine::session::{Resolution, Session};

struct NoAwards;

impl RandomSource for NoAwards {
    fn gen_bool(&mut self, _probability: f64) -> bool {
        false
    }

    fn gen_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn session(config: SessionConfig) -> Session {
    let cards = (0..4).map(|i| {
        RoundCard::new(
            QuestionKind::Decade,
            "Which decade?",
            "1980s",
            TrackInfo::new(format!("Track {i}"), "Band"),
        )
    });
    Session::builder(config)
        .players(["Ana", "Ben", "Cy"])
        .cards(cards)
        .rng(NoAwards)
        .build()
        .unwrap()
}

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

/// Bring the session to the question phase of the next round.
fn to_question(session: &mut Session) {
    session.request_next_round().unwrap();
    session.end_betting();
    session.signal_audio_finished();
    assert_eq!(session.phase(), Phase::Question);
}

/// Test that a battle pays the winning contender.
#[test]
fn test_battle_winner() {
    let mut session = session(SessionConfig::default().with_mode(GameMode::Battle));
    to_question(&mut session);

    let result = session
        .resolve_round(Resolution::Battle {
            contenders: [p(0), p(1)],
            winner: Some(p(1)),
        })
        .unwrap();

    assert_eq!(result.winners, vec![p(1)]);
    assert_eq!(session.player(p(1)).unwrap().score, 1);
    assert_eq!(session.player(p(0)).unwrap().score, 0);
}

/// Test that a battle winner outside the contenders is refused without change.
#[test]
fn test_battle_outsider_rejected() {
    let mut session = session(SessionConfig::default().with_mode(GameMode::Battle));
    to_question(&mut session);

    let err = session
        .resolve_round(Resolution::Battle {
            contenders: [p(0), p(1)],
            winner: Some(p(2)),
        })
        .unwrap_err();

    assert_eq!(err, EngineError::from(ValidationError::NotAContender));
    assert_eq!(session.phase(), Phase::Question);
    assert!(session.players().all(|player| player.score == 0));
}

/// Test that speed rounds pay per correct answer and forfeit losing bets.
#[test]
fn test_speed_round() {
    let mut session = session(SessionConfig::default().with_mode(GameMode::Speed));
    to_question(&mut session);
    session
        .resolve_round(Resolution::Speed { correct: vec![] })
        .unwrap();

    session.request_next_round().unwrap();
    session.place_bet(p(0), 1).unwrap();
    session.place_bet(p(2), 2).unwrap();
    session.end_betting();
    session.signal_audio_finished();

    let result = session
        .resolve_round(Resolution::Speed {
            correct: vec![(p(0), 3), (p(1), 1), (p(2), 0)],
        })
        .unwrap();

    // (3 + 1) × 1
    assert_eq!(result.points_for(p(0)), 4);
    assert_eq!(result.points_for(p(1)), 1);
    assert_eq!(result.forfeits, vec![(p(2), 2)]);
    assert_eq!(session.player(p(2)).unwrap().tokens, 0);
    assert_eq!(session.pot(), 2);
}

/// Test that viral winners earn triple base points, boosted where active.
#[test]
fn test_viral_round() {
    let mut session = session(SessionConfig::default().with_mode(GameMode::Viral));
    let boost = session.grant_power_card(p(0), PowerCardType::Boost).unwrap();
    session.use_power_card(p(0), boost.id, UseTarget::None).unwrap();
    to_question(&mut session);

    let result = session
        .resolve_round(Resolution::Viral {
            succeeded: vec![p(2), p(0)],
        })
        .unwrap();

    assert_eq!(result.winners, vec![p(0), p(2)]);
    assert_eq!(result.points_for(p(0)), 6);
    assert_eq!(result.points_for(p(2)), 3);
    assert_eq!(result.points_for(p(1)), 0);
}

/// Test that a card worth more than the base-point limit is refused before
/// the round loads, and play continues with the next card.
#[test]
fn test_oversized_base_points_rejected() {
    let card = |title: &str, points: u32| {
        RoundCard::new(QuestionKind::Title, "Name the song", title, TrackInfo::new(title, "Band"))
            .with_base_points(points)
    };
    let mut session = Session::builder(SessionConfig::default().with_mode(GameMode::Viral))
        .players(["Ana", "Ben"])
        .cards([
            card("Huge", u32::MAX / 2),
            card("Fine", 1),
            card("Huge Again", MAX_BASE_POINTS + 1),
            card("Last", MAX_BASE_POINTS),
        ])
        .rng(NoAwards)
        .build()
        .unwrap();

    let oversized = EngineError::from(ValidationError::BasePointsOutOfRange {
        points: u32::MAX / 2,
        max: MAX_BASE_POINTS,
    });
    assert_eq!(session.request_next_round().unwrap_err(), oversized);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.round_number(), 0);
    assert!(session.is_active());

    let started = session.request_next_round().unwrap();
    assert_eq!(started.round, 1);
    assert_eq!(started.card.answer, "Fine");
    session.signal_audio_finished();
    let result = session
        .resolve_round(Resolution::Viral {
            succeeded: vec![p(0)],
        })
        .unwrap();
    assert_eq!(result.points_for(p(0)), 3);
    assert_eq!(session.phase(), Phase::Answer);

    assert!(matches!(
        session.request_next_round(),
        Err(EngineError::Validation(ValidationError::BasePointsOutOfRange { .. }))
    ));
    assert_eq!(session.phase(), Phase::Answer);
    assert_eq!(session.round_number(), 1);
    assert!(session.current_round().is_some());

    let started = session.request_next_round().unwrap();
    assert_eq!(started.round, 2);
    assert_eq!(started.card.base_points, MAX_BASE_POINTS);
}

/// Test the multiplier scoring rule end to end.
#[test]
fn test_multiplier_scoring() {
    let config = SessionConfig::default()
        .with_bet_scoring(BetScoring::Multiplier)
        .with_starting_tokens(3);
    let mut session = session(config);
    to_question(&mut session);
    session.reveal_answer(None).unwrap();

    session.request_next_round().unwrap();
    session.place_bet(p(1), 3).unwrap();
    session.end_betting();
    session.signal_audio_finished();
    let result = session.reveal_answer(Some(p(1))).unwrap();

    // 1 × multiplier(3)
    assert_eq!(result.points_for(p(1)), 4);
}
