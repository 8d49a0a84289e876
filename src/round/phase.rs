//! Round phase state machine.
//!
//! ```text
//!            RequestNextRound           RoundLoaded (round 1)
//!   Idle ───────────────────► Loading ───────────────────────► Audio
//!    ▲                          │   RoundLoaded (round ≥ 2)       ▲
//!    │ PrepareNextRound         └──────────────► Betting ─────────┘
//!    │                                             EndBetting     │ AudioFinished
//!  Answer ◄───────────────── Question ◄───────────────────────────┘
//!           RevealAnswer
//! ```
//!
//! Every transition is total: an event that the current phase does not
//! define is ignored and reported as [`Transition::Ignored`]. Duplicate
//! signals from the UI are therefore harmless.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sub-state of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting for the next round's content.
    Loading,
    Betting,
    Audio,
    Question,
    Answer,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Betting => "betting",
            Phase::Audio => "audio",
            Phase::Question => "question",
            Phase::Answer => "answer",
        };
        f.write_str(name)
    }
}

/// Input to the phase machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    RequestNextRound,
    /// Content for the next round arrived.
    RoundLoaded,
    /// Content could not be loaded.
    LoadFailed,
    /// Explicit close, timer expiry, or all bets in.
    EndBetting,
    AudioFinished,
    RevealAnswer,
    PrepareNextRound,
    /// Abandon whatever is in flight.
    Reset,
}

impl std::fmt::Display for PhaseEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseEvent::RequestNextRound => "request-next-round",
            PhaseEvent::RoundLoaded => "round-loaded",
            PhaseEvent::LoadFailed => "load-failed",
            PhaseEvent::EndBetting => "end-betting",
            PhaseEvent::AudioFinished => "audio-finished",
            PhaseEvent::RevealAnswer => "reveal-answer",
            PhaseEvent::PrepareNextRound => "prepare-next-round",
            PhaseEvent::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Outcome of delivering an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Moved { from: Phase, to: Phase },
    Ignored { event: PhaseEvent, phase: Phase },
}

impl Transition {
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }

    /// Phase after the event.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match *self {
            Transition::Moved { to, .. } => to,
            Transition::Ignored { phase, .. } => phase,
        }
    }
}

/// Phase state plus the round counter.
///
/// ```
/// use trivia_engine::round::{Phase, PhaseEvent, PhaseMachine};
///
/// let mut machine = PhaseMachine::new();
/// machine.handle(PhaseEvent::RequestNextRound);
/// machine.handle(PhaseEvent::RoundLoaded);
///
/// // Round 1 skips betting.
/// assert_eq!(machine.phase(), Phase::Audio);
/// assert_eq!(machine.round_number(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: Phase,
    round_number: u32,
}

impl PhaseMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of the current (or last) round; 0 before the first.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// A new round may be requested from `idle` or `answer` only.
    #[must_use]
    pub fn can_start_next_round(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Answer)
    }

    /// Phase the event would lead to, without applying it.
    #[must_use]
    pub fn next_phase(&self, event: PhaseEvent) -> Option<Phase> {
        use Phase::*;
        use PhaseEvent::*;

        match (self.phase, event) {
            (Idle | Answer, RequestNextRound) => Some(Loading),
            (Loading, RoundLoaded) if self.round_number == 0 => Some(Audio),
            (Loading, RoundLoaded) => Some(Betting),
            (Loading, LoadFailed) => Some(Idle),
            (Betting, EndBetting) => Some(Audio),
            (Audio, AudioFinished) => Some(Question),
            (Question, RevealAnswer) => Some(Answer),
            (Answer, PrepareNextRound) => Some(Idle),
            (Idle, Reset) => None,
            (_, Reset) => Some(Idle),
            _ => None,
        }
    }

    /// Deliver an event.
    pub fn handle(&mut self, event: PhaseEvent) -> Transition {
        let from = self.phase;
        let Some(to) = self.next_phase(event) else {
            debug!(%event, phase = %from, "Event ignored");
            return Transition::Ignored { event, phase: from };
        };

        if event == PhaseEvent::RoundLoaded {
            self.round_number += 1;
        }
        self.phase = to;
        debug!(round = self.round_number, %from, %to, "Transition");
        Transition::Moved { from, to }
    }
}
