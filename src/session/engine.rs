//! The session orchestrator.
//!
//! `Session` is the single owner of the roster, the current round, the pot
//! and the card supply. Every mutating operation validates fully before it
//! changes anything, then commits all derived effects (token deduction,
//! score, effect flags, history) before returning. Hosts serialize calls;
//! the session holds no locks and no timers.

use im::Vector;
use tracing::{info, warn};

use crate::betting::{self, GamePot};
use crate::cards::{CardSupply, Difficulty, PowerCardId, PowerCardInstance, PowerCardType, TrackInfo};
use crate::core::config::MAX_BASE_POINTS;
use crate::core::{
    Clock, EngineError, EventRecord, NotFound, Player, PlayerId, PlayerMap, RandomSource,
    SessionConfig, SessionEvent, ValidationError,
};
use crate::effects::{self, PowerOutcome, UseTarget};
use crate::round::{Phase, PhaseEvent, PhaseMachine, Round, Transition};
use crate::scoring::ScoreInput;

use super::builder::SessionBuilder;
use super::outcome::{BetReceipt, GameResult, PlayerAward, RoundStarted, ScoringResult};
use super::provider::{AudioDurationSource, ContentProvider, ContentRequest};
use super::resolution::Resolution;

/// Injected collaborators.
pub(super) struct Collaborators {
    pub provider: Box<dyn ContentProvider + Send>,
    pub audio: Option<Box<dyn AudioDurationSource + Send>>,
    pub rng: Box<dyn RandomSource + Send>,
    pub clock: Box<dyn Clock + Send>,
}

/// One game: roster, rounds, pot, power card supply and history.
pub struct Session {
    config: SessionConfig,
    players: PlayerMap<Player>,
    machine: PhaseMachine,
    round: Option<Round>,
    turn: PlayerId,
    pot: GamePot,
    supply: CardSupply,
    result: Option<GameResult>,
    last_resolution: Option<ScoringResult>,
    history: Vector<EventRecord>,
    next_card_id: u32,
    collaborators: Collaborators,
}

impl Session {
    /// Start building a session.
    #[must_use]
    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    pub(super) fn from_parts(
        config: SessionConfig,
        names: Vec<String>,
        collaborators: Collaborators,
    ) -> Self {
        let starting_tokens = config.starting_tokens;
        let players = PlayerMap::new(names.len(), |id| {
            Player::new(id, names[id.index()].clone(), starting_tokens)
        });

        info!(players = names.len(), mode = %config.mode, target = config.target_score, "Session created");

        Self {
            config,
            players,
            machine: PhaseMachine::new(),
            round: None,
            turn: PlayerId::new(0),
            pot: GamePot::new(),
            supply: CardSupply::new(),
            result: None,
            last_resolution: None,
            history: Vector::new(),
            next_card_id: 1,
            collaborators,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Number of the current (or last) round; 0 before the first.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.machine.round_number()
    }

    /// Round in progress, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.machine.is_loading()
    }

    /// A new round may be requested now.
    #[must_use]
    pub fn can_start_next_round(&self) -> bool {
        self.is_active() && self.machine.can_start_next_round()
    }

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        Ok(self.players.get(id).ok_or(NotFound::Player(id))?)
    }

    /// All players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.turn
    }

    /// Tokens collected from forfeited bets.
    #[must_use]
    pub fn pot(&self) -> u32 {
        self.pot.total()
    }

    #[must_use]
    pub fn supply(&self) -> &CardSupply {
        &self.supply
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.result.is_none()
    }

    /// Final result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Most recent round resolution, while its round is in the answer phase.
    #[must_use]
    pub fn last_resolution(&self) -> Option<&ScoringResult> {
        self.last_resolution.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    // === Round flow ===

    /// Load the next round and open its first phase.
    ///
    /// Allowed from `idle` or `answer`. Round 1 goes straight to `audio`;
    /// later rounds open `betting`. When the provider has no more content
    /// the game ends and `ContentExhausted` is returned.
    pub fn request_next_round(&mut self) -> Result<RoundStarted, EngineError> {
        self.ensure_active()?;
        if !self.machine.can_start_next_round() {
            return Err(EngineError::InvalidPhaseTransition {
                event: PhaseEvent::RequestNextRound,
                phase: self.phase(),
            });
        }

        let request = ContentRequest {
            round: self.machine.round_number() + 1,
            mode: self.config.mode,
            turn: self.turn,
            leading_score: self.players.values().map(|p| p.score).max().unwrap_or(0),
        };
        let card = self.collaborators.provider.next_card(&request);
        if let Some(card) = &card {
            if card.base_points > MAX_BASE_POINTS {
                warn!(round = request.round, points = card.base_points, "Round card rejected");
                return Err(ValidationError::BasePointsOutOfRange {
                    points: card.base_points,
                    max: MAX_BASE_POINTS,
                }
                .into());
            }
        }

        if self.phase() == Phase::Answer {
            self.prepare_next_round();
        }
        self.transition(PhaseEvent::RequestNextRound);
        self.clear_bets();

        let Some(card) = card else {
            self.transition(PhaseEvent::LoadFailed);
            warn!(round = request.round, "Content exhausted");
            self.end_game();
            return Err(EngineError::ContentExhausted);
        };

        let audio_duration = self
            .collaborators
            .audio
            .as_ref()
            .and_then(|source| source.duration_for(&card));
        let phase = self.transition(PhaseEvent::RoundLoaded).phase();
        let number = self.machine.round_number();

        let mut round = Round::new(number, card, self.config.mode);
        round.audio_duration = audio_duration;
        debug_assert_eq!(round.offers_betting(), phase == Phase::Betting);

        let started = RoundStarted {
            round: number,
            card: round.card.clone(),
            phase,
            audio_duration,
        };
        self.round = Some(round);
        self.record(SessionEvent::RoundStarted {
            round: number,
            betting: started.betting_open(),
        });
        info!(round = number, %phase, turn = %self.turn, "Round started");
        Ok(started)
    }

    /// Close betting (explicit close or host timer). No-op outside `betting`.
    pub fn end_betting(&mut self) -> Transition {
        self.transition(PhaseEvent::EndBetting)
    }

    /// Audio preview finished. No-op outside `audio`.
    pub fn signal_audio_finished(&mut self) -> Transition {
        self.transition(PhaseEvent::AudioFinished)
    }

    /// Reveal a normal round's answer with its winner, or `None`.
    pub fn reveal_answer(&mut self, winner: Option<PlayerId>) -> Result<ScoringResult, EngineError> {
        self.resolve_round(Resolution::Single(winner))
    }

    /// Resolve the round in the question phase.
    ///
    /// Pays base points to the credited players through the scoring rule,
    /// forfeits losing bets into the pot, pays pending bonuses, spends
    /// boosts and shields, rolls power card awards, advances the turn and
    /// checks the win condition, all in this one call.
    ///
    /// Calling again while the round sits in `answer` returns the same
    /// result without changing anything.
    pub fn resolve_round(&mut self, resolution: Resolution) -> Result<ScoringResult, EngineError> {
        if self.phase() == Phase::Answer {
            if let Some(previous) = &self.last_resolution {
                return Ok(previous.clone());
            }
        }
        self.ensure_active()?;

        let not_applicable = EngineError::InvalidPhaseTransition {
            event: PhaseEvent::RevealAnswer,
            phase: self.phase(),
        };
        if self.phase() != Phase::Question {
            return Err(not_applicable);
        }
        let Some(round) = self.round.as_ref() else {
            return Err(not_applicable);
        };
        if resolution.mode() != self.config.mode {
            return Err(ValidationError::ResolutionMismatch {
                mode: self.config.mode,
            }
            .into());
        }
        let credited = resolution.base_points(&self.players, &round.card)?;
        let round_number = round.number;
        let difficulty = round.card.difficulty;

        // Validation done; commit.
        let now = self.collaborators.clock.now_millis();
        let rule = self.config.bet_scoring;
        let max_tokens = self.config.max_tokens;
        let tokens_per_win = self.config.tokens_per_win;

        let mut awards = Vec::new();
        let mut forfeits = Vec::new();
        let mut events = Vec::new();

        for player in self.players.values_mut() {
            let base = credited
                .iter()
                .find(|(id, _)| *id == player.id)
                .map(|&(_, base)| base);

            match base {
                Some(base) => {
                    let input = ScoreInput {
                        base_points: base,
                        bet: player.current_bet,
                        boost: player.boost_active,
                        precision_bonus: player.precision_bonus,
                        challenge_bonus: player.challenge_bonus,
                    };
                    let points = rule.points(&input);
                    player.score = player.score.saturating_add(points);
                    awards.push(PlayerAward {
                        player: player.id,
                        input,
                        points,
                    });
                    events.push(SessionEvent::PointsAwarded {
                        player: player.id,
                        points,
                    });

                    if base > 0 {
                        if let Some(card) = effects::consume_boost(player, now) {
                            events.push(SessionEvent::CardExpired {
                                player: player.id,
                                card,
                                kind: PowerCardType::Boost,
                            });
                        }
                    }

                    let earned = tokens_per_win.min(max_tokens.saturating_sub(player.tokens));
                    if earned > 0 {
                        player.tokens += earned;
                        events.push(SessionEvent::TokensEarned {
                            player: player.id,
                            tokens: earned,
                        });
                    }
                }
                None => {
                    if player.has_bet() {
                        let amount = betting::forfeit(player);
                        forfeits.push((player.id, amount));
                        events.push(SessionEvent::BetForfeited {
                            player: player.id,
                            amount,
                        });
                    }
                    if player.has_pending_bonus() {
                        let input = ScoreInput::new(0)
                            .with_precision(player.precision_bonus)
                            .with_challenge(player.challenge_bonus);
                        let points = rule.points(&input);
                        player.score = player.score.saturating_add(points);
                        awards.push(PlayerAward {
                            player: player.id,
                            input,
                            points,
                        });
                        events.push(SessionEvent::PointsAwarded {
                            player: player.id,
                            points,
                        });
                    }
                }
            }

            player.precision_bonus = 0;
            player.challenge_bonus = 0;
            if let Some(card) = effects::expire_shield(player, now) {
                events.push(SessionEvent::CardExpired {
                    player: player.id,
                    card,
                    kind: PowerCardType::Shield,
                });
            }
            assert!(
                player.tokens <= max_tokens,
                "{} holds {} tokens above the cap",
                player.id,
                player.tokens
            );
        }

        let forfeited: u32 = forfeits.iter().map(|&(_, amount)| u32::from(amount)).sum();
        self.pot.collect(forfeited);
        betting::clear_bets(&mut self.players);
        for event in events {
            self.record(event);
        }

        let mut cards_awarded = Vec::new();
        for &(player, base) in &credited {
            if base == 0 {
                continue;
            }
            if let Some(card) = self.roll_award_for(player, difficulty) {
                cards_awarded.push(card);
            }
        }

        self.advance_turn();
        self.transition(PhaseEvent::RevealAnswer);

        let target = self.config.target_score;
        let game_result = if self.players.values().any(|p| p.score >= target) {
            Some(self.end_game())
        } else {
            None
        };

        let result = ScoringResult {
            round: round_number,
            winners: credited.iter().map(|&(id, _)| id).collect(),
            awards,
            forfeits,
            pot: self.pot.total(),
            cards_awarded,
            next_turn: self.turn,
            game_result,
        };
        info!(
            round = round_number,
            winners = ?result.winners,
            pot = result.pot,
            next_turn = %result.next_turn,
            "Round resolved"
        );
        self.last_resolution = Some(result.clone());
        Ok(result)
    }

    /// Leave the answer phase, clearing per-round state. No-op elsewhere.
    pub fn prepare_next_round(&mut self) -> Transition {
        let transition = self.transition(PhaseEvent::PrepareNextRound);
        if transition.is_moved() {
            self.clear_bets();
            self.round = None;
            self.last_resolution = None;
        }
        transition
    }

    /// Abandon whatever phase is in flight and return to `idle`.
    ///
    /// Bets placed this round are dropped without forfeiture.
    pub fn reset(&mut self) -> Transition {
        let transition = self.transition(PhaseEvent::Reset);
        if let Transition::Moved { from, .. } = transition {
            self.clear_bets();
            if let Some(round) = self.round.take() {
                if from != Phase::Answer {
                    self.record(SessionEvent::RoundAbandoned {
                        round: round.number,
                    });
                }
            }
            self.last_resolution = None;
        }
        transition
    }

    /// The host's session timer ran out: the highest score wins.
    ///
    /// Idempotent; a game that has already ended keeps its result.
    pub fn signal_time_expired(&mut self) -> GameResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        self.reset();
        self.end_game()
    }

    // === Betting ===

    /// Place a bet of 1-3 tokens during the betting phase.
    pub fn place_bet(&mut self, player: PlayerId, amount: u8) -> Result<BetReceipt, EngineError> {
        self.ensure_active()?;
        let phase = self.phase();
        if phase != Phase::Betting {
            return Err(ValidationError::WrongPhase { phase }.into());
        }

        let bettor = self.players.get_mut(player).ok_or(NotFound::Player(player))?;
        if let Err(err) = betting::place_bet(bettor, amount) {
            warn!(%player, amount, %err, "Bet rejected");
            return Err(err.into());
        }
        self.record(SessionEvent::BetPlaced { player, amount });

        let betting_closed = self.config.auto_close_betting
            && betting::all_bets_placed(&self.players)
            && self.end_betting().is_moved();

        Ok(BetReceipt {
            player,
            amount,
            betting_closed,
        })
    }

    /// Reset every player's bet to 0. Idempotent.
    pub fn clear_bets(&mut self) {
        betting::clear_bets(&mut self.players);
    }

    // === Power cards ===

    /// Check whether a card use would be accepted, without using it.
    pub fn can_use_power_card(
        &self,
        player: PlayerId,
        card: PowerCardId,
        target: impl Into<UseTarget>,
    ) -> Result<PowerCardType, EngineError> {
        effects::can_use(&self.players, player, card, target.into())
    }

    /// Use a power card. On error nothing changes.
    pub fn use_power_card(
        &mut self,
        player: PlayerId,
        card: PowerCardId,
        target: impl Into<UseTarget>,
    ) -> Result<PowerOutcome, EngineError> {
        self.ensure_active()?;
        let target = target.into();

        let plan = match effects::plan(
            &self.players,
            player,
            card,
            target,
            self.collaborators.rng.as_mut(),
        ) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(%player, %card, ?target, %err, "Power card rejected");
                return Err(err);
            }
        };
        // plan() verified ownership.
        let kind = self.players[player]
            .card(card)
            .map(|c| c.kind)
            .ok_or(NotFound::Card(card))?;

        let now = self.collaborators.clock.now_millis();
        let outcome = effects::apply(&mut self.players, player, card, plan, now)?;

        self.record(SessionEvent::CardUsed { player, card, kind });
        match outcome {
            PowerOutcome::Stole { from, card: taken, .. } => {
                self.record(SessionEvent::CardStolen {
                    from,
                    to: player,
                    card: taken,
                });
            }
            PowerOutcome::Countered { by, counter } => {
                self.record(SessionEvent::StealCountered {
                    thief: player,
                    target: by,
                    counter,
                });
            }
            PowerOutcome::Resurrected { card: revived, .. } => {
                self.record(SessionEvent::CardResurrected {
                    player,
                    card: revived,
                });
            }
            PowerOutcome::ChallengePresented(challenge) => {
                self.record(SessionEvent::ChallengePresented { player, challenge });
            }
            PowerOutcome::BoostActivated
            | PowerOutcome::ShieldRaised
            | PowerOutcome::PrecisionOpened { .. } => {}
        }

        Ok(outcome)
    }

    /// Roll for a random power card at the given difficulty.
    pub fn award_random_power_card(
        &mut self,
        player: PlayerId,
        difficulty: Difficulty,
    ) -> Result<Option<PowerCardInstance>, EngineError> {
        self.ensure_active()?;
        self.player(player)?;
        Ok(self.roll_award_for(player, difficulty))
    }

    /// Give a player a specific card, e.g. a scanned physical card.
    pub fn grant_power_card(
        &mut self,
        player: PlayerId,
        kind: PowerCardType,
    ) -> Result<PowerCardInstance, EngineError> {
        self.ensure_active()?;
        self.player(player)?;
        effects::draw_specific(&mut self.supply, kind)?;
        Ok(self.issue_card(player, kind))
    }

    /// Grant the card named by a scanned code such as `POWER:STEAL`.
    pub fn scan_power_card(
        &mut self,
        player: PlayerId,
        code: &str,
    ) -> Result<PowerCardInstance, EngineError> {
        let kind: PowerCardType = code.parse().map_err(ValidationError::from)?;
        self.grant_power_card(player, kind)
    }

    /// Close a PRECISION sub-round. Returns the bonus (0-3) paid at the
    /// next resolution.
    pub fn record_precision_answers(
        &mut self,
        player: PlayerId,
        correct: u8,
    ) -> Result<u8, EngineError> {
        self.ensure_active()?;
        let target = self.players.get_mut(player).ok_or(NotFound::Player(player))?;
        let bonus = effects::close_precision(target, correct)?;
        if bonus > 0 {
            self.record(SessionEvent::BonusEarned {
                player,
                points: u32::from(bonus),
            });
        }
        Ok(bonus)
    }

    /// Report the operator's verdict on a CHALLENGE. Returns the bonus paid
    /// at the next resolution.
    pub fn complete_challenge(&mut self, player: PlayerId, success: bool) -> Result<u32, EngineError> {
        self.ensure_active()?;
        let target = self.players.get_mut(player).ok_or(NotFound::Player(player))?;
        let bonus = effects::close_challenge(target, success)?;
        if bonus > 0 {
            self.record(SessionEvent::BonusEarned {
                player,
                points: bonus,
            });
        }
        Ok(bonus)
    }

    /// Reveal the current track's metadata to a player, once per game.
    pub fn peek(&mut self, player: PlayerId) -> Result<TrackInfo, EngineError> {
        self.ensure_active()?;
        let phase = self.phase();
        let track = match (&self.round, phase) {
            (Some(round), Phase::Audio | Phase::Question) => round.card.track.clone(),
            _ => return Err(ValidationError::WrongPhase { phase }.into()),
        };

        let peeker = self.players.get_mut(player).ok_or(NotFound::Player(player))?;
        if peeker.peek_used {
            return Err(ValidationError::PeekSpent.into());
        }
        peeker.peek_used = true;
        self.record(SessionEvent::PeekUsed { player });
        Ok(track)
    }

    // === Internals ===

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ValidationError::SessionInactive.into())
        }
    }

    fn transition(&mut self, event: PhaseEvent) -> Transition {
        let transition = self.machine.handle(event);
        if let Transition::Moved { from, to } = transition {
            self.record(SessionEvent::PhaseChanged { from, to });
        }
        transition
    }

    fn record(&mut self, event: SessionEvent) {
        let sequence = self.history.len() as u64;
        let round = self.machine.round_number();
        self.history.push_back(EventRecord::new(sequence, round, event));
    }

    fn advance_turn(&mut self) {
        let next = (self.turn.index() + 1) % self.players.player_count();
        self.turn = PlayerId::new(next as u8);
    }

    fn roll_award_for(&mut self, player: PlayerId, difficulty: Difficulty) -> Option<PowerCardInstance> {
        let kind = effects::roll_award(
            &mut self.supply,
            &self.config.award_weights,
            difficulty,
            self.collaborators.rng.as_mut(),
        )?;
        Some(self.issue_card(player, kind))
    }

    fn issue_card(&mut self, player: PlayerId, kind: PowerCardType) -> PowerCardInstance {
        let id = PowerCardId::new(self.next_card_id);
        self.next_card_id += 1;

        let instance = PowerCardInstance::new(id, kind, player);
        self.players[player].give_card(instance.clone());
        self.record(SessionEvent::CardAwarded {
            player,
            card: id,
            kind,
        });
        info!(%player, %kind, card = %id, "Power card awarded");
        instance
    }

    fn end_game(&mut self) -> GameResult {
        let result = GameResult::from_scores(&self.players);
        self.result = Some(result.clone());
        self.record(SessionEvent::GameEnded {
            result: result.clone(),
        });
        info!(?result, round = self.machine.round_number(), "Game ended");
        result
    }
}
