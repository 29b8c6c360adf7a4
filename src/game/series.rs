//! The match controller - a best-of-three series.
//!
//! Owns the catalog, the score, the cross-round used-fish bookkeeping and
//! the single active round. All entrypoints are synchronous apply-this-
//! decision calls: they either succeed, reject with the state unchanged,
//! or accept a forfeit report and terminate the series.

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{FishCatalog, FishId};
use crate::core::{ForfeitReason, GameError, GameRng, PerPlayer, PlayerId, SelectionError};

use super::decision::{ActionDecision, AssertionDecision, SelectionDecision};
use super::round::{Round, RoundResult, TurnOutcome};

/// Round wins needed to take the match.
pub const ROUNDS_TO_WIN: u8 = 2;

/// Terminal output of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Won on round score.
    Decided { winner: PlayerId },
    /// Terminated by a forfeit report, regardless of score.
    Forfeited {
        loser: PlayerId,
        reason: ForfeitReason,
    },
}

/// Best-of-three orchestration.
pub struct MatchController {
    catalog: FishCatalog,
    seed: u64,
    score: PerPlayer<u8>,
    used: PerPlayer<FxHashSet<FishId>>,
    pending: PerPlayer<Option<SelectionDecision>>,
    round_no: u32,
    next_first: PlayerId,
    round: Option<Round>,
    past_rounds: Vec<Round>,
    completed: Vec<RoundResult>,
    result: Option<MatchResult>,
}

impl MatchController {
    /// Start a match. `first_player` opens round 1 (chosen at random by
    /// the caller, not by the core); `seed` drives every dodge roll of the
    /// whole match through per-round RNG streams.
    #[must_use]
    pub fn new(first_player: PlayerId, seed: u64) -> Self {
        Self {
            catalog: FishCatalog::standard(),
            seed,
            score: PerPlayer::with_value(0),
            used: PerPlayer::default(),
            pending: PerPlayer::default(),
            round_no: 1,
            next_first: first_player,
            round: None,
            past_rounds: Vec::new(),
            completed: Vec::new(),
            result: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn catalog(&self) -> &FishCatalog {
        &self.catalog
    }

    /// Round wins per player.
    #[must_use]
    pub fn score(&self) -> &PerPlayer<u8> {
        &self.score
    }

    /// The active round, if both selections are in and no result yet.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Number of the active (or next) round, 1-based.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_no
    }

    /// Completed round results, in order.
    #[must_use]
    pub fn completed_rounds(&self) -> &[RoundResult] {
        &self.completed
    }

    /// Finished (or forfeited mid-play) rounds with their full event logs
    /// and move histories, for external persistence and replay.
    #[must_use]
    pub fn past_rounds(&self) -> &[Round] {
        &self.past_rounds
    }

    /// Definitions already fielded by a player in this match.
    #[must_use]
    pub fn used_fish(&self, player: PlayerId) -> &FxHashSet<FishId> {
        &self.used[player]
    }

    /// The terminal result, once the match has one.
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    // === Decisions ===

    /// Submit one player's team for the upcoming round. The round starts
    /// once both players have submitted.
    pub fn submit_selection(
        &mut self,
        player: PlayerId,
        decision: SelectionDecision,
    ) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }
        if self.round.is_some() || self.pending[player].is_some() {
            return Err(SelectionError::NotYourSelection(player).into());
        }

        self.catalog
            .validate_selection(&decision.fish, decision.mimic_target, &self.used[player])?;

        debug!("{} submitted a team for round {}", player, self.round_no);
        self.pending[player] = Some(decision);

        if PlayerId::both()
            .iter()
            .all(|&p| self.pending[p].is_some())
        {
            self.start_round();
        }
        Ok(())
    }

    /// Apply an assertion decision to the active round.
    pub fn apply_assertion(
        &mut self,
        player: PlayerId,
        decision: AssertionDecision,
    ) -> Result<TurnOutcome, GameError> {
        let outcome = self.active_round_mut()?.apply_assertion(player, decision)?;
        if let Some(result) = outcome.result {
            self.finish_round(result);
        }
        Ok(outcome)
    }

    /// Apply an action decision to the active round.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        decision: ActionDecision,
    ) -> Result<TurnOutcome, GameError> {
        let outcome = self.active_round_mut()?.apply_action(player, decision)?;
        if let Some(result) = outcome.result {
            self.finish_round(result);
        }
        Ok(outcome)
    }

    /// Report a forfeit (timeout or caller-side fault). Terminates the
    /// match immediately, regardless of round score. Returns the final
    /// result; if the match was already over, the existing result stands.
    pub fn forfeit(&mut self, loser: PlayerId, reason: ForfeitReason) -> MatchResult {
        if self.result.is_none() {
            info!("match forfeited by {}: {}", loser, reason);
            if let Some(round) = self.round.take() {
                self.past_rounds.push(round);
            }
            self.result = Some(MatchResult::Forfeited { loser, reason });
        }
        self.result.clone().expect("just set")
    }

    // === Internals ===

    fn active_round_mut(&mut self) -> Result<&mut Round, GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }
        self.round.as_mut().ok_or(GameError::AwaitingSelection)
    }

    fn start_round(&mut self) {
        let selections = PerPlayer::new(|p| self.pending[p].clone().expect("both submitted"));
        for player in PlayerId::both() {
            for &id in &selections[player].fish {
                self.used[player].insert(id);
            }
            self.pending[player] = None;
        }

        let round = Round::new(
            self.round_no,
            self.next_first,
            self.catalog.clone(),
            selections,
            GameRng::for_round(self.seed, self.round_no),
        )
        .expect("selections were validated on submission");

        self.round = Some(round);
    }

    fn finish_round(&mut self, result: RoundResult) {
        info!(
            "round {} goes to {} ({:?})",
            self.round_no, result.winner, result.reason
        );
        self.completed.push(result);
        self.score[result.winner] += 1;
        if let Some(round) = self.round.take() {
            self.past_rounds.push(round);
        }
        self.round_no += 1;
        // The winner moves second next round.
        self.next_first = result.winner.opponent();

        if self.score[result.winner] >= ROUNDS_TO_WIN {
            self.result = Some(MatchResult::Decided {
                winner: result.winner,
            });
        }
    }
}
