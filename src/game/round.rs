//! Round state and win evaluation.
//!
//! A `Round` owns everything one round mutates: both teams, the turn
//! counter, the phase machine, the RNG stream, the public event log and
//! the move history. The turn state machine itself (assertion and action
//! application) lives in `turn.rs` and `assertion.rs`; this module holds
//! the lifecycle and the win/tiebreak rules.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{FishCatalog, FishId};
use crate::combat::{CombatFish, PublicEvent, Team};
use crate::core::{GameError, GameRng, PerPlayer, PlayerId};

use super::decision::{ActionDecision, AssertionDecision, SelectionDecision};

/// Turns per round before the tiebreakers decide (32 per player).
pub const TURN_LIMIT: u32 = 64;

/// Where a round stands in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The turn owner may assert (or skip).
    Assertion,
    /// The turn owner must act.
    Action,
    /// A result has been reached; no further decisions apply.
    Ended,
}

/// Which tiebreak rule decided a turn-limited round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tiebreaker {
    /// More living fish.
    FishCount,
    /// Higher total remaining HP.
    TotalHp,
    /// Higher single highest-HP fish.
    HighestHp,
    /// The player who moved second this round.
    SecondMover,
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// The opponent has no living fish.
    Elimination,
    /// Both teams fell in the same action; the acting player wins.
    MutualElimination,
    /// Decided at the turn limit.
    Tiebreak(Tiebreaker),
}

/// Terminal output of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub winner: PlayerId,
    pub reason: WinReason,
}

/// What one applied decision produced: the public events it generated and,
/// if it ended the round, the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub events: Vec<PublicEvent>,
    pub result: Option<RoundResult>,
}

/// An applied decision, for the move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Assertion(AssertionDecision),
    Action(ActionDecision),
}

/// One entry of the move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub turn: u32,
    pub decision: Move,
}

/// One round of a match.
#[derive(Debug)]
pub struct Round {
    pub(crate) number: u32,
    pub(crate) catalog: FishCatalog,
    pub(crate) teams: PerPlayer<Team>,
    pub(crate) turn_no: u32,
    pub(crate) turn_owner: PlayerId,
    pub(crate) first_player: PlayerId,
    pub(crate) phase: RoundPhase,
    pub(crate) rng: GameRng,
    pub(crate) events: Vector<PublicEvent>,
    pub(crate) history: Vector<MoveRecord>,
    pub(crate) result: Option<RoundResult>,
}

impl Round {
    /// Start a round from two validated-or-not selections.
    ///
    /// Selections are validated structurally here (count, duplicates,
    /// mimic companion rules); the cross-round used-fish rule belongs to
    /// the match controller, which passes its own bookkeeping through
    /// [`FishCatalog::validate_selection`] before ever reaching this
    /// point.
    ///
    /// `first_player` for round 1 is supplied externally (chosen at random
    /// by the caller); in later rounds the previous winner moves second.
    pub fn new(
        number: u32,
        first_player: PlayerId,
        catalog: FishCatalog,
        selections: PerPlayer<SelectionDecision>,
        rng: GameRng,
    ) -> Result<Self, GameError> {
        for player in PlayerId::both() {
            let sel = &selections[player];
            catalog.validate_selection(&sel.fish, sel.mimic_target, &Default::default())?;
        }

        let teams = PerPlayer::new(|player| {
            let sel = &selections[player];
            let fish = sel
                .fish
                .iter()
                .enumerate()
                .map(|(i, &id)| {
                    let def = catalog.get_unchecked(id);
                    let skills_from = if def.is_mimic() {
                        catalog.get_unchecked(sel.mimic_target.expect("validated above"))
                    } else {
                        def
                    };
                    CombatFish::new(def, skills_from, i as u8)
                })
                .collect();
            Team::new(player, fish)
        });

        debug!("round {} begins, {} moves first", number, first_player);

        Ok(Self {
            number,
            catalog,
            teams,
            turn_no: 0,
            turn_owner: first_player,
            first_player,
            phase: RoundPhase::Assertion,
            rng,
            events: Vector::new(),
            history: Vector::new(),
            result: None,
        })
    }

    // === Queries ===

    /// Round number within the match (1-based).
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Completed player turns so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn_no
    }

    /// Whose decision the round is waiting for.
    #[must_use]
    pub fn turn_owner(&self) -> PlayerId {
        self.turn_owner
    }

    /// Who moved first this round.
    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    #[must_use]
    pub fn team(&self, player: PlayerId) -> &Team {
        &self.teams[player]
    }

    /// The full public event log of the round so far.
    #[must_use]
    pub fn events(&self) -> &Vector<PublicEvent> {
        &self.events
    }

    /// Every decision applied this round, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    /// Resolve a display name through the round's catalog.
    #[must_use]
    pub fn fish_name(&self, id: FishId) -> &str {
        &self.catalog.get_unchecked(id).name
    }

    // === Lifecycle (crate-internal) ===

    pub(crate) fn record_move(&mut self, player: PlayerId, decision: Move) {
        self.history.push_back(MoveRecord {
            player,
            turn: self.turn_no,
            decision,
        });
    }

    pub(crate) fn publish(&mut self, events: &[PublicEvent]) {
        for event in events {
            self.events.push_back(event.clone());
        }
    }

    pub(crate) fn finish(&mut self, result: RoundResult) {
        debug!(
            "round {} over: {} wins by {:?}",
            self.number, result.winner, result.reason
        );
        self.phase = RoundPhase::Ended;
        self.result = Some(result);
    }

    /// Elimination check after a fully resolved action (or an assertion
    /// penalty). Elimination outranks everything; simultaneous elimination
    /// goes to the acting player.
    pub(crate) fn evaluate_elimination(&self, acting: PlayerId) -> Option<RoundResult> {
        let own_alive = !self.teams[acting].is_eliminated();
        let opp_alive = !self.teams[acting.opponent()].is_eliminated();

        match (own_alive, opp_alive) {
            (false, false) => Some(RoundResult {
                winner: acting,
                reason: WinReason::MutualElimination,
            }),
            (true, false) => Some(RoundResult {
                winner: acting,
                reason: WinReason::Elimination,
            }),
            (false, true) => Some(RoundResult {
                winner: acting.opponent(),
                reason: WinReason::Elimination,
            }),
            (true, true) => None,
        }
    }

    /// Decide a round that reached the turn limit with both sides alive.
    /// Tiebreak order: fish count, total HP, highest single HP, second
    /// mover.
    pub(crate) fn turn_limit_result(&self) -> RoundResult {
        let [p0, p1] = PlayerId::both();
        let (a, b) = (&self.teams[p0], &self.teams[p1]);

        let (winner, rule) = if a.living_count() != b.living_count() {
            let winner = if a.living_count() > b.living_count() { p0 } else { p1 };
            (winner, Tiebreaker::FishCount)
        } else if a.total_hp() != b.total_hp() {
            let winner = if a.total_hp() > b.total_hp() { p0 } else { p1 };
            (winner, Tiebreaker::TotalHp)
        } else if a.highest_hp() != b.highest_hp() {
            let winner = if a.highest_hp() > b.highest_hp() { p0 } else { p1 };
            (winner, Tiebreaker::HighestHp)
        } else {
            (self.first_player.opponent(), Tiebreaker::SecondMover)
        };

        RoundResult {
            winner,
            reason: WinReason::Tiebreak(rule),
        }
    }
}
