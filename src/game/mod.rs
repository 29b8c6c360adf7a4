//! Game flow: decisions, assertions, turns, rounds and the match series.

pub mod assertion;
pub mod decision;
pub mod round;
pub mod series;
pub mod turn;

pub use assertion::ASSERTION_PENALTY;
pub use decision::{ActionDecision, AssertionDecision, SelectionDecision};
pub use round::{
    Move, MoveRecord, Round, RoundPhase, RoundResult, Tiebreaker, TurnOutcome, WinReason,
    TURN_LIMIT,
};
pub use series::{MatchController, MatchResult, ROUNDS_TO_WIN};
