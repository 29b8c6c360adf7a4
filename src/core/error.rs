//! Error taxonomy.
//!
//! Three recoverable families, one per decision kind: a rejected decision
//! leaves game state untouched and is surfaced to the external caller for
//! correction. Forfeits are not errors — they are terminal *inputs* the
//! caller reports (see [`ForfeitReason`]) and end the match immediately.
//!
//! Internal invariant violations (negative HP, double revival) are
//! programming faults and panic; they never appear here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use crate::catalog::FishId;

/// Rejected team selections.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SelectionError {
    /// A team is exactly 4 fish.
    #[error("a team must contain exactly 4 fish, got {0}")]
    WrongCount(usize),

    /// The same definition appears twice in one selection.
    #[error("duplicate fish in selection: {0}")]
    DuplicateFish(FishId),

    /// The owner already fielded this definition in an earlier round.
    #[error("fish already used in an earlier round: {0}")]
    FishAlreadyUsed(FishId),

    /// Id outside the catalog.
    #[error("unknown fish id: {0}")]
    UnknownFish(FishId),

    /// Mimic Fish selected without a companion target.
    #[error("Mimic Fish requires a copy target")]
    MissingMimicTarget,

    /// The Mimic cannot copy itself, and a target without a Mimic is noise.
    #[error("invalid mimic target")]
    InvalidMimicTarget,

    /// Selection arrived out of order or twice.
    #[error("it is not {0}'s turn to select")]
    NotYourSelection(PlayerId),
}

/// Rejected assertions.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AssertionError {
    /// Not this player's turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The turn is past its assertion window.
    #[error("the assertion window for this turn has closed")]
    WrongPhase,

    /// Position outside 0..4.
    #[error("no enemy fish at position {0}")]
    InvalidTarget(u8),

    /// Only living fish can be asserted.
    #[error("assertion target at position {0} is defeated")]
    TargetDefeated(u8),

    /// Only hidden fish can be asserted.
    #[error("assertion target at position {0} is already revealed")]
    TargetRevealed(u8),

    /// Declared name not in the catalog.
    #[error("unknown fish name: {0:?}")]
    UnknownFish(String),
}

/// Rejected actions.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    /// Not this player's turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The turn is still in its assertion window.
    #[error("resolve the assertion window before acting")]
    WrongPhase,

    /// Position outside 0..4.
    #[error("no fish at position {0}")]
    InvalidActor(u8),

    /// Defeated fish cannot act.
    #[error("acting fish at position {0} is defeated")]
    ActorDefeated(u8),

    /// Target position outside 0..4 or pointing at a defeated fish.
    #[error("invalid target at position {0}")]
    InvalidTarget(u8),

    /// The chosen skill needs a target the decision did not supply.
    #[error("the chosen skill requires a target")]
    MissingTarget,
}

/// Any rejected decision, by family.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("illegal selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("illegal assertion: {0}")]
    Assertion(#[from] AssertionError),

    #[error("illegal action: {0}")]
    Action(#[from] ActionError),

    /// A turn decision arrived while team selections are still pending.
    #[error("waiting for team selections")]
    AwaitingSelection,

    /// Decision arrived after the round already ended.
    #[error("the round has ended")]
    RoundOver,

    /// Decision arrived after the match already ended.
    #[error("the match has ended")]
    MatchOver,
}

/// Why a match was forfeited.
///
/// The core does not watch clocks or catch caller faults; the calling layer
/// detects these and reports them. Either reason terminates the match
/// immediately, regardless of round score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForfeitReason {
    /// The player exceeded the external decision-time budget.
    Timeout,
    /// A caller-side fault (crash, repeated illegal input, protocol abuse).
    RuntimeFault,
}

impl std::fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::RuntimeFault => write!(f, "runtime fault"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::from(SelectionError::WrongCount(3));
        assert_eq!(
            err.to_string(),
            "illegal selection: a team must contain exactly 4 fish, got 3"
        );

        let err = GameError::from(AssertionError::TargetRevealed(2));
        assert!(err.to_string().contains("already revealed"));
    }

    #[test]
    fn test_errors_serialize() {
        let err = GameError::from(ActionError::ActorDefeated(1));
        let json = serde_json::to_string(&err).unwrap();
        let back: GameError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }

    #[test]
    fn test_forfeit_reason_display() {
        assert_eq!(ForfeitReason::Timeout.to_string(), "timeout");
        assert_eq!(ForfeitReason::RuntimeFault.to_string(), "runtime fault");
    }
}
