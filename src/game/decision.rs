//! Decisions - the external caller's inputs.
//!
//! Every decision is plain serializable data, validated in full before any
//! state changes. The core never waits for a decision; the calling layer
//! (CLI, agent harness, tournament driver) owns pacing and time budgets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::FishId;

/// A team selection for one round: four distinct fish, plus the companion
/// target when the Mimic Fish is among them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDecision {
    /// Catalog ids of the four picks.
    pub fish: SmallVec<[FishId; 4]>,

    /// Whose skills the Mimic Fish copies this round. Required iff the
    /// Mimic is picked; bound for the entire round.
    pub mimic_target: Option<FishId>,
}

impl SelectionDecision {
    /// A selection without a Mimic Fish.
    #[must_use]
    pub fn new(fish: [FishId; 4]) -> Self {
        Self {
            fish: SmallVec::from_slice(&fish),
            mimic_target: None,
        }
    }

    /// A selection including the Mimic Fish and its companion target.
    #[must_use]
    pub fn with_mimic(fish: [FishId; 4], mimic_target: FishId) -> Self {
        Self {
            fish: SmallVec::from_slice(&fish),
            mimic_target: Some(mimic_target),
        }
    }
}

/// The optional identity guess opening a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionDecision {
    /// Decline to assert this turn.
    Skip,

    /// Guess that the hidden enemy fish at `target` is `name`.
    Assert { target: u8, name: String },
}

/// The mandatory action closing a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionDecision {
    /// 50% of snapshot ATK against one living enemy.
    NormalAttack { actor: u8, target: u8 },

    /// The actor's active skill. `teammate` and `enemy` are read only by
    /// skills that want them; superfluous targets are ignored.
    ActiveSkill {
        actor: u8,
        teammate: Option<u8>,
        enemy: Option<u8>,
    },
}

impl ActionDecision {
    /// Position of the acting fish.
    #[must_use]
    pub fn actor(&self) -> u8 {
        match self {
            Self::NormalAttack { actor, .. } | Self::ActiveSkill { actor, .. } => *actor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_constructors() {
        let plain = SelectionDecision::new([
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::CLOWNFISH,
        ]);
        assert_eq!(plain.fish.len(), 4);
        assert!(plain.mimic_target.is_none());

        let mimic = SelectionDecision::with_mimic(
            [
                FishId::MIMIC_FISH,
                FishId::SEA_WOLF,
                FishId::OCTOPUS,
                FishId::CLOWNFISH,
            ],
            FishId::SEA_TURTLE,
        );
        assert_eq!(mimic.mimic_target, Some(FishId::SEA_TURTLE));
    }

    #[test]
    fn test_action_actor() {
        assert_eq!(ActionDecision::NormalAttack { actor: 2, target: 0 }.actor(), 2);
        assert_eq!(
            ActionDecision::ActiveSkill {
                actor: 3,
                teammate: None,
                enemy: Some(1)
            }
            .actor(),
            3
        );
    }

    #[test]
    fn test_decisions_serde_round_trip() {
        let decision = AssertionDecision::Assert {
            target: 1,
            name: "Sea Wolf".to_string(),
        };
        let json = serde_json::to_string(&decision).unwrap();
        let back: AssertionDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, back);
    }
}
