//! Public events - the per-turn disclosure log.
//!
//! The log is the only window an opponent (or spectator) gets into a turn,
//! so the types here are deliberately closed: if a fact has no field in
//! this module, it cannot leak. Dodge and shield absorption in particular
//! have no representation — a negated hit is only visible as 0 damage.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// A fish slot on the board: which side, which position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub player: PlayerId,
    pub position: u8,
}

impl Slot {
    #[must_use]
    pub const fn new(player: PlayerId, position: u8) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.player, self.position)
    }
}

/// What an action disclosed about itself.
///
/// Damage figures are the HP the named target actually lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionReport {
    /// Normal attacks reveal their target and damage.
    NormalAttack { target: Slot, damage: i32 },

    /// Single-target skill damage reveals its target and damage.
    Critical { target: Slot, damage: i32 },

    /// AoE skills reveal every target and its damage.
    Aoe { hits: SmallVec<[(Slot, i32); 4]> },

    /// Teammate-harming skills reveal the harmed teammate.
    HarmTeammate { teammate: Slot },

    /// Pure buff skills reveal nothing beyond the acting fish.
    NoObviousEffect,
}

/// Triggered-effect categories the rules allow to be disclosed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerCategory {
    Retaliation,
    DamageSharing,
    DamageReduction,
    Healing,
    DeathRattle,
}

/// One entry of the public log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicEvent {
    /// Outcome of an assertion; `revealed` carries the name only on
    /// success.
    Assertion {
        player: PlayerId,
        target: Slot,
        success: bool,
        revealed: Option<String>,
    },

    /// An action with its disclosure payload.
    Action {
        player: PlayerId,
        actor: Slot,
        report: ActionReport,
    },

    /// A triggered effect: category plus the fish it belongs to.
    Trigger { category: TriggerCategory, fish: Slot },
}

impl PublicEvent {
    /// Whether this entry is a triggered-effect disclosure.
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        matches!(self, Self::Trigger { .. })
    }
}
