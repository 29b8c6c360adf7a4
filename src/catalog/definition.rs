//! Fish definitions - static fish data.
//!
//! `FishDefinition` holds the immutable properties of one of the twelve
//! fish: base stats and the passive/active skill pair. Instance-specific
//! data (current HP, buffs, counters) lives in `combat::CombatFish`.

use serde::{Deserialize, Serialize};

use super::skill::{ActiveSkill, Passive};

/// Base HP shared by every fish.
pub const MAX_HP: i32 = 400;

/// Base ATK shared by every fish.
pub const BASE_ATK: i32 = 100;

/// Unique identifier for a fish definition.
///
/// This is the fish's stable index in the catalog (0..12); selections are
/// expressed in these indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FishId(pub u8);

impl FishId {
    pub const ARCHERFISH: FishId = FishId(0);
    pub const PUFFERFISH: FishId = FishId(1);
    pub const ELECTRIC_EEL: FishId = FishId(2);
    pub const SUNFISH: FishId = FishId(3);
    pub const SEA_WOLF: FishId = FishId(4);
    pub const MANTA_RAY: FishId = FishId(5);
    pub const SEA_TURTLE: FishId = FishId(6);
    pub const OCTOPUS: FishId = FishId(7);
    pub const GREAT_WHITE_SHARK: FishId = FishId(8);
    pub const HAMMERHEAD_SHARK: FishId = FishId(9);
    pub const CLOWNFISH: FishId = FishId(10);
    pub const MIMIC_FISH: FishId = FishId(11);

    /// Create a new fish ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for FishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fish({})", self.0)
    }
}

/// Static fish definition.
///
/// Immutable, owned by the catalog, shared by reference across every
/// entity of the same type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FishDefinition {
    /// Stable catalog index.
    pub id: FishId,

    /// Display name; assertions are declared against this exact string.
    pub name: String,

    /// Base HP at round start.
    pub base_hp: i32,

    /// Base ATK at round start.
    pub base_atk: i32,

    /// Passive skill.
    pub passive: Passive,

    /// Active skill.
    pub active: ActiveSkill,
}

impl FishDefinition {
    /// Create a definition with the shared base stats.
    #[must_use]
    pub fn new(id: FishId, name: impl Into<String>, passive: Passive, active: ActiveSkill) -> Self {
        Self {
            id,
            name: name.into(),
            base_hp: MAX_HP,
            base_atk: BASE_ATK,
            passive,
            active,
        }
    }

    /// Whether this is the Mimic Fish entry.
    #[must_use]
    pub fn is_mimic(&self) -> bool {
        self.id == FishId::MIMIC_FISH
    }
}
