//! The fish catalog.
//!
//! `FishCatalog` owns the twelve definitions and provides lookup by id and
//! by display name, plus selection validation (4 distinct, not yet used by
//! that owner this match, Mimic companion rules).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::SelectionError;

use super::definition::{FishDefinition, FishId};
use super::skill::{ActiveSkill, Passive};

/// Registry of the twelve fish definitions.
#[derive(Clone, Debug)]
pub struct FishCatalog {
    defs: Vec<FishDefinition>,
    by_name: FxHashMap<String, FishId>,
}

impl FishCatalog {
    /// Build the standard Aquawar catalog.
    #[must_use]
    pub fn standard() -> Self {
        let dodge = Passive::Dodge { chance: 0.3 };
        let spread = Passive::DamageSpread {
            retain_pct: 70,
            growth_step: 200,
            growth_gain: 20,
        };
        let ally_guard = Passive::AllyGuard {
            below_hp: 120,
            strike: 30,
        };
        let mending = Passive::Mending { heal: 20 };

        let aoe = ActiveSkill::AoeBurst { atk_pct: 35 };
        let sacrifice = ActiveSkill::Sacrifice {
            cost: 50,
            atk_gain: 70,
        };
        let ward = ActiveSkill::Ward {
            reduce_pct: 70,
            atk_gain: 20,
        };
        let hunt = ActiveSkill::Hunt {
            atk_pct: 120,
            frenzy_pct: 140,
            frenzy_below: 160,
        };

        let defs = vec![
            FishDefinition::new(FishId::ARCHERFISH, "Archerfish", ally_guard, aoe),
            FishDefinition::new(FishId::PUFFERFISH, "Pufferfish", ally_guard, sacrifice),
            FishDefinition::new(FishId::ELECTRIC_EEL, "Electric Eel", spread, aoe),
            FishDefinition::new(FishId::SUNFISH, "Sunfish", spread, sacrifice),
            FishDefinition::new(
                FishId::SEA_WOLF,
                "Sea Wolf",
                dodge,
                ActiveSkill::CriticalStrike { damage: 120 },
            ),
            FishDefinition::new(FishId::MANTA_RAY, "Manta Ray", dodge, ward),
            FishDefinition::new(
                FishId::SEA_TURTLE,
                "Sea Turtle",
                Passive::ShellGuard {
                    shields: 3,
                    chance: 0.3,
                },
                ActiveSkill::Succor {
                    heal: 20,
                    strike: 120,
                    strike_uses: 3,
                },
            ),
            FishDefinition::new(FishId::OCTOPUS, "Octopus", mending, ward),
            FishDefinition::new(FishId::GREAT_WHITE_SHARK, "Great White Shark", mending, hunt),
            FishDefinition::new(
                FishId::HAMMERHEAD_SHARK,
                "Hammerhead Shark",
                Passive::LastStand {
                    heal: 20,
                    surge_below: 80,
                    surge_gain: 15,
                    rattle: 40,
                },
                hunt,
            ),
            FishDefinition::new(
                FishId::CLOWNFISH,
                "Clownfish",
                Passive::Counter {
                    below_hp: 120,
                    strike: 30,
                },
                ActiveSkill::ShareWard {
                    keep_pct: 70,
                    burst_pct: 35,
                    burst_uses: 3,
                },
            ),
            FishDefinition::new(FishId::MIMIC_FISH, "Mimic Fish", Passive::Mimicry, ActiveSkill::Mimicry),
        ];

        let by_name = defs
            .iter()
            .map(|d| (d.name.clone(), d.id))
            .collect::<FxHashMap<_, _>>();

        Self { defs, by_name }
    }

    /// Get a definition by id.
    #[must_use]
    pub fn get(&self, id: FishId) -> Option<&FishDefinition> {
        self.defs.get(id.index())
    }

    /// Get a definition by id, panicking if out of range.
    ///
    /// Use after the id has been validated.
    #[must_use]
    pub fn get_unchecked(&self, id: FishId) -> &FishDefinition {
        &self.defs[id.index()]
    }

    /// Look up a fish id by its exact display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<FishId> {
        self.by_name.get(name).copied()
    }

    /// Number of definitions (always 12 for the standard catalog).
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &FishDefinition> {
        self.defs.iter()
    }

    /// Validate a team selection.
    ///
    /// Checks, in order: exactly 4 picks, all ids known, no duplicates,
    /// none previously used by this owner, and the Mimic companion rules
    /// (required iff the Mimic Fish is picked, and never the Mimic itself).
    pub fn validate_selection(
        &self,
        picks: &[FishId],
        mimic_target: Option<FishId>,
        used: &FxHashSet<FishId>,
    ) -> Result<(), SelectionError> {
        if picks.len() != 4 {
            return Err(SelectionError::WrongCount(picks.len()));
        }

        let mut seen = FxHashSet::default();
        for &id in picks {
            if self.get(id).is_none() {
                return Err(SelectionError::UnknownFish(id));
            }
            if !seen.insert(id) {
                return Err(SelectionError::DuplicateFish(id));
            }
            if used.contains(&id) {
                return Err(SelectionError::FishAlreadyUsed(id));
            }
        }

        let has_mimic = picks.contains(&FishId::MIMIC_FISH);
        match (has_mimic, mimic_target) {
            (true, None) => return Err(SelectionError::MissingMimicTarget),
            (true, Some(target)) => {
                if target == FishId::MIMIC_FISH || self.get(target).is_none() {
                    return Err(SelectionError::InvalidMimicTarget);
                }
            }
            (false, Some(_)) => return Err(SelectionError::InvalidMimicTarget),
            (false, None) => {}
        }

        Ok(())
    }
}

impl Default for FishCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FishId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_used() -> FxHashSet<FishId> {
        FxHashSet::default()
    }

    #[test]
    fn test_standard_catalog_has_twelve_fish() {
        let catalog = FishCatalog::standard();
        assert_eq!(catalog.len(), 12);

        for i in 0..12 {
            let def = catalog.get(FishId::new(i)).unwrap();
            assert_eq!(def.id, FishId::new(i));
            assert_eq!(def.base_hp, 400);
            assert_eq!(def.base_atk, 100);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = FishCatalog::standard();

        assert_eq!(catalog.by_name("Sea Wolf"), Some(FishId::SEA_WOLF));
        assert_eq!(catalog.by_name("Mimic Fish"), Some(FishId::MIMIC_FISH));
        assert_eq!(catalog.by_name("Kraken"), None);
        // Exact match only.
        assert_eq!(catalog.by_name("sea wolf"), None);
    }

    #[test]
    fn test_valid_selection() {
        let catalog = FishCatalog::standard();
        let picks = [
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::SEA_TURTLE,
            FishId::CLOWNFISH,
        ];

        assert!(catalog.validate_selection(&picks, None, &no_used()).is_ok());
    }

    #[test]
    fn test_selection_wrong_count() {
        let catalog = FishCatalog::standard();
        let picks = [FishId::ARCHERFISH, FishId::SEA_WOLF];

        assert_eq!(
            catalog.validate_selection(&picks, None, &no_used()),
            Err(SelectionError::WrongCount(2))
        );
    }

    #[test]
    fn test_selection_duplicate() {
        let catalog = FishCatalog::standard();
        let picks = [
            FishId::ARCHERFISH,
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
        ];

        assert_eq!(
            catalog.validate_selection(&picks, None, &no_used()),
            Err(SelectionError::DuplicateFish(FishId::ARCHERFISH))
        );
    }

    #[test]
    fn test_selection_reused_fish() {
        let catalog = FishCatalog::standard();
        let mut used = no_used();
        used.insert(FishId::SEA_WOLF);

        let picks = [
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::SUNFISH,
        ];

        assert_eq!(
            catalog.validate_selection(&picks, None, &used),
            Err(SelectionError::FishAlreadyUsed(FishId::SEA_WOLF))
        );
    }

    #[test]
    fn test_mimic_requires_target() {
        let catalog = FishCatalog::standard();
        let picks = [
            FishId::MIMIC_FISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::SUNFISH,
        ];

        assert_eq!(
            catalog.validate_selection(&picks, None, &no_used()),
            Err(SelectionError::MissingMimicTarget)
        );
        assert!(catalog
            .validate_selection(&picks, Some(FishId::SEA_TURTLE), &no_used())
            .is_ok());
    }

    #[test]
    fn test_mimic_cannot_copy_itself() {
        let catalog = FishCatalog::standard();
        let picks = [
            FishId::MIMIC_FISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::SUNFISH,
        ];

        assert_eq!(
            catalog.validate_selection(&picks, Some(FishId::MIMIC_FISH), &no_used()),
            Err(SelectionError::InvalidMimicTarget)
        );
    }

    #[test]
    fn test_mimic_target_without_mimic_rejected() {
        let catalog = FishCatalog::standard();
        let picks = [
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::SUNFISH,
        ];

        assert_eq!(
            catalog.validate_selection(&picks, Some(FishId::SEA_TURTLE), &no_used()),
            Err(SelectionError::InvalidMimicTarget)
        );
    }
}
