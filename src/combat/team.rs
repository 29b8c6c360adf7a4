//! Teams - four fish in fixed positions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

use super::entity::CombatFish;

/// One player's team of exactly four fish.
///
/// Positions are assigned at construction and never change; every ordered
/// traversal in the engine (AoE targets, share recipients, retaliators)
/// ascends by position index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    owner: PlayerId,
    fish: SmallVec<[CombatFish; 4]>,
}

impl Team {
    /// Create a team. Panics unless exactly four fish are supplied with
    /// positions 0..4 in order.
    #[must_use]
    pub fn new(owner: PlayerId, fish: SmallVec<[CombatFish; 4]>) -> Self {
        assert_eq!(fish.len(), 4, "a team is exactly four fish");
        for (i, f) in fish.iter().enumerate() {
            assert_eq!(f.position() as usize, i, "positions must match slots");
        }
        Self { owner, fish }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// All four fish in position order.
    #[must_use]
    pub fn fish(&self) -> &[CombatFish] {
        &self.fish
    }

    /// The fish at a position, if the position is valid.
    #[must_use]
    pub fn get(&self, position: u8) -> Option<&CombatFish> {
        self.fish.get(position as usize)
    }

    pub fn get_mut(&mut self, position: u8) -> Option<&mut CombatFish> {
        self.fish.get_mut(position as usize)
    }

    /// Positions of living fish, ascending.
    #[must_use]
    pub fn living_positions(&self) -> SmallVec<[u8; 4]> {
        self.fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.position())
            .collect()
    }

    /// Positions of living fish other than `except`, ascending.
    #[must_use]
    pub fn living_teammates_of(&self, except: u8) -> SmallVec<[u8; 4]> {
        self.fish
            .iter()
            .filter(|f| f.is_alive() && f.position() != except)
            .map(|f| f.position())
            .collect()
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.fish.iter().filter(|f| f.is_alive()).count()
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.living_count() == 0
    }

    /// Total HP over living fish (turn-limit tiebreak 2).
    #[must_use]
    pub fn total_hp(&self) -> i32 {
        self.fish.iter().filter(|f| f.is_alive()).map(|f| f.hp()).sum()
    }

    /// Highest single HP over living fish (turn-limit tiebreak 3).
    #[must_use]
    pub fn highest_hp(&self) -> i32 {
        self.fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.hp())
            .max()
            .unwrap_or(0)
    }

    /// Post-action checkpoint over the whole team.
    pub fn checkpoint(&mut self) {
        for f in &mut self.fish {
            f.checkpoint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FishCatalog, FishId};

    fn team_of(ids: [FishId; 4]) -> Team {
        let catalog = FishCatalog::standard();
        let fish = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let def = catalog.get_unchecked(id);
                CombatFish::new(def, def, i as u8)
            })
            .collect();
        Team::new(PlayerId::new(0), fish)
    }

    fn sample() -> Team {
        team_of([
            FishId::ARCHERFISH,
            FishId::SEA_WOLF,
            FishId::OCTOPUS,
            FishId::CLOWNFISH,
        ])
    }

    #[test]
    fn test_team_layout() {
        let team = sample();

        assert_eq!(team.fish().len(), 4);
        assert_eq!(team.get(2).unwrap().identity(), FishId::OCTOPUS);
        assert!(team.get(4).is_none());
        assert_eq!(team.living_positions().as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_living_queries_skip_the_dead() {
        let mut team = sample();
        team.get_mut(1).unwrap().apply_damage(400);

        assert_eq!(team.living_count(), 3);
        assert_eq!(team.living_positions().as_slice(), &[0, 2, 3]);
        assert_eq!(team.living_teammates_of(0).as_slice(), &[2, 3]);
        assert!(!team.is_eliminated());
    }

    #[test]
    fn test_hp_tiebreak_stats_ignore_the_dead() {
        let mut team = sample();
        team.get_mut(0).unwrap().apply_damage(100); // 300
        team.get_mut(1).unwrap().apply_damage(400); // dead
        team.get_mut(2).unwrap().apply_damage(250); // 150

        assert_eq!(team.total_hp(), 300 + 150 + 400);
        assert_eq!(team.highest_hp(), 400);
    }

    #[test]
    fn test_elimination() {
        let mut team = sample();
        for pos in 0..4 {
            team.get_mut(pos).unwrap().apply_damage(400);
        }
        assert!(team.is_eliminated());
        assert_eq!(team.total_hp(), 0);
        assert_eq!(team.highest_hp(), 0);
    }
}
