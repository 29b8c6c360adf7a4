//! Combat entities - runtime fish state.
//!
//! `CombatFish` is one fish in a team slot during a round. It owns every
//! mutable number the pipeline touches: HP, ATK, shields, the cumulative
//! raw-damage counter, skill usage, and the single delayed-effect slot.
//!
//! The skill pair is resolved at construction: for the Mimic Fish it is a
//! copy of the companion target's pair, fixed for the whole round. The
//! `identity` field always keeps the true catalog id — a Mimic stays a
//! Mimic for assertion purposes no matter whose skills it wears.

use serde::{Deserialize, Serialize};

use crate::catalog::{ActiveSkill, FishDefinition, FishId, Passive, MAX_HP};

/// A pending "next time" effect.
///
/// One slot per fish: applying a new delayed effect overwrites whatever is
/// pending, never stacks. `consumed` is set when the effect triggers; the
/// slot is physically cleared at the post-action checkpoint, so a nested
/// event inside the same action cannot re-trigger it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub kind: DelayedKind,
    pub consumed: bool,
}

/// What a delayed effect does when its trigger arrives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DelayedKind {
    /// Next incoming hit is reduced by `pct`%.
    Reduce { pct: i32 },
    /// Next incoming hit is damage-shared: the fish keeps `keep_pct`%,
    /// the rest spreads over living teammates.
    Share { keep_pct: i32 },
    /// Heal after the next incoming hit.
    Heal { amount: i32 },
}

/// Runtime state of one fish in a team slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatFish {
    /// True catalog identity (the Mimic keeps `FishId::MIMIC_FISH`).
    identity: FishId,

    /// Resolved passive; a copy of the companion's for the Mimic.
    passive: Passive,

    /// Resolved active; a copy of the companion's for the Mimic.
    active: ActiveSkill,

    /// For the Mimic Fish, the companion whose skills were copied.
    mimic_source: Option<FishId>,

    /// Team slot 0..3, fixed for the round.
    position: u8,

    hp: i32,
    atk: i32,

    /// One-way: set by a successful enemy assertion.
    revealed: bool,

    /// Committed at the post-action checkpoint; never cleared afterwards.
    defeated: bool,

    /// Remaining full-hit absorbers (ShellGuard passive).
    shields: u8,

    /// Raw (pre-share) damage accumulated toward the next ATK growth step.
    growth_progress: i32,

    /// Times the active skill has been used this round.
    active_uses: u32,

    /// The single delayed-effect slot.
    delayed: Option<DelayedEffect>,

    /// One-shot flag for the LastStand ATK surge.
    surge_fired: bool,
}

impl CombatFish {
    /// Create a fish for a team slot.
    ///
    /// `skills_from` supplies the resolved skill pair; for the Mimic Fish
    /// pass the companion target's definition, otherwise pass `definition`
    /// itself.
    #[must_use]
    pub fn new(definition: &FishDefinition, skills_from: &FishDefinition, position: u8) -> Self {
        assert!(position < 4, "team positions are 0..4");
        debug_assert!(
            definition.id == skills_from.id || definition.is_mimic(),
            "only the Mimic Fish may borrow another definition's skills"
        );

        let shields = match skills_from.passive {
            Passive::ShellGuard { shields, .. } => shields,
            _ => 0,
        };

        Self {
            identity: definition.id,
            passive: skills_from.passive,
            active: skills_from.active,
            mimic_source: if definition.is_mimic() {
                Some(skills_from.id)
            } else {
                None
            },
            position,
            hp: definition.base_hp,
            atk: definition.base_atk,
            revealed: false,
            defeated: false,
            shields,
            growth_progress: 0,
            active_uses: 0,
            delayed: None,
            surge_fired: false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn identity(&self) -> FishId {
        self.identity
    }

    #[must_use]
    pub fn passive(&self) -> Passive {
        self.passive
    }

    #[must_use]
    pub fn active(&self) -> ActiveSkill {
        self.active
    }

    #[must_use]
    pub fn mimic_source(&self) -> Option<FishId> {
        self.mimic_source
    }

    #[must_use]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn atk(&self) -> i32 {
        self.atk
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn defeated(&self) -> bool {
        self.defeated
    }

    #[must_use]
    pub fn shields(&self) -> u8 {
        self.shields
    }

    #[must_use]
    pub fn active_uses(&self) -> u32 {
        self.active_uses
    }

    #[must_use]
    pub fn delayed(&self) -> Option<DelayedEffect> {
        self.delayed
    }

    /// A fish at 0 HP is never alive, whether or not its defeat has been
    /// committed yet.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// ATK at action start. All damage math for a single action uses this
    /// value even if permanent-ATK triggers fire mid-action.
    #[must_use]
    pub fn snapshot_atk(&self) -> i32 {
        self.atk
    }

    // === Mutations ===

    /// One-way reveal.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Permanent ATK gain. ATK never decreases within a round.
    pub fn gain_atk(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "ATK is monotonically non-decreasing");
        self.atk += amount;
    }

    /// Subtract pipeline damage, clamping at 0. Returns the HP actually
    /// lost, which is what public logs report.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        applied
    }

    /// HP loss from an assertion. Bypasses the effect pipeline entirely:
    /// no shield, dodge, sharing, retaliation or death-rattle can react.
    /// A fish emptied this way is defeated on the spot (assertions resolve
    /// outside any action, so there is no checkpoint to defer to).
    pub fn apply_non_damage_hp_loss(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
        self.mark_defeated_if_dead();
    }

    /// Heal, capped at base HP. Has no effect on a fish at 0 HP — defeat
    /// within an event chain is final. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp == 0 {
            return 0;
        }
        let healed = amount.min(MAX_HP - self.hp);
        self.hp += healed;
        healed
    }

    /// Commit defeat if HP has reached 0. Idempotent; once marked, the
    /// flag never clears.
    pub fn mark_defeated_if_dead(&mut self) {
        debug_assert!(self.hp >= 0, "HP must never go negative");
        if self.hp == 0 {
            self.defeated = true;
        }
    }

    /// Consume one shield if available. Returns whether a shield absorbed
    /// the hit.
    pub fn consume_shield(&mut self) -> bool {
        if self.shields > 0 {
            self.shields -= 1;
            true
        } else {
            false
        }
    }

    /// Accumulate raw (pre-share) damage toward the ATK growth passive.
    /// Every full `step` grants `gain` ATK immediately. The gain never
    /// retroactively affects a snapshot already taken.
    pub fn accumulate_raw_damage(&mut self, raw: i32, step: i32, gain: i32) {
        self.growth_progress += raw;
        while self.growth_progress >= step {
            self.growth_progress -= step;
            self.atk += gain;
        }
    }

    /// Fire the one-shot LastStand ATK surge if it has not fired yet.
    /// Returns whether it fired.
    pub fn fire_surge(&mut self, gain: i32) -> bool {
        if self.surge_fired {
            return false;
        }
        self.surge_fired = true;
        self.atk += gain;
        true
    }

    #[must_use]
    pub fn surge_fired(&self) -> bool {
        self.surge_fired
    }

    /// Count one use of the active skill.
    pub fn count_active_use(&mut self) {
        self.active_uses += 1;
    }

    /// Install a delayed effect, overwriting any pending one. Defeated
    /// fish cannot gain new delayed effects.
    pub fn set_delayed(&mut self, kind: DelayedKind) {
        debug_assert!(self.is_alive(), "defeated fish cannot gain delayed effects");
        self.delayed = Some(DelayedEffect {
            kind,
            consumed: false,
        });
    }

    /// The pending delayed effect, if any and not yet consumed.
    #[must_use]
    pub fn pending_delayed(&self) -> Option<DelayedKind> {
        match self.delayed {
            Some(DelayedEffect { kind, consumed: false }) => Some(kind),
            _ => None,
        }
    }

    /// Mark the pending delayed effect as consumed. It stops triggering
    /// immediately; the slot is cleared at the post-action checkpoint.
    pub fn consume_delayed(&mut self) {
        if let Some(effect) = &mut self.delayed {
            debug_assert!(!effect.consumed, "delayed effects trigger once");
            effect.consumed = true;
        }
    }

    /// Post-action checkpoint: commit defeat and clear a consumed slot.
    pub fn checkpoint(&mut self) {
        self.mark_defeated_if_dead();
        if matches!(self.delayed, Some(DelayedEffect { consumed: true, .. })) {
            self.delayed = None;
        }
    }
}
