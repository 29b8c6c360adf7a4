//! The effect resolver - the five-phase pipeline behind every hit.
//!
//! One hit event against one fish passes through five ordered phases:
//!
//! 1. **Pre-damage**: shield consumption, then the dodge roll. A negated
//!    hit skips phases 2-4; phase 5 still runs.
//! 2. **On-damage**: the damage-spread passive, then the delayed
//!    reduction, then the delayed share - one pass, fixed priority.
//! 3. **Apply damage**: HP decremented (clamped at 0), then the immediate
//!    permanent-ATK triggers (growth, surge).
//! 4. **Post-damage**: delayed heal, then passive heal. Skipped entirely
//!    for a fish the hit left pending-defeated.
//! 5. **Post-attack**: the target's own counter/death-rattle, then
//!    ally-guard retaliation by its living teammates.
//!
//! Any phase may spawn nested hits (share deliveries, retaliation); each
//! nested hit is itself a full five-phase event, resolved depth-first
//! before the spawning loop advances. Multi-target deliveries always
//! ascend by position index.

use log::trace;
use smallvec::SmallVec;

use crate::catalog::Passive;
use crate::core::{GameRng, PerPlayer};

use super::entity::{CombatFish, DelayedKind};
use super::event::{PublicEvent, Slot, TriggerCategory};
use super::team::Team;

/// Integer policy for every 70/30-style split: the shared portion is
/// `amount * (100 - keep_pct) / 100` (floor), the sharer retains the rest,
/// each of `mates` recipients gets an even floor share, and the division
/// remainder is discarded. Returns (retained, per_mate).
pub(crate) fn split_hit(amount: i32, keep_pct: i32, mates: usize) -> (i32, i32) {
    let shared = amount * (100 - keep_pct) / 100;
    let per_mate = if mates == 0 { 0 } else { shared / mates as i32 };
    (amount - shared, per_mate)
}

/// Resolves hit events against the two teams of a round.
///
/// Borrows the round's mutable pieces for the duration of one action.
pub(crate) struct Resolver<'a> {
    teams: &'a mut PerPlayer<Team>,
    rng: &'a mut GameRng,
    events: &'a mut Vec<PublicEvent>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        teams: &'a mut PerPlayer<Team>,
        rng: &'a mut GameRng,
        events: &'a mut Vec<PublicEvent>,
    ) -> Self {
        Self { teams, rng, events }
    }

    fn fish(&self, slot: Slot) -> &CombatFish {
        self.teams[slot.player]
            .get(slot.position)
            .expect("slot positions are validated before resolution")
    }

    fn fish_mut(&mut self, slot: Slot) -> &mut CombatFish {
        self.teams[slot.player]
            .get_mut(slot.position)
            .expect("slot positions are validated before resolution")
    }

    /// Resolve one hit event. Returns the HP the target actually lost,
    /// which is what public logs report for named targets.
    ///
    /// A target already at 0 HP absorbs nothing and triggers nothing; a
    /// locked-in AoE list may legitimately still contain such a fish.
    pub fn resolve_hit(&mut self, attacker: Option<Slot>, target: Slot, amount: i32) -> i32 {
        if amount <= 0 || !self.fish(target).is_alive() {
            return 0;
        }
        trace!("hit {:?} -> {} for {}", attacker, target, amount);

        // Phase 1: pre-damage.
        let negated = self.roll_negation(target);

        let mut applied = 0;
        if !negated {
            let raw = amount;

            // Phase 2: on-damage chain.
            let amount = self.spread_passive(attacker, target, amount);
            let amount = self.delayed_reduction(target, amount);
            let amount = self.delayed_share(attacker, target, amount);

            // Phase 3: apply damage.
            applied = self.fish_mut(target).apply_damage(amount);
            self.growth_and_surge(target, raw);

            // Phase 4: post-damage heals.
            if self.fish(target).is_alive() {
                self.delayed_heal(target);
                self.passive_heal(target);
            }
        }

        // Phase 5: post-attack.
        self.post_attack(attacker, target);

        applied
    }

    /// Shield consumption happens before the dodge roll; a Sea Turtle only
    /// starts dodging once its shells are spent.
    fn roll_negation(&mut self, target: Slot) -> bool {
        let chance = match self.fish(target).passive() {
            Passive::ShellGuard { chance, .. } => {
                if self.fish_mut(target).consume_shield() {
                    trace!("{} absorbed the hit with a shield", target);
                    return true;
                }
                chance
            }
            Passive::Dodge { chance } => chance,
            _ => return false,
        };
        let dodged = self.rng.gen_bool(chance);
        if dodged {
            trace!("{} dodged the hit", target);
        }
        dodged
    }

    /// Damage-spread passive: the fish keeps `retain_pct`%, the rest is
    /// delivered to living teammates as nested hits. A fish with no living
    /// teammates takes the hit in full.
    fn spread_passive(&mut self, attacker: Option<Slot>, target: Slot, amount: i32) -> i32 {
        let Passive::DamageSpread { retain_pct, .. } = self.fish(target).passive() else {
            return amount;
        };
        let mates = self.teams[target.player].living_teammates_of(target.position);
        if mates.is_empty() {
            return amount;
        }

        let (retained, per_mate) = split_hit(amount, retain_pct, mates.len());
        self.events.push(PublicEvent::Trigger {
            category: TriggerCategory::DamageSharing,
            fish: target,
        });
        for pos in mates {
            self.resolve_hit(attacker, Slot::new(target.player, pos), per_mate);
        }
        retained
    }

    fn delayed_reduction(&mut self, target: Slot, amount: i32) -> i32 {
        let Some(DelayedKind::Reduce { pct }) = self.fish(target).pending_delayed() else {
            return amount;
        };
        self.fish_mut(target).consume_delayed();
        self.events.push(PublicEvent::Trigger {
            category: TriggerCategory::DamageReduction,
            fish: target,
        });
        amount * (100 - pct) / 100
    }

    /// Delayed share consumes on any hit: the fish keeps its share even
    /// when no teammate is left to receive the rest (the spread portion is
    /// discarded, per the split policy).
    fn delayed_share(&mut self, attacker: Option<Slot>, target: Slot, amount: i32) -> i32 {
        let Some(DelayedKind::Share { keep_pct }) = self.fish(target).pending_delayed() else {
            return amount;
        };
        self.fish_mut(target).consume_delayed();

        let mates = self.teams[target.player].living_teammates_of(target.position);
        let (retained, per_mate) = split_hit(amount, keep_pct, mates.len());
        self.events.push(PublicEvent::Trigger {
            category: TriggerCategory::DamageSharing,
            fish: target,
        });
        for pos in mates {
            self.resolve_hit(attacker, Slot::new(target.player, pos), per_mate);
        }
        retained
    }

    /// Immediate permanent-ATK triggers. Growth counts the raw pre-share
    /// amount that entered phase 2; the surge fires once, on surviving
    /// below its threshold. Neither is a disclosure category.
    fn growth_and_surge(&mut self, target: Slot, raw: i32) {
        match self.fish(target).passive() {
            Passive::DamageSpread {
                growth_step,
                growth_gain,
                ..
            } => {
                self.fish_mut(target)
                    .accumulate_raw_damage(raw, growth_step, growth_gain);
            }
            Passive::LastStand {
                surge_below,
                surge_gain,
                ..
            } => {
                let fish = self.fish(target);
                if fish.is_alive() && fish.hp() < surge_below && !fish.surge_fired() {
                    self.fish_mut(target).fire_surge(surge_gain);
                }
            }
            _ => {}
        }
    }

    fn delayed_heal(&mut self, target: Slot) {
        let Some(DelayedKind::Heal { amount }) = self.fish(target).pending_delayed() else {
            return;
        };
        self.fish_mut(target).consume_delayed();
        if self.fish_mut(target).heal(amount) > 0 {
            self.events.push(PublicEvent::Trigger {
                category: TriggerCategory::Healing,
                fish: target,
            });
        }
    }

    fn passive_heal(&mut self, target: Slot) {
        let heal = match self.fish(target).passive() {
            Passive::Mending { heal } => heal,
            Passive::LastStand { heal, .. } => heal,
            _ => return,
        };
        if self.fish_mut(target).heal(heal) > 0 {
            self.events.push(PublicEvent::Trigger {
                category: TriggerCategory::Healing,
                fish: target,
            });
        }
    }

    /// Phase 5. Order: the target's own trigger (counter or death-rattle)
    /// before ally-guard retaliation, guards in ascending position.
    ///
    /// Counter and ally-guard are state conditions on current HP, so they
    /// fire even after a fully negated hit. Both strike enemy attackers
    /// only; the death-rattle strikes the killer regardless of team.
    fn post_attack(&mut self, attacker: Option<Slot>, target: Slot) {
        match self.fish(target).passive() {
            Passive::Counter { below_hp, strike } => {
                if self.fish(target).hp() < below_hp {
                    self.trigger_strike(target, attacker, strike, TriggerCategory::Retaliation, true);
                }
            }
            Passive::LastStand { rattle, .. } => {
                if self.fish(target).hp() == 0 {
                    self.trigger_strike(target, attacker, rattle, TriggerCategory::DeathRattle, false);
                }
            }
            _ => {}
        }

        let guards: SmallVec<[(u8, i32, i32); 4]> = self.teams[target.player]
            .fish()
            .iter()
            .filter(|f| f.is_alive() && f.position() != target.position)
            .filter_map(|f| match f.passive() {
                Passive::AllyGuard { below_hp, strike } => {
                    Some((f.position(), below_hp, strike))
                }
                _ => None,
            })
            .collect();

        for (pos, below_hp, strike) in guards {
            let hurt = self.fish(target);
            if !hurt.is_alive() || hurt.hp() >= below_hp {
                continue;
            }
            let guard = Slot::new(target.player, pos);
            // A guard may have died to an earlier nested chain this phase.
            if self.fish(guard).is_alive() {
                self.trigger_strike(guard, attacker, strike, TriggerCategory::Retaliation, true);
            }
        }
    }

    /// Deliver a retaliation-style strike as a nested hit event.
    fn trigger_strike(
        &mut self,
        striker: Slot,
        attacker: Option<Slot>,
        damage: i32,
        category: TriggerCategory,
        enemies_only: bool,
    ) {
        let Some(attacker) = attacker else {
            return;
        };
        if enemies_only && attacker.player == striker.player {
            return;
        }
        if !self.fish(attacker).is_alive() {
            return;
        }
        self.events.push(PublicEvent::Trigger {
            category,
            fish: striker,
        });
        self.resolve_hit(Some(striker), attacker, damage);
    }
}
