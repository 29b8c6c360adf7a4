//! The turn controller - action application.
//!
//! Survival lock-in: the legality lists (who may act, who may be
//! targeted) are fixed when the action starts and hold through its entire
//! resolution, however the HP numbers move in between. Final
//! alive/defeated status commits only at the post-action checkpoint.

use log::debug;
use smallvec::SmallVec;

use crate::catalog::ActiveSkill;
use crate::combat::resolver::Resolver;
use crate::combat::{ActionReport, DelayedKind, PublicEvent, Slot};
use crate::core::{ActionError, GameError, PlayerId};

use super::decision::ActionDecision;
use super::round::{Move, Round, RoundPhase, TurnOutcome, TURN_LIMIT};

/// Validate a decision-supplied position against a lock-in list.
fn require_position(living: &[u8], pos: Option<u8>) -> Result<u8, ActionError> {
    let pos = pos.ok_or(ActionError::MissingTarget)?;
    if living.contains(&pos) {
        Ok(pos)
    } else {
        Err(ActionError::InvalidTarget(pos))
    }
}

impl Round {
    /// Apply the turn owner's mandatory action.
    ///
    /// Rejections leave the round untouched. On success the action fully
    /// resolves (including every nested trigger), defeats commit, the win
    /// condition is evaluated, and the turn passes or the round ends.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        decision: ActionDecision,
    ) -> Result<TurnOutcome, GameError> {
        if self.phase == RoundPhase::Ended {
            return Err(GameError::RoundOver);
        }
        if self.turn_owner != player {
            return Err(ActionError::NotYourTurn(player).into());
        }
        if self.phase != RoundPhase::Action {
            return Err(ActionError::WrongPhase.into());
        }

        let enemy = player.opponent();
        let actor_pos = decision.actor();
        let actor = self.teams[player]
            .get(actor_pos)
            .ok_or(ActionError::InvalidActor(actor_pos))?;
        if !actor.is_alive() {
            return Err(ActionError::ActorDefeated(actor_pos).into());
        }

        // Lock-in: the ATK snapshot and both legality lists are fixed here.
        let snapshot = actor.snapshot_atk();
        let active = actor.active();
        let uses = actor.active_uses();
        let own_living = self.teams[player].living_positions();
        let enemy_living = self.teams[enemy].living_positions();

        let actor_slot = Slot::new(player, actor_pos);
        let mut events: Vec<PublicEvent> = Vec::new();

        let report = match &decision {
            ActionDecision::NormalAttack { target, .. } => {
                let target = require_position(&enemy_living, Some(*target))?;
                let target_slot = Slot::new(enemy, target);
                let applied =
                    self.resolve(&mut events, actor_slot, target_slot, snapshot * 50 / 100);
                ActionReport::NormalAttack {
                    target: target_slot,
                    damage: applied,
                }
            }

            ActionDecision::ActiveSkill {
                teammate,
                enemy: enemy_target,
                ..
            } => match active {
                ActiveSkill::AoeBurst { atk_pct } => {
                    let damage = snapshot * atk_pct / 100;
                    let mut hits = SmallVec::new();
                    for &pos in &enemy_living {
                        let target_slot = Slot::new(enemy, pos);
                        let applied = self.resolve(&mut events, actor_slot, target_slot, damage);
                        hits.push((target_slot, applied));
                    }
                    ActionReport::Aoe { hits }
                }

                ActiveSkill::Sacrifice { cost, atk_gain } => {
                    let mate = require_position(&own_living, *teammate)?;
                    let mate_slot = Slot::new(player, mate);
                    self.resolve(&mut events, actor_slot, mate_slot, cost);
                    self.teams[player]
                        .get_mut(actor_pos)
                        .unwrap()
                        .gain_atk(atk_gain);
                    ActionReport::HarmTeammate {
                        teammate: mate_slot,
                    }
                }

                ActiveSkill::CriticalStrike { damage } => {
                    let target = require_position(&enemy_living, *enemy_target)?;
                    let target_slot = Slot::new(enemy, target);
                    let applied = self.resolve(&mut events, actor_slot, target_slot, damage);
                    ActionReport::Critical {
                        target: target_slot,
                        damage: applied,
                    }
                }

                ActiveSkill::Ward {
                    reduce_pct,
                    atk_gain,
                } => {
                    let mate = require_position(&own_living, *teammate)?;
                    self.teams[player]
                        .get_mut(mate)
                        .unwrap()
                        .set_delayed(DelayedKind::Reduce { pct: reduce_pct });
                    self.teams[player]
                        .get_mut(actor_pos)
                        .unwrap()
                        .gain_atk(atk_gain);
                    ActionReport::NoObviousEffect
                }

                ActiveSkill::Succor {
                    heal,
                    strike,
                    strike_uses,
                } => {
                    let mate = require_position(&own_living, *teammate)?;
                    // Validate the strike target before mutating anything.
                    let strike_target = if uses < strike_uses {
                        Some(require_position(&enemy_living, *enemy_target)?)
                    } else {
                        None
                    };

                    self.teams[player]
                        .get_mut(mate)
                        .unwrap()
                        .set_delayed(DelayedKind::Heal { amount: heal });

                    match strike_target {
                        Some(target) => {
                            let target_slot = Slot::new(enemy, target);
                            let applied =
                                self.resolve(&mut events, actor_slot, target_slot, strike);
                            ActionReport::Critical {
                                target: target_slot,
                                damage: applied,
                            }
                        }
                        None => ActionReport::NoObviousEffect,
                    }
                }

                ActiveSkill::Hunt {
                    atk_pct,
                    frenzy_pct,
                    frenzy_below,
                } => {
                    // Lowest current HP; min_by_key keeps the lowest
                    // position on ties.
                    let target = enemy_living
                        .iter()
                        .copied()
                        .min_by_key(|&pos| self.teams[enemy].get(pos).unwrap().hp())
                        .expect("an unfinished round always has a living enemy");
                    let target_hp = self.teams[enemy].get(target).unwrap().hp();
                    let pct = if target_hp < frenzy_below {
                        frenzy_pct
                    } else {
                        atk_pct
                    };
                    let target_slot = Slot::new(enemy, target);
                    let applied =
                        self.resolve(&mut events, actor_slot, target_slot, snapshot * pct / 100);
                    ActionReport::Critical {
                        target: target_slot,
                        damage: applied,
                    }
                }

                ActiveSkill::ShareWard {
                    keep_pct,
                    burst_pct,
                    burst_uses,
                } => {
                    let mate = require_position(&own_living, *teammate)?;
                    self.teams[player]
                        .get_mut(mate)
                        .unwrap()
                        .set_delayed(DelayedKind::Share { keep_pct });

                    if uses < burst_uses {
                        let damage = snapshot * burst_pct / 100;
                        let mut hits = SmallVec::new();
                        for &pos in &enemy_living {
                            let target_slot = Slot::new(enemy, pos);
                            let applied =
                                self.resolve(&mut events, actor_slot, target_slot, damage);
                            hits.push((target_slot, applied));
                        }
                        ActionReport::Aoe { hits }
                    } else {
                        ActionReport::NoObviousEffect
                    }
                }

                ActiveSkill::Mimicry => unreachable!("mimic skills are resolved at selection"),
            },
        };

        if matches!(decision, ActionDecision::ActiveSkill { .. }) {
            self.teams[player]
                .get_mut(actor_pos)
                .unwrap()
                .count_active_use();
        }

        // Post-action checkpoint: defeats commit, consumed slots clear.
        for p in PlayerId::both() {
            self.teams[p].checkpoint();
        }

        events.insert(
            0,
            PublicEvent::Action {
                player,
                actor: actor_slot,
                report,
            },
        );
        self.record_move(player, Move::Action(decision));
        self.publish(&events);

        self.turn_no += 1;
        debug!("turn {} complete ({} acted)", self.turn_no, player);

        if let Some(result) = self.evaluate_elimination(player) {
            self.finish(result);
        } else if self.turn_no >= TURN_LIMIT {
            let result = self.turn_limit_result();
            self.finish(result);
        } else {
            self.turn_owner = enemy;
            self.phase = RoundPhase::Assertion;
        }

        Ok(TurnOutcome {
            events,
            result: self.result,
        })
    }

    fn resolve(
        &mut self,
        events: &mut Vec<PublicEvent>,
        attacker: Slot,
        target: Slot,
        amount: i32,
    ) -> i32 {
        Resolver::new(&mut self.teams, &mut self.rng, events).resolve_hit(
            Some(attacker),
            target,
            amount,
        )
    }
}
