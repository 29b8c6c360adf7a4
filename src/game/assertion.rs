//! The assertion system - pre-action identity guesses.
//!
//! Assertion HP loss never enters the effect pipeline: no shield, dodge,
//! sharing, retaliation or death-rattle reacts to it, and nothing beyond
//! the assertion outcome itself reaches the public log.

use log::debug;

use crate::combat::{PublicEvent, Slot};
use crate::core::{AssertionError, GameError, PlayerId};

use super::decision::AssertionDecision;
use super::round::{Move, Round, RoundPhase, RoundResult, TurnOutcome, WinReason};

/// HP every living fish on the punished side loses.
pub const ASSERTION_PENALTY: i32 = 50;

impl Round {
    /// Apply the turn owner's assertion decision.
    ///
    /// A skip costs nothing. A guess must name a living, hidden enemy
    /// fish: on success the target is revealed and every living enemy
    /// loses 50 HP; on failure every living fish of the caller loses 50 HP
    /// instead. Either way the turn advances to its action window.
    ///
    /// A Mimic Fish matches only the declaration "Mimic Fish"; declaring
    /// its companion's name fails like any other wrong guess.
    pub fn apply_assertion(
        &mut self,
        player: PlayerId,
        decision: AssertionDecision,
    ) -> Result<TurnOutcome, GameError> {
        if self.phase == RoundPhase::Ended {
            return Err(GameError::RoundOver);
        }
        if self.turn_owner != player {
            return Err(AssertionError::NotYourTurn(player).into());
        }
        if self.phase != RoundPhase::Assertion {
            return Err(AssertionError::WrongPhase.into());
        }

        let mut events = Vec::new();

        if let AssertionDecision::Assert { target, name } = &decision {
            let enemy = player.opponent();
            let target_pos = *target;

            let fish = self.teams[enemy]
                .get(target_pos)
                .ok_or(AssertionError::InvalidTarget(target_pos))?;
            if !fish.is_alive() {
                return Err(AssertionError::TargetDefeated(target_pos).into());
            }
            if fish.revealed() {
                return Err(AssertionError::TargetRevealed(target_pos).into());
            }
            let identity = fish.identity();
            let declared = self
                .catalog
                .by_name(name)
                .ok_or_else(|| AssertionError::UnknownFish(name.clone()))?;

            let success = declared == identity;
            let punished = if success { enemy } else { player };

            debug!(
                "{} asserts {:?} at {}: {}",
                player,
                name,
                target_pos,
                if success { "correct" } else { "wrong" }
            );

            if success {
                self.teams[enemy].get_mut(target_pos).unwrap().reveal();
            }
            for pos in self.teams[punished].living_positions() {
                self.teams[punished]
                    .get_mut(pos)
                    .unwrap()
                    .apply_non_damage_hp_loss(ASSERTION_PENALTY);
            }

            events.push(PublicEvent::Assertion {
                player,
                target: Slot::new(enemy, target_pos),
                success,
                revealed: success.then(|| self.fish_name(identity).to_string()),
            });

            // The penalty can wipe out an entire team; the round cannot
            // continue into an action with no legal actor.
            if self.teams[punished].is_eliminated() {
                self.finish(RoundResult {
                    winner: punished.opponent(),
                    reason: WinReason::Elimination,
                });
            }
        }

        if !self.is_over() {
            self.phase = RoundPhase::Action;
        }
        self.record_move(player, Move::Assertion(decision));
        self.publish(&events);

        Ok(TurnOutcome {
            events,
            result: self.result,
        })
    }
}
