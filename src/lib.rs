//! # aquawar
//!
//! Deterministic combat core for Aquawar: a two-player, best-of-three,
//! turn-based duel fought with hidden fish identities.
//!
//! ## Design Principles
//!
//! 1. **Data-driven skills**: twelve fish share one five-phase resolver;
//!    each fish is a pair of tagged skill variants, not a subclass.
//!
//! 2. **Synchronous apply-decision API**: the core never waits. Every
//!    entrypoint validates in full, then either mutates or rejects with
//!    state unchanged. Time budgets and agent plumbing live in the caller,
//!    which reports a forfeit as a terminal input when they are violated.
//!
//! 3. **Replayable randomness**: the only random draws (dodge rolls) come
//!    from a seeded ChaCha8 stream owned by the round, so (seed, decision
//!    sequence) replays bit-for-bit.
//!
//! ## Modules
//!
//! - `core`: player ids, deterministic RNG, error taxonomy
//! - `catalog`: the twelve fish definitions and selection validation
//! - `combat`: entities, teams, the effect pipeline, the public event log
//! - `game`: decisions, turn/round state machines, the best-of-three series

pub mod catalog;
pub mod combat;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ActionError, AssertionError, ForfeitReason, GameError, GameRng, GameRngState, PerPlayer,
    PlayerId, SelectionError,
};

pub use crate::catalog::{
    ActiveSkill, FishCatalog, FishDefinition, FishId, Passive, BASE_ATK, MAX_HP,
};

pub use crate::combat::{
    ActionReport, CombatFish, DelayedEffect, DelayedKind, PublicEvent, Slot, Team,
    TriggerCategory,
};

pub use crate::game::{
    ActionDecision, AssertionDecision, MatchController, MatchResult, Move, MoveRecord, Round,
    RoundPhase, RoundResult, SelectionDecision, Tiebreaker, TurnOutcome, WinReason,
    ASSERTION_PENALTY, ROUNDS_TO_WIN, TURN_LIMIT,
};
