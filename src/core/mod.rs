//! Core types: player identity, deterministic RNG, error taxonomy.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{ActionError, AssertionError, ForfeitReason, GameError, SelectionError};
pub use player::{PerPlayer, PlayerId};
pub use rng::{GameRng, GameRngState};
