//! The fish catalog: static definitions of the twelve fish.

pub mod definition;
pub mod registry;
pub mod skill;

pub use definition::{FishDefinition, FishId, BASE_ATK, MAX_HP};
pub use registry::FishCatalog;
pub use skill::{ActiveSkill, Passive};
