//! Core engine types: identifiers, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these. None of them know about
//! combatants or skills beyond their ids.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{CombatantId, SkillId};
pub use rng::{contexts, GameRng, GameRngState, RandomSource, RandomState, SeededRandom};
pub use config::EngineConfig;
pub use error::{CatalogError, CombatError, TurnError};
