//! Combatant model: stats, per-combatant state, and the encounter roster.

mod combatant;
mod roster;
mod stats;

pub use combatant::{Combatant, CombatantKind, Team};
pub use roster::Roster;
pub use stats::{Stat, Stats};
