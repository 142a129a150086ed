//! Identifiers for combatants and skills.
//!
//! Both are opaque integers. Combatant ids are allocated by whoever spawns
//! participants into an encounter (session layer, world triggers); skill ids
//! come from the content catalog.
//!
//! ```
//! use rpg_combat::core::{CombatantId, SkillId};
//!
//! let hero = CombatantId::new(1);
//! let fireball = SkillId::new(300);
//!
//! assert_eq!(hero.raw(), 1);
//! assert_eq!(format!("{}", fireball), "Skill(300)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a combat participant within an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Create a new combatant ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CombatantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combatant({})", self.0)
    }
}

/// Identifier of a skill definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl SkillId {
    /// Create a new skill ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for SkillId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skill({})", self.0)
    }
}
