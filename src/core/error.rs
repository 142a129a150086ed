//! Error types.
//!
//! Two categories share [`CombatError`]:
//!
//! - **Rejections** (`NotFound`, `UnknownSkill`, `InsufficientResource`,
//!   `OnCooldown`, `Sealed`, `NoValidTargets`, `Disobeyed`, `OutOfTurn`): expected,
//!   caller-facing outcomes of a well-formed request against the current
//!   encounter state.
//! - **Integrity faults** (`Integrity`): corrupt content or a combatant that
//!   vanished mid-resolution. They abort the current request only.
//!
//! Neither category ever leaves partial state behind.

use super::entity::{CombatantId, SkillId};

/// Reason a skill-use request produced no results.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("combatant {0} is not part of this encounter")]
    NotFound(CombatantId),

    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("{combatant} has {available} SP but {skill} costs {required}")]
    InsufficientResource {
        combatant: CombatantId,
        skill: SkillId,
        required: i64,
        available: i64,
    },

    #[error("{skill} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("{0} is sealed and cannot use skills")]
    Sealed(CombatantId),

    #[error("{skill} has no valid targets")]
    NoValidTargets { skill: SkillId },

    #[error("pet {0} ignored the command")]
    Disobeyed(CombatantId),

    #[error("it is not {0}'s turn")]
    OutOfTurn(CombatantId),

    #[error("integrity fault: {0}")]
    Integrity(String),
}

impl CombatError {
    /// Is this a data-integrity fault rather than an ordinary rejection?
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, CombatError::Integrity(_))
    }
}

/// Reasons a skill definition is refused by the catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("skill {0} is already registered")]
    Duplicate(SkillId),

    #[error("skill {skill}: effect #{index} has chance {chance} outside [0, 1]")]
    InvalidChance {
        skill: SkillId,
        index: usize,
        chance: f64,
    },

    #[error("skill {skill}: effect #{index} has a non-finite value")]
    NonFiniteValue { skill: SkillId, index: usize },

    #[error("skill {skill}: effect #{index} stacks up to zero")]
    ZeroStackCap { skill: SkillId, index: usize },

    #[error("skill {0} has a negative cost")]
    NegativeCost(SkillId),
}

/// Errors from the turn-management surface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no combatant is currently taking a turn")]
    NoCurrentCombatant,

    #[error("the encounter has no living combatants left")]
    EncounterOver,
}
