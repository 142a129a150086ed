//! Collaborators threaded through every mutating call.

use super::collaborators::{DamageCalculator, RewardDistributor};
use crate::core::RandomSource;
use crate::skills::SkillCatalog;

/// Everything the engine borrows from its host for one call.
///
/// Nothing here is global: a server builds one per request (or reuses one
/// per encounter), tests build one per case.
pub struct CombatContext<'a> {
    /// Read-only skill definitions.
    pub catalog: &'a dyn SkillCatalog,

    /// Damage formula.
    pub damage: &'a dyn DamageCalculator,

    /// Defeat notifications.
    pub rewards: &'a mut dyn RewardDistributor,

    /// Context-addressed random source.
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> CombatContext<'a> {
    /// Create a new context.
    pub fn new(
        catalog: &'a dyn SkillCatalog,
        damage: &'a dyn DamageCalculator,
        rewards: &'a mut dyn RewardDistributor,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            catalog,
            damage,
            rewards,
            rng,
        }
    }
}
