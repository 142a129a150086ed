//! Skill catalog.
//!
//! The engine only needs read access to skill definitions, expressed by the
//! [`SkillCatalog`] trait. [`SkillRegistry`] is the in-memory catalog the
//! content loader fills at startup and then shares immutably.

use rustc_hash::FxHashMap;

use super::definition::Skill;
use crate::core::{CatalogError, SkillId};

/// Read-only skill lookup.
pub trait SkillCatalog {
    /// Get a skill definition by ID.
    fn get(&self, id: SkillId) -> Option<&Skill>;
}

/// Registry of skill definitions.
///
/// ## Example
///
/// ```
/// use rpg_combat::core::SkillId;
/// use rpg_combat::skills::{Skill, SkillCatalog, SkillEffect, SkillRegistry, TargetType};
///
/// let mut registry = SkillRegistry::new();
///
/// let slash = Skill::new(SkillId::new(1), "Slash", TargetType::SingleEnemy)
///     .with_effect(SkillEffect::damage(5.0));
///
/// registry.register(slash).unwrap();
///
/// let found = registry.get(SkillId::new(1)).unwrap();
/// assert_eq!(found.name, "Slash");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    skills: FxHashMap<SkillId, Skill>,
}

impl SkillRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill definition after validating it.
    pub fn register(&mut self, skill: Skill) -> Result<(), CatalogError> {
        if self.skills.contains_key(&skill.id) {
            return Err(CatalogError::Duplicate(skill.id));
        }
        skill.validate()?;

        tracing::debug!(skill = %skill.id, name = %skill.name, "registered skill");
        self.skills.insert(skill.id, skill);
        Ok(())
    }

    /// Register several skills, stopping at the first invalid one.
    pub fn register_all(
        &mut self,
        skills: impl IntoIterator<Item = Skill>,
    ) -> Result<(), CatalogError> {
        for skill in skills {
            self.register(skill)?;
        }
        Ok(())
    }

    /// Check if a skill ID is registered.
    #[must_use]
    pub fn contains(&self, id: SkillId) -> bool {
        self.skills.contains_key(&id)
    }

    /// Get the number of registered skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Iterate over all skill definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }
}

impl SkillCatalog for SkillRegistry {
    fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }
}
