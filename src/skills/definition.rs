//! Skill definitions - static skill data.
//!
//! A `Skill` is loaded once from content and never mutated at runtime.
//! Per-combatant state (cooldowns) lives on the combatant.

use serde::{Deserialize, Serialize};

use super::effect::{SkillEffect, StackingPolicy};
use crate::combatants::{Stat, Stats};
use crate::core::{CatalogError, SkillId};

/// Who a skill can affect.
///
/// The row/column/cross variants are grid shapes. Grid positioning is not
/// modelled yet, so they resolve like their single-target counterparts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    #[serde(rename = "Self")]
    Self_,
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
    RowEnemies,
    ColumnEnemies,
    CrossEnemies,
    RowAllies,
}

/// Per-stat coefficients applied to the attacker's effective stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scaling {
    pub strength: f64,
    pub constitution: f64,
    pub intelligence: f64,
    pub wisdom: f64,
    pub agility: f64,
}

impl Scaling {
    /// No scaling.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            strength: 0.0,
            constitution: 0.0,
            intelligence: 0.0,
            wisdom: 0.0,
            agility: 0.0,
        }
    }

    /// Coefficient for a stat.
    #[must_use]
    pub const fn coefficient(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Constitution => self.constitution,
            Stat::Intelligence => self.intelligence,
            Stat::Wisdom => self.wisdom,
            Stat::Agility => self.agility,
        }
    }

    /// Set a coefficient (builder pattern).
    #[must_use]
    pub fn with(mut self, stat: Stat, coefficient: f64) -> Self {
        match stat {
            Stat::Strength => self.strength = coefficient,
            Stat::Constitution => self.constitution = coefficient,
            Stat::Intelligence => self.intelligence = coefficient,
            Stat::Wisdom => self.wisdom = coefficient,
            Stat::Agility => self.agility = coefficient,
        }
        self
    }

    /// Weighted sum of `stats`.
    #[must_use]
    pub fn apply(&self, stats: &Stats) -> f64 {
        Stat::ALL
            .into_iter()
            .map(|s| self.coefficient(s) * stats.get(s) as f64)
            .sum()
    }
}

/// Static skill definition.
///
/// ```
/// use rpg_combat::core::SkillId;
/// use rpg_combat::skills::{Skill, SkillEffect, TargetType};
///
/// let fireball = Skill::new(SkillId::new(1), "Fireball", TargetType::SingleEnemy)
///     .with_cost(12)
///     .with_cooldown(2)
///     .with_effect(SkillEffect::damage(30.0))
///     .with_effect(SkillEffect::burn(4.0, 3).with_chance(0.5));
///
/// assert_eq!(fireball.effects.len(), 2);
/// assert!(fireball.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique identifier.
    pub id: SkillId,

    /// Display name (for logs and debugging).
    pub name: String,

    /// SP cost.
    pub cost: i64,

    /// Cooldown length in turns.
    pub cooldown: u32,

    /// Targeting rule.
    pub target: TargetType,

    /// Effects, resolved in order for every target.
    pub effects: Vec<SkillEffect>,

    /// Stat scaling for calculators that use it.
    #[serde(default)]
    pub scaling: Scaling,
}

impl Skill {
    /// Create a free, cooldown-less skill with no effects.
    #[must_use]
    pub fn new(id: SkillId, name: impl Into<String>, target: TargetType) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 0,
            cooldown: 0,
            target,
            effects: Vec::new(),
            scaling: Scaling::none(),
        }
    }

    /// Set the SP cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set stat scaling (builder pattern).
    #[must_use]
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Check the definition for data that would corrupt resolution.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.cost < 0 {
            return Err(CatalogError::NegativeCost(self.id));
        }

        for (index, effect) in self.effects.iter().enumerate() {
            if !(0.0..=1.0).contains(&effect.chance) {
                return Err(CatalogError::InvalidChance {
                    skill: self.id,
                    index,
                    chance: effect.chance,
                });
            }
            if !effect.value.is_finite() {
                return Err(CatalogError::NonFiniteValue { skill: self.id, index });
            }
            if effect.stacking == StackingPolicy::StackUpToN(0) {
                return Err(CatalogError::ZeroStackCap { skill: self.id, index });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_apply() {
        let scaling = Scaling::none()
            .with(Stat::Strength, 2.0)
            .with(Stat::Agility, 0.5);
        let stats = Stats::new(10, 0, 0, 0, 8);

        assert_eq!(scaling.apply(&stats), 24.0);
    }

    #[test]
    fn test_validate_rejects_bad_chance() {
        let skill = Skill::new(SkillId(1), "Bad", TargetType::SingleEnemy)
            .with_effect(SkillEffect::seal(1).with_chance(1.5));

        assert_eq!(
            skill.validate(),
            Err(CatalogError::InvalidChance {
                skill: SkillId(1),
                index: 0,
                chance: 1.5
            })
        );
    }

    #[test]
    fn test_validate_rejects_nan_chance() {
        let skill = Skill::new(SkillId(1), "Bad", TargetType::SingleEnemy)
            .with_effect(SkillEffect::seal(1).with_chance(f64::NAN));

        assert!(matches!(
            skill.validate(),
            Err(CatalogError::InvalidChance { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_stack_cap() {
        let skill = Skill::new(SkillId(2), "Bad", TargetType::SingleEnemy)
            .with_effect(SkillEffect::heal(1.0))
            .with_effect(SkillEffect::burn(1.0, 2).with_stacking(StackingPolicy::StackUpToN(0)));

        assert_eq!(
            skill.validate(),
            Err(CatalogError::ZeroStackCap { skill: SkillId(2), index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_infinite_value() {
        let skill = Skill::new(SkillId(3), "Bad", TargetType::Self_)
            .with_effect(SkillEffect::heal(f64::INFINITY));

        assert_eq!(
            skill.validate(),
            Err(CatalogError::NonFiniteValue { skill: SkillId(3), index: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_negative_cost() {
        let skill = Skill::new(SkillId(4), "Bad", TargetType::Self_).with_cost(-1);
        assert_eq!(skill.validate(), Err(CatalogError::NegativeCost(SkillId(4))));
    }

    #[test]
    fn test_target_type_self_serializes_as_self() {
        assert_eq!(serde_json::to_string(&TargetType::Self_).unwrap(), "\"Self\"");
    }
}
