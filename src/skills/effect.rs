//! Skill effect templates.
//!
//! A [`SkillEffect`] is the immutable template stored in a skill definition.
//! When a non-damage effect lands, the engine copies it into a live
//! [`StatusEffectInstance`](crate::effects::StatusEffectInstance) on the
//! target.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::combatants::Stat;

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTag {
    /// Damage via the injected calculator.
    Damage,
    /// Restore health.
    Heal,
    /// Absorb incoming damage while active.
    Shield,
    /// Raise a stat or resistance named by the effect parameter.
    BuffStats,
    /// Lower a stat or resistance named by the effect parameter.
    DebuffStats,
    /// Remove cleansable (harmful) effects.
    Cleanse,
    /// Remove dispellable (beneficial) effects.
    Dispel,
    /// Prevent skill use while active.
    Seal,
    /// Damage at the end of every round while active.
    Burn,
    /// Restore SP.
    RestoreSp,
}

impl EffectTag {
    /// Tags that resolve immediately and never become status instances.
    #[must_use]
    pub const fn is_instantaneous(self) -> bool {
        matches!(
            self,
            EffectTag::Damage
                | EffectTag::Heal
                | EffectTag::Cleanse
                | EffectTag::Dispel
                | EffectTag::RestoreSp
        )
    }
}

/// What happens when a new effect collides with an existing one of equal
/// priority in the same conflict group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackingPolicy {
    /// Replace the existing instance in place.
    #[default]
    NoStackOverwrite,
    /// Keep the existing value, reset its remaining duration.
    RefreshDuration,
    /// Count stacks up to the cap, then overwrite.
    StackUpToN(u32),
    /// Always append, ignoring the conflict group.
    SeparateInstances,
}

/// How resistance affects an application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeModel {
    /// Always applies, resistance is never consulted.
    #[default]
    Full,
    /// Value and duration shrink with resistance.
    Partial,
    /// A resistance roll can block the whole application.
    Resist,
    /// Blocked outright when resistance reaches 1.0.
    Immunity,
}

/// Immutable effect template.
///
/// ```
/// use rpg_combat::skills::{EffectTag, OutcomeModel, SkillEffect, StackingPolicy};
/// use rpg_combat::combatants::Stat;
///
/// let slow = SkillEffect::debuff(Stat::Agility, 5.0, 3)
///     .with_chance(0.75)
///     .in_group("slow", 1)
///     .with_stacking(StackingPolicy::RefreshDuration)
///     .with_outcome(OutcomeModel::Resist, ["slow_resist"]);
///
/// assert_eq!(slow.tag, EffectTag::DebuffStats);
/// assert_eq!(slow.param.as_deref(), Some("agility"));
/// assert_eq!(slow.group(), Some("slow"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillEffect {
    /// What the effect does.
    pub tag: EffectTag,

    /// Magnitude (damage base, heal amount, stat delta, shield pool, ...).
    pub value: f64,

    /// Duration in turns. Non-positive means instantaneous.
    pub duration: i32,

    /// Application chance in `[0, 1]`. Ignored for `Damage`.
    pub chance: f64,

    /// Optional named parameter, e.g. the stat a buff modifies.
    #[serde(default)]
    pub param: Option<String>,

    /// Mutually-exclusive group label. `None` or empty means ungrouped.
    #[serde(default)]
    pub conflict_group: Option<String>,

    /// Priority within the conflict group.
    #[serde(default)]
    pub priority: i32,

    /// Collision rule at equal priority.
    #[serde(default)]
    pub stacking: StackingPolicy,

    /// Resistance model.
    #[serde(default)]
    pub outcome: OutcomeModel,

    /// Resistance names consulted for non-`Full` outcomes, in order.
    #[serde(default)]
    pub resistance_tags: SmallVec<[String; 2]>,
}

impl SkillEffect {
    /// Create an instantaneous, ungrouped, always-landing effect.
    #[must_use]
    pub fn new(tag: EffectTag, value: f64) -> Self {
        Self {
            tag,
            value,
            duration: 0,
            chance: 1.0,
            param: None,
            conflict_group: None,
            priority: 0,
            stacking: StackingPolicy::default(),
            outcome: OutcomeModel::default(),
            resistance_tags: SmallVec::new(),
        }
    }

    /// A damage effect; `value` is handed to the damage calculator.
    #[must_use]
    pub fn damage(value: f64) -> Self {
        Self::new(EffectTag::Damage, value)
    }

    /// An instant heal.
    #[must_use]
    pub fn heal(amount: f64) -> Self {
        Self::new(EffectTag::Heal, amount)
    }

    /// An instant SP restore.
    #[must_use]
    pub fn restore_sp(amount: f64) -> Self {
        Self::new(EffectTag::RestoreSp, amount)
    }

    /// A stat buff lasting `turns`.
    #[must_use]
    pub fn buff(stat: Stat, amount: f64, turns: i32) -> Self {
        Self::new(EffectTag::BuffStats, amount)
            .lasting(turns)
            .with_param(stat.name())
    }

    /// A stat debuff lasting `turns`.
    #[must_use]
    pub fn debuff(stat: Stat, amount: f64, turns: i32) -> Self {
        Self::new(EffectTag::DebuffStats, amount)
            .lasting(turns)
            .with_param(stat.name())
    }

    /// A damage-absorbing shield.
    #[must_use]
    pub fn shield(pool: f64, turns: i32) -> Self {
        Self::new(EffectTag::Shield, pool).lasting(turns)
    }

    /// Damage over time.
    #[must_use]
    pub fn burn(per_round: f64, turns: i32) -> Self {
        Self::new(EffectTag::Burn, per_round).lasting(turns)
    }

    /// Skill lockout.
    #[must_use]
    pub fn seal(turns: i32) -> Self {
        Self::new(EffectTag::Seal, 0.0).lasting(turns)
    }

    /// Set the duration in turns (builder pattern).
    #[must_use]
    pub fn lasting(mut self, turns: i32) -> Self {
        self.duration = turns;
        self
    }

    /// Set the application chance (builder pattern).
    #[must_use]
    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    /// Set the named parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Place the effect in a conflict group (builder pattern).
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>, priority: i32) -> Self {
        self.conflict_group = Some(group.into());
        self.priority = priority;
        self
    }

    /// Set the stacking policy (builder pattern).
    #[must_use]
    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.stacking = stacking;
        self
    }

    /// Set the outcome model and resistance tags (builder pattern).
    #[must_use]
    pub fn with_outcome<I, S>(mut self, outcome: OutcomeModel, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outcome = outcome;
        self.resistance_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The conflict group, treating an empty label as ungrouped.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.conflict_group.as_deref().filter(|g| !g.is_empty())
    }

    /// Does this template resolve without leaving a status instance?
    #[must_use]
    pub fn is_instantaneous(&self) -> bool {
        self.tag.is_instantaneous() || self.duration <= 0
    }
}
