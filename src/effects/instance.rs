//! Live status effects and the per-combatant effect arena.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CombatantId, SkillId};
use crate::skills::{EffectTag, OutcomeModel, SkillEffect, StackingPolicy};

/// A status effect attached to a combatant.
///
/// Copied from a [`SkillEffect`] template when it lands. The template's
/// application chance is not carried over: by the time an instance exists the
/// roll has already succeeded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub tag: EffectTag,
    pub value: f64,

    /// Duration the instance was applied with.
    pub duration: i32,

    /// Turns left before expiry.
    pub turns_remaining: i32,

    pub param: Option<String>,
    pub conflict_group: Option<String>,
    pub priority: i32,
    pub stacking: StackingPolicy,
    pub outcome: OutcomeModel,
    pub resistance_tags: SmallVec<[String; 2]>,

    /// Stack count, at least 1.
    pub stacks: u32,

    /// Who applied it.
    pub source: CombatantId,

    /// Skill that applied it, if any.
    pub skill: Option<SkillId>,
}

impl StatusEffectInstance {
    /// Instantiate a template.
    #[must_use]
    pub fn from_template(effect: &SkillEffect, source: CombatantId, skill: Option<SkillId>) -> Self {
        Self {
            tag: effect.tag,
            value: effect.value,
            duration: effect.duration,
            turns_remaining: effect.duration,
            param: effect.param.clone(),
            conflict_group: effect.conflict_group.clone(),
            priority: effect.priority,
            stacking: effect.stacking,
            outcome: effect.outcome,
            resistance_tags: effect.resistance_tags.clone(),
            stacks: 1,
            source,
            skill,
        }
    }

    /// The conflict group, treating an empty label as ungrouped.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.conflict_group.as_deref().filter(|g| !g.is_empty())
    }

    /// Value multiplied by stacks.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.value * f64::from(self.stacks)
    }

    /// Whether this instance occupies its conflict group's slot.
    fn is_indexed(&self) -> bool {
        self.stacking != StackingPolicy::SeparateInstances && self.group().is_some()
    }
}

/// Ordered arena of a combatant's active effects.
///
/// Slots keep application order. Grouped entries are indexed by conflict
/// group so a collision is found without a scan; `SeparateInstances`
/// entries live outside the index and never collide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StatusEffectInstance>", into = "Vec<StatusEffectInstance>")]
pub struct StatusEffects {
    slots: Vec<StatusEffectInstance>,
    by_group: FxHashMap<String, usize>,
}

impl StatusEffects {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.slots.iter()
    }

    /// The indexed effect holding a conflict group.
    #[must_use]
    pub fn in_group(&self, group: &str) -> Option<&StatusEffectInstance> {
        self.by_group.get(group).map(|&slot| &self.slots[slot])
    }

    /// Is any effect with this tag active?
    #[must_use]
    pub fn has(&self, tag: EffectTag) -> bool {
        self.slots.iter().any(|e| e.tag == tag)
    }

    /// Net buff/debuff value for a parameter name.
    ///
    /// `None` when no buff or debuff names the parameter, so callers can tell
    /// "no modifier" from "modifiers cancelling out".
    #[must_use]
    pub fn modifier(&self, param: &str) -> Option<f64> {
        let mut found = false;
        let mut total = 0.0;
        for effect in &self.slots {
            if effect.param.as_deref() != Some(param) {
                continue;
            }
            match effect.tag {
                EffectTag::BuffStats => total += effect.magnitude(),
                EffectTag::DebuffStats => total -= effect.magnitude(),
                _ => continue,
            }
            found = true;
        }
        found.then_some(total)
    }

    /// Absorb `damage` with active shields, oldest first.
    ///
    /// Returns `(remaining, absorbed)`. Depleted shields are removed.
    pub fn absorb(&mut self, damage: i64) -> (i64, i64) {
        let mut remaining = damage.max(0);
        for shield in self.slots.iter_mut().filter(|e| e.tag == EffectTag::Shield) {
            if remaining == 0 {
                break;
            }
            let pool = shield.magnitude().max(0.0).floor() as i64;
            let taken = pool.min(remaining);
            remaining -= taken;
            shield.value = (pool - taken) as f64;
            shield.stacks = 1;
        }

        let before = self.slots.len();
        self.slots
            .retain(|e| !(e.tag == EffectTag::Shield && e.value <= 0.0));
        if self.slots.len() != before {
            self.rebuild_index();
        }

        (remaining, damage.max(0) - remaining)
    }

    pub(crate) fn group_slot(&self, group: &str) -> Option<usize> {
        self.by_group.get(group).copied()
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut StatusEffectInstance {
        &mut self.slots[slot]
    }

    pub(crate) fn push(&mut self, instance: StatusEffectInstance) {
        if instance.is_indexed() {
            if let Some(group) = instance.group() {
                self.by_group.entry(group.to_string()).or_insert(self.slots.len());
            }
        }
        self.slots.push(instance);
    }

    /// Overwrite an indexed slot with an instance of the same group.
    pub(crate) fn replace(&mut self, slot: usize, instance: StatusEffectInstance) {
        self.slots[slot] = instance;
    }

    /// Remove every effect matching `pred`, keeping the rest in order.
    pub(crate) fn remove_where<F>(&mut self, mut pred: F) -> Vec<StatusEffectInstance>
    where
        F: FnMut(&StatusEffectInstance) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.slots).into_iter().partition(|e| pred(e));
        self.slots = kept;
        if !removed.is_empty() {
            self.rebuild_index();
        }
        removed
    }

    /// Decrement every effect, returning the ones that expired.
    pub(crate) fn tick(&mut self) -> Vec<StatusEffectInstance> {
        for effect in &mut self.slots {
            effect.turns_remaining -= 1;
        }
        self.remove_where(|e| e.turns_remaining <= 0)
    }

    fn rebuild_index(&mut self) {
        self.by_group.clear();
        for (slot, effect) in self.slots.iter().enumerate() {
            if !effect.is_indexed() {
                continue;
            }
            if let Some(group) = effect.group() {
                self.by_group.entry(group.to_string()).or_insert(slot);
            }
        }
    }
}

impl From<Vec<StatusEffectInstance>> for StatusEffects {
    fn from(slots: Vec<StatusEffectInstance>) -> Self {
        let mut effects = Self {
            slots,
            by_group: FxHashMap::default(),
        };
        effects.rebuild_index();
        effects
    }
}

impl From<StatusEffects> for Vec<StatusEffectInstance> {
    fn from(effects: StatusEffects) -> Self {
        effects.slots
    }
}
