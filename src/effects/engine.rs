//! Status effect rules: resistance gating, conflict groups, stacking, expiry.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::instance::{StatusEffectInstance, StatusEffects};
use crate::core::{contexts, RandomSource};
use crate::skills::{OutcomeModel, StackingPolicy};

/// What `apply` did with an incoming effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// Added as a new slot.
    Appended,
    /// Overwrote the effect holding its conflict group.
    Replaced,
    /// Reset the existing effect's remaining duration.
    Refreshed,
    /// Added a stack; carries the new count.
    Stacked(u32),
    /// Lost to a higher-priority effect, or had nothing left to persist.
    Discarded,
    /// Blocked or fully reduced by resistance.
    Resisted,
    /// Blocked by immunity.
    Immune,
}

impl ApplyOutcome {
    /// Did the target's effect list change?
    #[must_use]
    pub fn landed(self) -> bool {
        matches!(
            self,
            ApplyOutcome::Appended
                | ApplyOutcome::Replaced
                | ApplyOutcome::Refreshed
                | ApplyOutcome::Stacked(_)
        )
    }
}

/// Stateless rules engine over a combatant's [`StatusEffects`].
pub struct StatusEffectEngine;

impl StatusEffectEngine {
    /// Apply an effect instance to a target's effect list.
    ///
    /// Resistance is evaluated before anything is touched, so a resisted
    /// effect leaves the list exactly as it was.
    pub fn apply(
        effects: &mut StatusEffects,
        mut incoming: StatusEffectInstance,
        rng: &mut dyn RandomSource,
    ) -> ApplyOutcome {
        if let Some(blocked) = Self::gate(effects, &mut incoming, rng) {
            debug!(tag = ?incoming.tag, outcome = ?blocked, "effect blocked by resistance");
            return blocked;
        }
        if incoming.duration <= 0 {
            return ApplyOutcome::Discarded;
        }

        let slot = if incoming.stacking == StackingPolicy::SeparateInstances {
            None
        } else {
            incoming.group().and_then(|g| effects.group_slot(g))
        };
        let Some(slot) = slot else {
            effects.push(incoming);
            return ApplyOutcome::Appended;
        };

        let existing = effects.slot_mut(slot);
        match incoming.priority.cmp(&existing.priority) {
            Ordering::Greater => {
                effects.replace(slot, incoming);
                ApplyOutcome::Replaced
            }
            Ordering::Less => ApplyOutcome::Discarded,
            Ordering::Equal => match incoming.stacking {
                StackingPolicy::RefreshDuration => {
                    existing.duration = incoming.duration;
                    existing.turns_remaining = incoming.duration;
                    ApplyOutcome::Refreshed
                }
                StackingPolicy::StackUpToN(cap) if existing.stacks < cap => {
                    existing.stacks += 1;
                    existing.turns_remaining = incoming.duration;
                    ApplyOutcome::Stacked(existing.stacks)
                }
                StackingPolicy::StackUpToN(_) => {
                    incoming.stacks = existing.stacks;
                    effects.replace(slot, incoming);
                    ApplyOutcome::Replaced
                }
                StackingPolicy::NoStackOverwrite => {
                    effects.replace(slot, incoming);
                    ApplyOutcome::Replaced
                }
                StackingPolicy::SeparateInstances => {
                    effects.push(incoming);
                    ApplyOutcome::Appended
                }
            },
        }
    }

    /// Remove every effect matching `pred` and return them.
    pub fn remove_all<F>(effects: &mut StatusEffects, pred: F) -> Vec<StatusEffectInstance>
    where
        F: FnMut(&StatusEffectInstance) -> bool,
    {
        effects.remove_where(pred)
    }

    /// Advance every effect by one turn and return the ones that expired.
    pub fn tick(effects: &mut StatusEffects) -> Vec<StatusEffectInstance> {
        effects.tick()
    }

    /// Resistance check. Returns the blocking outcome, or `None` to continue
    /// with a possibly scaled-down `incoming`.
    fn gate(
        effects: &StatusEffects,
        incoming: &mut StatusEffectInstance,
        rng: &mut dyn RandomSource,
    ) -> Option<ApplyOutcome> {
        if incoming.outcome == OutcomeModel::Full || incoming.resistance_tags.is_empty() {
            return None;
        }

        let resistance = incoming
            .resistance_tags
            .iter()
            .find_map(|tag| effects.modifier(tag))
            .unwrap_or(0.0);
        let sample = rng.next_float(contexts::RESISTANCE_ROLL);

        match incoming.outcome {
            OutcomeModel::Full => None,
            OutcomeModel::Resist => (sample < resistance).then_some(ApplyOutcome::Resisted),
            OutcomeModel::Immunity => (resistance >= 1.0).then_some(ApplyOutcome::Immune),
            OutcomeModel::Partial => {
                let factor = 1.0 - resistance.clamp(0.0, 1.0);
                let duration = (f64::from(incoming.duration) * factor).floor() as i32;
                if duration <= 0 {
                    return Some(ApplyOutcome::Resisted);
                }
                incoming.value *= factor;
                incoming.duration = duration;
                incoming.turns_remaining = duration;
                None
            }
        }
    }
}
