//! Injected collaborators: damage formula and reward hand-out.
//!
//! Both are traits with blanket impls for closures, so tests and small
//! callers can pass a lambda where a server passes a full service.

use crate::combatants::{Combatant, Stat};
use crate::core::CombatantId;
use crate::skills::{Skill, SkillEffect};

/// What the damage calculator is asked to price.
#[derive(Clone, Copy, Debug)]
pub struct DamageRequest<'a> {
    pub skill: &'a Skill,
    pub effect: &'a SkillEffect,
}

/// Damage formula.
///
/// Returning a negative number is a calculator bug; the engine clamps it to
/// zero and logs a warning.
pub trait DamageCalculator {
    fn calculate(&self, attacker: &Combatant, target: &Combatant, request: &DamageRequest<'_>) -> i64;
}

impl<F> DamageCalculator for F
where
    F: Fn(&Combatant, &Combatant, &DamageRequest<'_>) -> i64,
{
    fn calculate(&self, attacker: &Combatant, target: &Combatant, request: &DamageRequest<'_>) -> i64 {
        self(attacker, target, request)
    }
}

/// Told about every defeat, once, after the blow is committed.
pub trait RewardDistributor {
    fn on_defeat(&mut self, attacker: &Combatant, defeated: &Combatant);
}

impl<F> RewardDistributor for F
where
    F: FnMut(&Combatant, &Combatant),
{
    fn on_defeat(&mut self, attacker: &Combatant, defeated: &Combatant) {
        self(attacker, defeated)
    }
}

/// Ignores defeats.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRewards;

impl RewardDistributor for NoRewards {
    fn on_defeat(&mut self, _attacker: &Combatant, _defeated: &Combatant) {}
}

/// Records `(attacker, defeated)` pairs in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefeatLog {
    pub defeats: Vec<(CombatantId, CombatantId)>,
}

impl RewardDistributor for DefeatLog {
    fn on_defeat(&mut self, attacker: &Combatant, defeated: &Combatant) {
        self.defeats.push((attacker.id, defeated.id));
    }
}

/// Reference formula: effect value plus the skill's stat scaling, minus the
/// target's constitution times `mitigation`, rounded and floored at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingDamage {
    pub mitigation: f64,
}

impl Default for ScalingDamage {
    fn default() -> Self {
        Self { mitigation: 1.0 }
    }
}

impl DamageCalculator for ScalingDamage {
    fn calculate(&self, attacker: &Combatant, target: &Combatant, request: &DamageRequest<'_>) -> i64 {
        let offense = request.effect.value + request.skill.scaling.apply(&attacker.effective_stats());
        let defense = target.effective_stat(Stat::Constitution) as f64 * self.mitigation;
        ((offense - defense).round() as i64).max(0)
    }
}
