//! Skill-use resolution.
//!
//! `use_skill` is the only operation that applies a skill to an encounter.
//! It runs in three stages:
//!
//! 1. **Validate** in a fixed order; the first failure is returned and
//!    nothing is touched.
//! 2. **Stage**: clone every target and resolve the skill's effects against
//!    the clones, collecting results and events on the side.
//! 3. **Commit**: write the clones back, retire the dead, pay rewards,
//!    charge the attacker, publish events.
//!
//! Every fallible step happens before the commit, so a request either
//! applies fully or not at all.

use tracing::{debug, error, warn};

use super::collaborators::DamageRequest;
use super::context::CombatContext;
use super::encounter::Encounter;
use super::event::CombatEvent;
use super::result::CombatResult;
use crate::combatants::{Combatant, CombatantKind};
use crate::core::{contexts, CombatError, CombatantId, EngineConfig, SkillId};
use crate::effects::{StatusEffectEngine, StatusEffectInstance, TargetResolver};
use crate::skills::{EffectTag, Skill, SkillEffect};

/// A request to use a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkillRequest {
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub skill: SkillId,
}

/// Targets after resolution, before commit.
struct Staged {
    targets: Vec<Combatant>,
    results: Vec<CombatResult>,
    events: Vec<CombatEvent>,
}

/// Resolves skill use against an encounter.
pub struct CombatOrchestrator;

impl CombatOrchestrator {
    /// Validate and apply a skill, returning one result per affected target.
    pub fn use_skill(
        encounter: &mut Encounter,
        ctx: &mut CombatContext<'_>,
        request: SkillRequest,
    ) -> Result<Vec<CombatResult>, CombatError> {
        let span = tracing::debug_span!(
            "use_skill",
            attacker = %request.attacker,
            target = %request.target,
            skill = %request.skill,
        );
        let _enter = span.enter();

        let (skill, targets) = Self::validate(encounter, ctx, request).map_err(|err| {
            if err.is_fault() {
                error!(error = %err, "skill use aborted");
            } else {
                warn!(error = %err, "skill use rejected");
            }
            err
        })?;

        let staged = Self::stage(encounter, ctx, request.attacker, skill, &targets)?;
        Ok(Self::commit(encounter, ctx, request.attacker, skill, targets, staged))
    }

    fn validate<'c>(
        encounter: &Encounter,
        ctx: &mut CombatContext<'c>,
        request: SkillRequest,
    ) -> Result<(&'c Skill, Vec<CombatantId>), CombatError> {
        let roster = &encounter.roster;
        let attacker = roster
            .get(request.attacker)
            .ok_or(CombatError::NotFound(request.attacker))?;
        let primary = roster
            .get(request.target)
            .ok_or(CombatError::NotFound(request.target))?;

        let catalog = ctx.catalog;
        let skill = catalog
            .get(request.skill)
            .ok_or(CombatError::UnknownSkill(request.skill))?;
        skill
            .validate()
            .map_err(|err| CombatError::Integrity(format!("corrupt skill definition: {err}")))?;

        if attacker.sp() < skill.cost {
            return Err(CombatError::InsufficientResource {
                combatant: attacker.id,
                skill: skill.id,
                required: skill.cost,
                available: attacker.sp(),
            });
        }

        let remaining = attacker.cooldown(skill.id);
        if remaining > 0 {
            return Err(CombatError::OnCooldown {
                skill: skill.id,
                remaining,
            });
        }

        if attacker.is_sealed() {
            return Err(CombatError::Sealed(attacker.id));
        }

        let targets = TargetResolver::resolve(skill.target, attacker, Some(primary), roster);
        if targets.is_empty() {
            return Err(CombatError::NoValidTargets { skill: skill.id });
        }

        if let CombatantKind::Pet { obedience, .. } = attacker.kind {
            if obedience < 1.0 {
                let sample = ctx.rng.next_float(contexts::PET_OBEDIENCE);
                if sample >= obedience {
                    return Err(CombatError::Disobeyed(attacker.id));
                }
            }
        }

        Ok((skill, targets))
    }

    fn stage(
        encounter: &Encounter,
        ctx: &mut CombatContext<'_>,
        attacker_id: CombatantId,
        skill: &Skill,
        targets: &[CombatantId],
    ) -> Result<Staged, CombatError> {
        let roster = &encounter.roster;
        let vanished = |id: CombatantId| {
            let err = CombatError::Integrity(format!("combatant {id} vanished mid-resolution"));
            error!(error = %err, "skill use aborted");
            err
        };
        let attacker = roster.get(attacker_id).ok_or_else(|| vanished(attacker_id))?;

        let mut staged = Staged {
            targets: Vec::with_capacity(targets.len()),
            results: Vec::with_capacity(targets.len()),
            events: vec![CombatEvent::SkillUsed {
                attacker: attacker_id,
                skill: skill.id,
                targets: targets.to_vec(),
            }],
        };

        for &id in targets {
            let mut target = roster.get(id).ok_or_else(|| vanished(id))?.clone();
            let was_alive = target.is_alive();
            let mut damage = 0;

            for effect in &skill.effects {
                if !target.is_alive() {
                    break;
                }
                damage += Self::resolve_effect(
                    &encounter.config,
                    ctx,
                    attacker,
                    &mut target,
                    skill,
                    effect,
                    &mut staged.events,
                );
            }

            let died = was_alive && !target.is_alive();
            staged.results.push(CombatResult {
                attacker: attacker_id,
                target: id,
                damage,
                new_health: target.health(),
                died,
            });
            staged.targets.push(target);
        }

        Ok(staged)
    }

    /// Apply one effect to a staged target. Returns health removed.
    fn resolve_effect(
        config: &EngineConfig,
        ctx: &mut CombatContext<'_>,
        attacker: &Combatant,
        target: &mut Combatant,
        skill: &Skill,
        effect: &SkillEffect,
        events: &mut Vec<CombatEvent>,
    ) -> i64 {
        if effect.tag == EffectTag::Damage {
            let request = DamageRequest { skill, effect };
            let mut amount = ctx.damage.calculate(attacker, target, &request);
            if amount < 0 {
                warn!(amount, target = %target.id, "damage calculator returned negative damage, clamping to 0");
                amount = 0;
            }

            let mut absorbed = 0;
            if config.shields_absorb_damage {
                (amount, absorbed) = target.effects_mut().absorb(amount);
            }
            let dealt = target.take_damage(amount);

            events.push(CombatEvent::DamageDealt {
                attacker: attacker.id,
                target: target.id,
                amount: dealt,
                absorbed,
            });
            return dealt;
        }

        let roll = ctx.rng.next_float(contexts::EFFECT_CHANCE);
        if roll >= effect.chance {
            debug!(tag = ?effect.tag, roll, chance = effect.chance, "effect missed");
            events.push(CombatEvent::EffectMissed {
                target: target.id,
                tag: effect.tag,
            });
            return 0;
        }

        match effect.tag {
            EffectTag::Heal => {
                let amount = target.heal(effect.value.round() as i64);
                events.push(CombatEvent::Healed {
                    target: target.id,
                    amount,
                });
            }
            EffectTag::RestoreSp => {
                let amount = target.restore_sp(effect.value.round() as i64);
                events.push(CombatEvent::SpRestored {
                    target: target.id,
                    amount,
                });
            }
            EffectTag::Cleanse | EffectTag::Dispel => {
                let cleanse = effect.tag == EffectTag::Cleanse;
                let removed = StatusEffectEngine::remove_all(target.effects_mut(), |e| {
                    if cleanse {
                        config.is_cleansable(e.tag)
                    } else {
                        config.is_dispellable(e.tag)
                    }
                });
                if !removed.is_empty() {
                    events.push(CombatEvent::EffectsRemoved {
                        target: target.id,
                        tags: removed.iter().map(|e| e.tag).collect(),
                    });
                }
            }
            EffectTag::Damage => {}
            EffectTag::Shield
            | EffectTag::BuffStats
            | EffectTag::DebuffStats
            | EffectTag::Seal
            | EffectTag::Burn => {
                if effect.duration <= 0 {
                    debug!(tag = ?effect.tag, "zero-duration effect consumed without an instance");
                    return 0;
                }
                let instance = StatusEffectInstance::from_template(effect, attacker.id, Some(skill.id));
                let outcome = StatusEffectEngine::apply(target.effects_mut(), instance, &mut *ctx.rng);
                debug!(tag = ?effect.tag, target = %target.id, ?outcome, "status effect applied");
                events.push(CombatEvent::EffectApplied {
                    target: target.id,
                    tag: effect.tag,
                    outcome,
                });
            }
        }

        0
    }

    fn commit(
        encounter: &mut Encounter,
        ctx: &mut CombatContext<'_>,
        attacker_id: CombatantId,
        skill: &Skill,
        targets: Vec<CombatantId>,
        staged: Staged,
    ) -> Vec<CombatResult> {
        let Staged {
            targets: combatants,
            results,
            mut events,
        } = staged;

        for combatant in combatants {
            if let Some(slot) = encounter.roster.get_mut(combatant.id) {
                *slot = combatant;
            }
        }

        for result in results.iter().filter(|r| r.died) {
            encounter.turns.remove_combatant(result.target);
            events.push(CombatEvent::CombatantDefeated {
                combatant: result.target,
                by: Some(attacker_id),
            });
            if let (Some(attacker), Some(defeated)) = (
                encounter.roster.get(attacker_id),
                encounter.roster.get(result.target),
            ) {
                ctx.rewards.on_defeat(attacker, defeated);
            }
        }

        if let Some(attacker) = encounter.roster.get_mut(attacker_id) {
            attacker.spend_sp(skill.cost);
            attacker.set_cooldown(skill.id, skill.cooldown);
        }

        debug!(
            targets = targets.len(),
            defeated = results.iter().filter(|r| r.died).count(),
            "skill resolved"
        );
        encounter.events.extend(events);
        results
    }
}
