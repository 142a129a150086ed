//! Skill resolution integration tests.
//!
//! These drive whole encounters through `use_skill` / `dispatch` and check
//! validation order, atomicity, effect semantics, and defeat handling.

use rpg_combat::combat::{
    CombatCommand, CombatContext, CombatEvent, CombatResult, CommandOutcome, DamageRequest,
    DefeatLog, Encounter, EncounterOutcome, NoRewards,
};
use rpg_combat::combatants::{Combatant, Stat, Stats, Team};
use rpg_combat::core::{CombatError, CombatantId, EngineConfig, SeededRandom, SkillId};
use rpg_combat::effects::{ApplyOutcome, StatusEffectEngine, StatusEffectInstance};
use rpg_combat::skills::{EffectTag, Skill, SkillCatalog, SkillEffect, SkillRegistry, TargetType};

const STRIKE: SkillId = SkillId(1);
const METEOR: SkillId = SkillId(2);
const POISON_CLOUD: SkillId = SkillId(3);
const SILENCE: SkillId = SkillId(4);
const MEND: SkillId = SkillId(5);
const PURIFY: SkillId = SkillId(6);
const DISPEL: SkillId = SkillId(7);
const BARRIER: SkillId = SkillId(8);
const BLESS: SkillId = SkillId(9);
const FUMBLE: SkillId = SkillId(10);
const GUST: SkillId = SkillId(11);

// =============================================================================
// Fixtures
// =============================================================================

/// `2 * strength - 2 * constitution`.
fn str_minus_con(attacker: &Combatant, target: &Combatant, _request: &DamageRequest<'_>) -> i64 {
    attacker.effective_stat(Stat::Strength) * 2 - target.effective_stat(Stat::Constitution) * 2
}

fn catalog() -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry
        .register_all([
            Skill::new(STRIKE, "Strike", TargetType::SingleEnemy)
                .with_cost(5)
                .with_cooldown(2)
                .with_effect(SkillEffect::damage(0.0)),
            Skill::new(METEOR, "Meteor", TargetType::SingleEnemy)
                .with_cost(999)
                .with_effect(SkillEffect::damage(0.0)),
            Skill::new(POISON_CLOUD, "Poison Cloud", TargetType::AllEnemies)
                .with_effect(SkillEffect::damage(0.0))
                .with_effect(SkillEffect::burn(3.0, 2)),
            Skill::new(SILENCE, "Silence", TargetType::SingleEnemy)
                .with_effect(SkillEffect::seal(2)),
            Skill::new(MEND, "Mend", TargetType::Self_)
                .with_cost(5)
                .with_effect(SkillEffect::heal(20.0)),
            Skill::new(PURIFY, "Purify", TargetType::SingleAlly)
                .with_effect(SkillEffect::new(EffectTag::Cleanse, 0.0)),
            Skill::new(DISPEL, "Dispel", TargetType::SingleEnemy)
                .with_effect(SkillEffect::new(EffectTag::Dispel, 0.0)),
            Skill::new(BARRIER, "Barrier", TargetType::SingleAlly)
                .with_effect(SkillEffect::shield(15.0, 3)),
            Skill::new(BLESS, "Bless", TargetType::SingleAlly)
                .with_effect(SkillEffect::buff(Stat::Strength, 5.0, 3)),
            Skill::new(FUMBLE, "Fumble", TargetType::SingleEnemy)
                .with_effect(SkillEffect::seal(2).with_chance(0.0)),
            Skill::new(GUST, "Gust", TargetType::SingleEnemy)
                .with_effect(SkillEffect::burn(1.0, 2).with_chance(0.5))
                .with_effect(SkillEffect::debuff(Stat::Agility, 2.0, 2).with_chance(0.5)),
        ])
        .unwrap();
    registry
}

fn hero() -> Combatant {
    Combatant::new(CombatantId(1), "Hero", Team::Player)
        .with_stats(Stats::new(10, 0, 0, 0, 20))
        .with_health(100)
        .with_sp(30)
}

fn cleric() -> Combatant {
    Combatant::new(CombatantId(2), "Cleric", Team::Player)
        .with_stats(Stats::new(0, 0, 0, 0, 15))
        .with_sp(30)
}

fn goblin(id: u32) -> Combatant {
    Combatant::new(CombatantId(id), format!("Goblin {id}"), Team::Enemy)
        .with_stats(Stats::new(10, 5, 0, 0, 10))
        .with_health(100)
}

fn sealed(mut combatant: Combatant) -> Combatant {
    let seal = StatusEffectInstance::from_template(&SkillEffect::seal(5), CombatantId(0), None);
    StatusEffectEngine::apply(combatant.effects_mut(), seal, &mut SeededRandom::new(0));
    combatant
}

struct Harness {
    catalog: SkillRegistry,
    rewards: DefeatLog,
    rng: SeededRandom,
    encounter: Encounter,
}

impl Harness {
    fn new(combatants: Vec<Combatant>) -> Self {
        Self::with_config(EngineConfig::default(), combatants, 7)
    }

    fn with_config(config: EngineConfig, combatants: Vec<Combatant>, seed: u64) -> Self {
        let mut rng = SeededRandom::new(seed);
        let mut encounter = Encounter::new(config);
        encounter.start_encounter(combatants, &mut rng);
        Self {
            catalog: catalog(),
            rewards: DefeatLog::default(),
            rng,
            encounter,
        }
    }

    fn use_skill(&mut self, attacker: u32, target: u32, skill: SkillId) -> Result<Vec<CombatResult>, CombatError> {
        let damage = str_minus_con;
        let mut ctx = CombatContext::new(&self.catalog, &damage, &mut self.rewards, &mut self.rng);
        self.encounter
            .use_skill(&mut ctx, CombatantId(attacker), CombatantId(target), skill)
    }

    fn dispatch(&mut self, command: CombatCommand) -> Result<CommandOutcome, CombatError> {
        let damage = str_minus_con;
        let mut ctx = CombatContext::new(&self.catalog, &damage, &mut self.rewards, &mut self.rng);
        self.encounter.dispatch(command, &mut ctx)
    }

    fn end_round(&mut self) -> Vec<CombatantId> {
        let damage = str_minus_con;
        let mut ctx = CombatContext::new(&self.catalog, &damage, &mut self.rewards, &mut self.rng);
        self.encounter.end_round(&mut ctx)
    }

    fn next_turn(&mut self) -> Option<CombatantId> {
        self.encounter.next_turn(&mut self.rng)
    }

    fn combatant(&self, id: u32) -> &Combatant {
        self.encounter.combatant(CombatantId(id)).unwrap()
    }

    fn combatant_mut(&mut self, id: u32) -> &mut Combatant {
        self.encounter.combatant_mut(CombatantId(id)).unwrap()
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Test that a skill the attacker cannot afford changes nothing at all.
#[test]
fn test_insufficient_sp_changes_nothing() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);
    h.encounter.drain_events();
    let before = h.encounter.roster().clone();

    let err = h.use_skill(1, 3, METEOR).unwrap_err();

    assert_eq!(
        err,
        CombatError::InsufficientResource {
            combatant: CombatantId(1),
            skill: METEOR,
            required: 999,
            available: 30,
        }
    );
    assert!(!err.is_fault());
    assert_eq!(h.encounter.roster(), &before);
    assert!(h.encounter.events().is_empty());
}

/// Test that checks run in order and the first failure wins.
#[test]
fn test_validation_order() {
    let mut worn_out = sealed(hero());
    worn_out.spend_sp(27);
    worn_out.set_cooldown(STRIKE, 2);
    let mut h = Harness::new(vec![worn_out, cleric(), goblin(3)]);

    assert_eq!(h.use_skill(99, 3, STRIKE), Err(CombatError::NotFound(CombatantId(99))));
    assert_eq!(h.use_skill(1, 99, STRIKE), Err(CombatError::NotFound(CombatantId(99))));
    assert_eq!(h.use_skill(1, 3, SkillId(404)), Err(CombatError::UnknownSkill(SkillId(404))));

    // Targeting the ally would also fail, but later.
    assert!(matches!(
        h.use_skill(1, 2, STRIKE),
        Err(CombatError::InsufficientResource { .. })
    ));

    h.combatant_mut(1).restore_sp(100);
    assert_eq!(
        h.use_skill(1, 2, STRIKE),
        Err(CombatError::OnCooldown {
            skill: STRIKE,
            remaining: 2
        })
    );

    h.combatant_mut(1).set_cooldown(STRIKE, 0);
    assert_eq!(h.use_skill(1, 2, STRIKE), Err(CombatError::Sealed(CombatantId(1))));

    StatusEffectEngine::remove_all(h.combatant_mut(1).effects_mut(), |e| e.tag == EffectTag::Seal);
    assert_eq!(
        h.use_skill(1, 2, STRIKE),
        Err(CombatError::NoValidTargets { skill: STRIKE })
    );

    assert!(h.use_skill(1, 3, STRIKE).is_ok());
}

struct LooseCatalog(Skill);

impl SkillCatalog for LooseCatalog {
    fn get(&self, id: SkillId) -> Option<&Skill> {
        (self.0.id == id).then_some(&self.0)
    }
}

/// Test that corrupt data from an unvalidated catalog is a fault, not a crash.
#[test]
fn test_corrupt_skill_is_integrity_fault() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);
    let before = h.encounter.roster().clone();

    let catalog = LooseCatalog(
        Skill::new(SkillId(50), "Broken", TargetType::SingleEnemy)
            .with_effect(SkillEffect::seal(2).with_chance(2.0)),
    );
    let damage = str_minus_con;
    let mut rewards = NoRewards;
    let mut ctx = CombatContext::new(&catalog, &damage, &mut rewards, &mut h.rng);

    let err = h
        .encounter
        .use_skill(&mut ctx, CombatantId(1), CombatantId(3), SkillId(50))
        .unwrap_err();

    assert!(err.is_fault());
    assert_eq!(h.encounter.roster(), &before);
}

// =============================================================================
// Damage and defeat
// =============================================================================

/// Test the injected formula: strength 10 vs constitution 5 deals 10.
#[test]
fn test_damage_uses_injected_formula() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);

    let results = h.use_skill(1, 3, STRIKE).unwrap();

    assert_eq!(
        results,
        vec![CombatResult {
            attacker: CombatantId(1),
            target: CombatantId(3),
            damage: 10,
            new_health: 90,
            died: false,
        }]
    );
    assert_eq!(h.combatant(1).sp(), 25);
    assert_eq!(h.combatant(1).cooldown(STRIKE), 2);
}

/// Test that negative calculator output is clamped to zero.
#[test]
fn test_negative_damage_clamped() {
    let armored = goblin(3).with_stats(Stats::new(0, 50, 0, 0, 1));
    let mut h = Harness::new(vec![hero(), armored]);

    let results = h.use_skill(1, 3, STRIKE).unwrap();

    assert_eq!(results[0].damage, 0);
    assert_eq!(h.combatant(3).health(), 100);
}

/// Test that reaching exactly 0 health reports a death and drops the
/// combatant from the next round.
#[test]
fn test_exact_kill_retires_combatant() {
    let slow = goblin(4).with_stats(Stats::new(10, 5, 0, 0, 5));
    let mut h = Harness::new(vec![hero(), goblin(3).with_health(10), slow]);

    assert_eq!(h.next_turn(), Some(CombatantId(1)));
    let results = h.use_skill(1, 3, STRIKE).unwrap();
    assert_eq!(results[0].new_health, 0);
    assert!(results[0].died);
    assert_eq!(h.rewards.defeats, vec![(CombatantId(1), CombatantId(3))]);
    h.encounter.end_turn().unwrap();

    // Goblin 3 was queued this round but is skipped.
    assert_eq!(h.next_turn(), Some(CombatantId(4)));
    h.encounter.end_turn().unwrap();

    let mut next_round = Vec::new();
    for _ in 0..4 {
        next_round.push(h.next_turn().unwrap());
        h.encounter.end_turn().unwrap();
    }
    assert_eq!(
        next_round,
        vec![CombatantId(1), CombatantId(4), CombatantId(1), CombatantId(4)]
    );
    assert!(!h.encounter.turns().participants().contains(&CombatantId(3)));
}

/// Test that killing the last enemy wins the encounter.
#[test]
fn test_last_kill_is_victory() {
    let mut h = Harness::new(vec![hero(), goblin(3).with_health(10)]);
    assert_eq!(h.encounter.outcome(), EncounterOutcome::InProgress);

    h.use_skill(1, 3, STRIKE).unwrap();

    assert_eq!(h.encounter.outcome(), EncounterOutcome::Victory);
    assert!(h.encounter.events().contains(&CombatEvent::CombatantDefeated {
        combatant: CombatantId(3),
        by: Some(CombatantId(1)),
    }));
}

/// Test that group targeting skips the dead and keeps roster order.
#[test]
fn test_all_enemies_hits_living_in_order() {
    let mut h = Harness::new(vec![
        hero(),
        goblin(3),
        goblin(4).with_health(0),
        goblin(5),
    ]);

    let results = h.use_skill(1, 4, POISON_CLOUD).unwrap();

    let targets: Vec<_> = results.iter().map(|r| r.target).collect();
    assert_eq!(targets, vec![CombatantId(3), CombatantId(5)]);
    assert!(results.iter().all(|r| r.damage == 10));
    assert!(h.combatant(3).effects().has(EffectTag::Burn));
    assert!(h.combatant(5).effects().has(EffectTag::Burn));
    assert!(h.combatant(4).effects().is_empty());
}

// =============================================================================
// Cooldowns and seals
// =============================================================================

/// Test that a cooldown counts down at the start of the owner's turns.
#[test]
fn test_cooldown_counts_owner_turns() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);

    assert_eq!(h.next_turn(), Some(CombatantId(1)));
    h.use_skill(1, 3, STRIKE).unwrap();
    assert_eq!(
        h.use_skill(1, 3, STRIKE),
        Err(CombatError::OnCooldown { skill: STRIKE, remaining: 2 })
    );
    h.encounter.end_turn().unwrap();

    assert_eq!(h.next_turn(), Some(CombatantId(3)));
    h.encounter.end_turn().unwrap();
    assert_eq!(h.next_turn(), Some(CombatantId(1)));
    assert_eq!(
        h.use_skill(1, 3, STRIKE),
        Err(CombatError::OnCooldown { skill: STRIKE, remaining: 1 })
    );
    h.encounter.end_turn().unwrap();

    assert_eq!(h.next_turn(), Some(CombatantId(3)));
    h.encounter.end_turn().unwrap();
    assert_eq!(h.next_turn(), Some(CombatantId(1)));
    assert!(h.use_skill(1, 3, STRIKE).is_ok());
}

/// Test that a seal blocks its target until it expires at round end.
#[test]
fn test_seal_blocks_until_expiry() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);

    h.use_skill(1, 3, SILENCE).unwrap();
    assert!(h.encounter.events().contains(&CombatEvent::EffectApplied {
        target: CombatantId(3),
        tag: EffectTag::Seal,
        outcome: ApplyOutcome::Appended,
    }));
    assert_eq!(h.use_skill(3, 1, STRIKE), Err(CombatError::Sealed(CombatantId(3))));

    h.end_round();
    assert!(h.combatant(3).is_sealed());
    h.end_round();
    assert!(!h.combatant(3).is_sealed());
    assert!(h.use_skill(3, 1, STRIKE).is_ok());
}

/// Test that a zero application chance always misses.
#[test]
fn test_zero_chance_misses() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);

    h.use_skill(1, 3, FUMBLE).unwrap();

    assert!(!h.combatant(3).is_sealed());
    assert!(h.encounter.events().contains(&CombatEvent::EffectMissed {
        target: CombatantId(3),
        tag: EffectTag::Seal,
    }));
}

// =============================================================================
// Support effects
// =============================================================================

/// Test that shields soak damage before health.
#[test]
fn test_shield_absorbs_damage() {
    let mut h = Harness::new(vec![hero(), cleric(), goblin(3)]);

    h.use_skill(2, 1, BARRIER).unwrap();
    let results = h.use_skill(3, 1, STRIKE).unwrap();

    assert_eq!(results[0].damage, 5);
    assert_eq!(results[0].new_health, 95);
    assert!(!h.combatant(1).effects().has(EffectTag::Shield));
    assert!(h.encounter.events().contains(&CombatEvent::DamageDealt {
        attacker: CombatantId(3),
        target: CombatantId(1),
        amount: 5,
        absorbed: 15,
    }));
}

/// Test that shields are inert when absorption is switched off.
#[test]
fn test_shield_absorption_can_be_disabled() {
    let config = EngineConfig::default().with_shields_absorb_damage(false);
    let mut h = Harness::with_config(config, vec![hero(), cleric(), goblin(3)], 7);

    h.use_skill(2, 1, BARRIER).unwrap();
    let results = h.use_skill(3, 1, STRIKE).unwrap();

    assert_eq!(results[0].damage, 20);
    assert!(h.combatant(1).effects().has(EffectTag::Shield));
}

/// Test that cleanse strips harmful effects and dispel strips helpful ones.
#[test]
fn test_cleanse_and_dispel() {
    let mut h = Harness::new(vec![hero(), cleric(), goblin(3)]);

    h.use_skill(3, 1, SILENCE).unwrap();
    h.use_skill(2, 1, BLESS).unwrap();
    assert!(h.combatant(1).is_sealed());
    assert_eq!(h.combatant(1).effective_stat(Stat::Strength), 15);

    h.use_skill(2, 1, PURIFY).unwrap();
    assert!(!h.combatant(1).is_sealed());
    assert_eq!(h.combatant(1).effective_stat(Stat::Strength), 15);

    h.use_skill(3, 1, DISPEL).unwrap();
    assert_eq!(h.combatant(1).effective_stat(Stat::Strength), 10);
    assert!(h.combatant(1).effects().is_empty());

    let removed: Vec<_> = h
        .encounter
        .events()
        .iter()
        .filter_map(|e| match e {
            CombatEvent::EffectsRemoved { tags, .. } => Some(tags.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(removed, vec![vec![EffectTag::Seal], vec![EffectTag::BuffStats]]);
}

/// Test that a self-heal's cost is charged after the heal is written back.
#[test]
fn test_self_heal_charges_cost() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);
    h.combatant_mut(1).take_damage(30);

    let results = h.use_skill(1, 1, MEND).unwrap();

    assert_eq!(results[0].target, CombatantId(1));
    assert_eq!(h.combatant(1).health(), 90);
    assert_eq!(h.combatant(1).sp(), 25);
}

// =============================================================================
// Pets
// =============================================================================

/// Test that a disobedient pet wastes nothing.
#[test]
fn test_pet_disobedience() {
    let stubborn = Combatant::new(CombatantId(6), "Mule", Team::Player)
        .with_stats(Stats::new(10, 0, 0, 0, 1))
        .as_pet(CombatantId(1), 0.0);
    let loyal = Combatant::new(CombatantId(7), "Hound", Team::Player)
        .with_stats(Stats::new(10, 0, 0, 0, 1))
        .as_pet(CombatantId(1), 1.0);
    let mut h = Harness::new(vec![hero(), stubborn, loyal, goblin(3)]);

    assert_eq!(h.use_skill(6, 3, STRIKE), Err(CombatError::Disobeyed(CombatantId(6))));
    assert_eq!(h.combatant(6).sp(), Combatant::DEFAULT_SP);
    assert_eq!(h.combatant(3).health(), 100);

    assert!(h.use_skill(7, 3, STRIKE).is_ok());
    assert_eq!(h.combatant(3).health(), 90);
}

// =============================================================================
// Commands
// =============================================================================

/// Test command dispatch and turn ownership.
#[test]
fn test_dispatch() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);
    assert_eq!(h.next_turn(), Some(CombatantId(1)));

    let out_of_turn = CombatCommand::UseSkill {
        attacker: CombatantId(3),
        target: CombatantId(1),
        skill: STRIKE,
    };
    assert_eq!(h.dispatch(out_of_turn), Err(CombatError::OutOfTurn(CombatantId(3))));

    let strike = CombatCommand::UseSkill {
        attacker: CombatantId(1),
        target: CombatantId(3),
        skill: STRIKE,
    };
    assert!(matches!(h.dispatch(strike), Ok(CommandOutcome::Resolved(r)) if r.len() == 1));

    assert_eq!(
        h.dispatch(CombatCommand::EndTurn { combatant: CombatantId(3) }),
        Err(CombatError::OutOfTurn(CombatantId(3)))
    );
    assert_eq!(
        h.dispatch(CombatCommand::EndTurn { combatant: CombatantId(99) }),
        Err(CombatError::NotFound(CombatantId(99)))
    );
    assert_eq!(
        h.dispatch(CombatCommand::EndTurn { combatant: CombatantId(1) }),
        Ok(CommandOutcome::TurnEnded(CombatantId(1)))
    );

    assert_eq!(
        h.dispatch(CombatCommand::Flee { combatant: CombatantId(1) }),
        Ok(CommandOutcome::Fled(CombatantId(1)))
    );
    assert_eq!(h.encounter.outcome(), EncounterOutcome::Aborted);
    assert_eq!(
        h.dispatch(CombatCommand::Flee { combatant: CombatantId(1) }),
        Err(CombatError::NotFound(CombatantId(1)))
    );
}

// =============================================================================
// Events and determinism
// =============================================================================

/// Test that a successful use logs `SkillUsed` first.
#[test]
fn test_skill_used_logged_first() {
    let mut h = Harness::new(vec![hero(), goblin(3)]);
    h.encounter.drain_events();

    h.use_skill(1, 3, STRIKE).unwrap();
    let events = h.encounter.drain_events();

    assert_eq!(
        events[0],
        CombatEvent::SkillUsed {
            attacker: CombatantId(1),
            skill: STRIKE,
            targets: vec![CombatantId(3)],
        }
    );
    assert!(h.encounter.events().is_empty());
}

fn scripted_fight(seed: u64) -> Vec<CombatEvent> {
    let mut h = Harness::with_config(
        EngineConfig::default(),
        vec![hero(), cleric(), goblin(3), goblin(4)],
        seed,
    );

    for _ in 0..3 {
        while let Some(id) = h.next_turn() {
            let target = if h.combatant(id.raw()).team == Team::Player { 3 } else { 1 };
            let _ = h.use_skill(id.raw(), target, GUST);
            h.encounter.end_turn().unwrap();
            if h.encounter.is_round_over() {
                break;
            }
        }
        h.end_round();
    }

    h.encounter.drain_events()
}

/// Test that a seed replays a whole fight.
#[test]
fn test_same_seed_same_fight() {
    assert_eq!(scripted_fight(99), scripted_fight(99));
}
