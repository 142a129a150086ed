//! Combat orchestration.
//!
//! - `Encounter`: Owns the roster, turn queue, config, and event log
//! - `CombatOrchestrator`: Validates and resolves skill use atomically
//! - `CombatContext`: Catalog, damage formula, rewards, and RNG for one call
//! - `CombatCommand`: Closed set of inbound commands, see `Encounter::dispatch`
//! - `CombatEvent`: Append-only log drained by the broadcast layer
//!
//! ## Example
//!
//! ```
//! use rpg_combat::combat::{CombatContext, Encounter, EncounterOutcome, NoRewards, ScalingDamage};
//! use rpg_combat::combatants::{Combatant, Stats, Team};
//! use rpg_combat::core::{CombatantId, SeededRandom, SkillId};
//! use rpg_combat::skills::{Skill, SkillEffect, SkillRegistry, TargetType};
//!
//! let mut registry = SkillRegistry::new();
//! registry
//!     .register(
//!         Skill::new(SkillId::new(1), "Strike", TargetType::SingleEnemy)
//!             .with_effect(SkillEffect::damage(500.0)),
//!     )
//!     .unwrap();
//!
//! let mut rng = SeededRandom::new(42);
//! let mut encounter = Encounter::default();
//! encounter.start_encounter(
//!     [
//!         Combatant::new(CombatantId::new(1), "Hero", Team::Player).with_stats(Stats::new(0, 0, 0, 0, 10)),
//!         Combatant::new(CombatantId::new(2), "Slime", Team::Enemy),
//!     ],
//!     &mut rng,
//! );
//!
//! let hero = encounter.next_turn(&mut rng).unwrap();
//! assert_eq!(hero, CombatantId::new(1));
//!
//! let calc = ScalingDamage::default();
//! let mut rewards = NoRewards;
//! let mut ctx = CombatContext::new(&registry, &calc, &mut rewards, &mut rng);
//! let results = encounter
//!     .use_skill(&mut ctx, hero, CombatantId::new(2), SkillId::new(1))
//!     .unwrap();
//!
//! assert!(results[0].died);
//! assert_eq!(encounter.outcome(), EncounterOutcome::Victory);
//! ```

mod collaborators;
mod command;
mod context;
mod encounter;
mod event;
mod orchestrator;
mod result;

pub use collaborators::{
    DamageCalculator, DamageRequest, DefeatLog, NoRewards, RewardDistributor, ScalingDamage,
};
pub use command::{CombatCommand, CommandOutcome};
pub use context::CombatContext;
pub use encounter::{Encounter, EncounterOutcome};
pub use event::CombatEvent;
pub use orchestrator::{CombatOrchestrator, SkillRequest};
pub use result::CombatResult;
