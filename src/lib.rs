//! # rpg-combat
//!
//! Server-authoritative combat resolution for turn-based RPG encounters.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every random outcome comes from a seeded source
//!    addressed by named contexts (`EffectChance`, `ResistanceRoll`,
//!    `PetObedience`, `TurnOrder`). The same seed replays the same fight.
//!
//! 2. **Atomic**: A skill use is validated, staged on clones, then committed.
//!    A rejected or faulted request changes nothing.
//!
//! 3. **Injected, Not Global**: The skill catalog, damage formula, reward
//!    hand-out and RNG arrive per call through a `CombatContext`.
//!
//! ## Modules
//!
//! - `core`: IDs, RNG, configuration, errors
//! - `combatants`: Stats, combatant state, encounter roster
//! - `skills`: Skill definitions, effect templates, catalog
//! - `effects`: Status effect engine and skill targeting
//! - `turns`: Round-robin turn scheduler
//! - `combat`: Encounter, orchestrator, commands, events

pub mod core;
pub mod combatants;
pub mod skills;
pub mod effects;
pub mod turns;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    CombatantId, SkillId,
    RandomSource, SeededRandom, RandomState, GameRng, GameRngState,
    EngineConfig,
    CombatError, CatalogError, TurnError,
};

pub use crate::combatants::{Combatant, CombatantKind, Roster, Stat, Stats, Team};

pub use crate::skills::{
    Skill, SkillEffect, EffectTag, StackingPolicy, OutcomeModel,
    Scaling, TargetType, SkillCatalog, SkillRegistry,
};

pub use crate::effects::{
    ApplyOutcome, StatusEffectEngine, StatusEffectInstance, StatusEffects, TargetResolver,
};

pub use crate::turns::{TurnPhase, TurnRoster, TurnScheduler};

pub use crate::combat::{
    CombatCommand, CombatContext, CombatEvent, CombatOrchestrator, CombatResult,
    CommandOutcome, DamageCalculator, DamageRequest, Encounter, EncounterOutcome,
    NoRewards, RewardDistributor, ScalingDamage, SkillRequest,
};
