//! Skill system: definitions, effect templates, and the catalog.
//!
//! ## Key Types
//!
//! - `Skill`: Immutable skill definition (cost, cooldown, targeting, effects)
//! - `SkillEffect`: Effect template with stacking/conflict/resistance rules
//! - `SkillCatalog`: Read-only lookup the engine is handed
//! - `SkillRegistry`: In-memory catalog filled by the content loader

pub mod definition;
pub mod effect;
pub mod registry;

pub use definition::{Scaling, Skill, TargetType};
pub use effect::{EffectTag, OutcomeModel, SkillEffect, StackingPolicy};
pub use registry::{SkillCatalog, SkillRegistry};
