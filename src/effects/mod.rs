//! Status effects and targeting.
//!
//! - `StatusEffectInstance`: A live effect copied from a skill's template
//! - `StatusEffects`: Per-combatant arena with a conflict-group index
//! - `StatusEffectEngine`: Apply / remove / tick rules
//! - `TargetResolver`: Skill target type to concrete combatants
//!
//! ## Conflict Groups
//!
//! At most one effect holds a conflict group on a combatant. A newcomer with
//! higher priority replaces it, lower priority is discarded, and equal
//! priority defers to the newcomer's `StackingPolicy`. Effects stacking as
//! `SeparateInstances` sit outside the group index and always append.

mod engine;
mod instance;
mod targeting;

pub use engine::{ApplyOutcome, StatusEffectEngine};
pub use instance::{StatusEffectInstance, StatusEffects};
pub use targeting::TargetResolver;
