//! Engine configuration.
//!
//! Servers build an `EngineConfig` at startup (usually deserialized from the
//! content pipeline) and thread it through every resolution call. The engine
//! holds no global tunables.

use serde::{Deserialize, Serialize};

use super::rng::contexts;
use crate::skills::EffectTag;

/// Tunable rules for effect resolution and turn building.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tags removed by a `Cleanse` effect.
    pub cleansable: Vec<EffectTag>,

    /// Tags removed by a `Dispel` effect.
    pub dispellable: Vec<EffectTag>,

    /// Whether active `Shield` effects soak incoming skill damage.
    pub shields_absorb_damage: bool,

    /// Whether the end-of-round driver applies `Burn` damage before ticking.
    pub burn_on_round_end: bool,

    /// RNG context used for the turn-order shuffle.
    pub turn_order_context: String,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cleansable: vec![EffectTag::DebuffStats, EffectTag::Seal, EffectTag::Burn],
            dispellable: vec![EffectTag::BuffStats, EffectTag::Shield],
            shields_absorb_damage: true,
            burn_on_round_end: true,
            turn_order_context: contexts::TURN_ORDER.to_string(),
        }
    }

    /// Replace the set of tags a `Cleanse` removes.
    #[must_use]
    pub fn with_cleansable(mut self, tags: impl IntoIterator<Item = EffectTag>) -> Self {
        self.cleansable = tags.into_iter().collect();
        self
    }

    /// Replace the set of tags a `Dispel` removes.
    #[must_use]
    pub fn with_dispellable(mut self, tags: impl IntoIterator<Item = EffectTag>) -> Self {
        self.dispellable = tags.into_iter().collect();
        self
    }

    /// Toggle shield absorption.
    #[must_use]
    pub fn with_shields_absorb_damage(mut self, enabled: bool) -> Self {
        self.shields_absorb_damage = enabled;
        self
    }

    /// Toggle burn damage in the end-of-round driver.
    #[must_use]
    pub fn with_burn_on_round_end(mut self, enabled: bool) -> Self {
        self.burn_on_round_end = enabled;
        self
    }

    /// Use a different RNG context for the turn-order shuffle.
    #[must_use]
    pub fn with_turn_order_context(mut self, context: impl Into<String>) -> Self {
        self.turn_order_context = context.into();
        self
    }

    /// Is `tag` removed by `Cleanse`?
    #[must_use]
    pub fn is_cleansable(&self, tag: EffectTag) -> bool {
        self.cleansable.contains(&tag)
    }

    /// Is `tag` removed by `Dispel`?
    #[must_use]
    pub fn is_dispellable(&self, tag: EffectTag) -> bool {
        self.dispellable.contains(&tag)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
