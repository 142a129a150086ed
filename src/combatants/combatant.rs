//! Combatant state.
//!
//! Players, pets and monsters share one type; what differs is carried by
//! [`CombatantKind`]. Health and SP are private so every write goes through
//! a clamping method.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::stats::{Stat, Stats};
use crate::core::{CombatantId, SkillId};
use crate::effects::StatusEffects;
use crate::skills::EffectTag;

/// Side of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

/// What sort of participant a combatant is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    /// A pet obeys a skill command with probability `obedience`.
    Pet { owner: CombatantId, obedience: f64 },
    Monster,
}

/// A participant in an encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub kind: CombatantKind,
    pub stats: Stats,
    health: i64,
    max_health: i64,
    sp: i64,
    max_sp: i64,
    cooldowns: FxHashMap<SkillId, u32>,
    effects: StatusEffects,
}

impl Combatant {
    /// Default maximum health.
    pub const DEFAULT_HEALTH: i64 = 100;

    /// Default maximum SP.
    pub const DEFAULT_SP: i64 = 50;

    /// Create a combatant at full health and SP.
    ///
    /// Kind defaults from the team: `Player` for the player side, `Monster`
    /// for enemies.
    #[must_use]
    pub fn new(id: CombatantId, name: impl Into<String>, team: Team) -> Self {
        let kind = match team {
            Team::Player => CombatantKind::Player,
            Team::Enemy => CombatantKind::Monster,
        };
        Self {
            id,
            name: name.into(),
            team,
            kind,
            stats: Stats::default(),
            health: Self::DEFAULT_HEALTH,
            max_health: Self::DEFAULT_HEALTH,
            sp: Self::DEFAULT_SP,
            max_sp: Self::DEFAULT_SP,
            cooldowns: FxHashMap::default(),
            effects: StatusEffects::new(),
        }
    }

    /// Set base stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Set maximum and current health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, max: i64) -> Self {
        self.max_health = max.max(0);
        self.health = self.max_health;
        self
    }

    /// Set maximum and current SP (builder pattern).
    #[must_use]
    pub fn with_sp(mut self, max: i64) -> Self {
        self.max_sp = max.max(0);
        self.sp = self.max_sp;
        self
    }

    /// Make this combatant a pet (builder pattern).
    #[must_use]
    pub fn as_pet(mut self, owner: CombatantId, obedience: f64) -> Self {
        self.kind = CombatantKind::Pet { owner, obedience };
        self
    }

    // === Health / SP ===

    #[must_use]
    pub fn health(&self) -> i64 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.max_health
    }

    #[must_use]
    pub fn sp(&self) -> i64 {
        self.sp
    }

    #[must_use]
    pub fn max_sp(&self) -> i64 {
        self.max_sp
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Set current health, clamped to `[0, max]`.
    pub fn set_health(&mut self, health: i64) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Subtract health. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let dealt = amount.clamp(0, self.health);
        self.health -= dealt;
        dealt
    }

    /// Restore health. The dead are not healed. Returns the amount restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.clamp(0, self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Restore SP. Returns the amount restored.
    pub fn restore_sp(&mut self, amount: i64) -> i64 {
        let restored = amount.clamp(0, self.max_sp - self.sp);
        self.sp += restored;
        restored
    }

    /// Deduct SP, never below zero.
    pub fn spend_sp(&mut self, amount: i64) {
        self.sp = (self.sp - amount.max(0)).max(0);
    }

    // === Cooldowns ===

    /// Turns until `skill` can be used again.
    #[must_use]
    pub fn cooldown(&self, skill: SkillId) -> u32 {
        self.cooldowns.get(&skill).copied().unwrap_or(0)
    }

    pub fn set_cooldown(&mut self, skill: SkillId, turns: u32) {
        if turns == 0 {
            self.cooldowns.remove(&skill);
        } else {
            self.cooldowns.insert(skill, turns);
        }
    }

    /// Count every cooldown down by one turn.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    // === Effects ===

    #[must_use]
    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut StatusEffects {
        &mut self.effects
    }

    /// Base stat plus active buffs, minus active debuffs.
    #[must_use]
    pub fn effective_stat(&self, stat: Stat) -> i64 {
        let modifier = self.effects.modifier(stat.name()).unwrap_or(0.0);
        self.stats.get(stat) + modifier.round() as i64
    }

    /// All stats with effects applied.
    #[must_use]
    pub fn effective_stats(&self) -> Stats {
        let mut stats = self.stats;
        for stat in Stat::ALL {
            stats.set(stat, self.effective_stat(stat));
        }
        stats
    }

    /// Turn-order speed, derived from effective agility.
    #[must_use]
    pub fn speed(&self) -> i64 {
        self.effective_stat(Stat::Agility)
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.effects.has(EffectTag::Seal)
    }
}
