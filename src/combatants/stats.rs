//! Core stats.
//!
//! Five base stats feed everything else: the damage calculator reads them,
//! skill scaling multiplies them, and speed is derived from agility.
//! `BuffStats`/`DebuffStats` effects name a stat through their parameter
//! string, so [`Stat`] parses from and prints to lowercase names.

use serde::{Deserialize, Serialize};

/// A core stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Strength,
    Constitution,
    Intelligence,
    Wisdom,
    Agility,
}

impl Stat {
    /// All stats in declaration order.
    pub const ALL: [Stat; 5] = [
        Stat::Strength,
        Stat::Constitution,
        Stat::Intelligence,
        Stat::Wisdom,
        Stat::Agility,
    ];

    /// Lowercase name, as used in effect parameters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Constitution => "constitution",
            Stat::Intelligence => "intelligence",
            Stat::Wisdom => "wisdom",
            Stat::Agility => "agility",
        }
    }

    /// Parse a stat from its effect-parameter name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Base stat block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub agility: i64,
}

impl Stats {
    /// Create a stat block.
    #[must_use]
    pub const fn new(
        strength: i64,
        constitution: i64,
        intelligence: i64,
        wisdom: i64,
        agility: i64,
    ) -> Self {
        Self {
            strength,
            constitution,
            intelligence,
            wisdom,
            agility,
        }
    }

    /// Read a stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Constitution => self.constitution,
            Stat::Intelligence => self.intelligence,
            Stat::Wisdom => self.wisdom,
            Stat::Agility => self.agility,
        }
    }

    /// Overwrite a stat.
    pub fn set(&mut self, stat: Stat, value: i64) {
        match stat {
            Stat::Strength => self.strength = value,
            Stat::Constitution => self.constitution = value,
            Stat::Intelligence => self.intelligence = value,
            Stat::Wisdom => self.wisdom = value,
            Stat::Agility => self.agility = value,
        }
    }

    /// Set a stat (builder pattern).
    #[must_use]
    pub fn with(mut self, stat: Stat, value: i64) -> Self {
        self.set(stat, value);
        self
    }
}
