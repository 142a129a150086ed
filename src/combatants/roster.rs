//! Encounter roster: the id → combatant registry for one encounter.

use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, Team};
use crate::core::CombatantId;
use crate::turns::TurnRoster;

/// Combatants in an encounter, in the order they joined.
///
/// Rosters are small, so lookups scan. Join order is what group targeting
/// and outcome evaluation see.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Combatant>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant. Returns `false` if the id is already present.
    pub fn add(&mut self, combatant: Combatant) -> bool {
        if self.contains(combatant.id) {
            return false;
        }
        self.members.push(combatant);
        true
    }

    /// Remove a combatant, returning it.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.members.iter().position(|c| c.id == id)?;
        Some(self.members.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CombatantId) -> bool {
        self.members.iter().any(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.members.iter()
    }

    /// Living members of a team, in join order.
    pub fn living(&self, team: Team) -> impl Iterator<Item = &Combatant> {
        self.members
            .iter()
            .filter(move |c| c.team == team && c.is_alive())
    }

    /// Does `team` have any member left, alive or not?
    #[must_use]
    pub fn has_team(&self, team: Team) -> bool {
        self.members.iter().any(|c| c.team == team)
    }

    /// All member ids in join order.
    #[must_use]
    pub fn ids(&self) -> Vec<CombatantId> {
        self.members.iter().map(|c| c.id).collect()
    }
}

impl TurnRoster for Roster {
    fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    fn speed(&self, id: CombatantId) -> i64 {
        self.get(id).map_or(0, Combatant::speed)
    }

    fn on_turn_start(&mut self, id: CombatantId) {
        if let Some(combatant) = self.get_mut(id) {
            combatant.tick_cooldowns();
        }
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for combatant in iter {
            roster.add(combatant);
        }
        roster
    }
}
