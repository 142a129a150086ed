//! Skill targeting.
//!
//! Maps a skill's [`TargetType`] onto concrete combatants. Pure and
//! deterministic: the same roster always yields the same list in the same
//! order.

use crate::combatants::{Combatant, Roster};
use crate::core::CombatantId;
use crate::skills::TargetType;

/// Resolves skill targets against an encounter roster.
pub struct TargetResolver;

impl TargetResolver {
    /// Resolve the combatants a skill affects.
    ///
    /// Single-target rules return the primary target as-is, dead or alive;
    /// group rules only return living roster members, in roster order. An
    /// absent primary target always yields an empty list.
    #[must_use]
    pub fn resolve(
        target: TargetType,
        attacker: &Combatant,
        primary: Option<&Combatant>,
        roster: &Roster,
    ) -> Vec<CombatantId> {
        let Some(primary) = primary else {
            return Vec::new();
        };

        match target {
            TargetType::Self_ => vec![attacker.id],
            TargetType::SingleEnemy
            | TargetType::RowEnemies
            | TargetType::ColumnEnemies
            | TargetType::CrossEnemies => {
                if primary.team != attacker.team {
                    vec![primary.id]
                } else {
                    Vec::new()
                }
            }
            TargetType::SingleAlly | TargetType::RowAllies => {
                if primary.team == attacker.team {
                    vec![primary.id]
                } else {
                    Vec::new()
                }
            }
            TargetType::AllEnemies => roster
                .living(attacker.team.opponent())
                .map(|c| c.id)
                .collect(),
            TargetType::AllAllies => roster.living(attacker.team).map(|c| c.id).collect(),
        }
    }
}
