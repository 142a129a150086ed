use serde::{Deserialize, Serialize};

use crate::core::CombatantId;

/// Per-target outcome of one skill use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatResult {
    pub attacker: CombatantId,
    pub target: CombatantId,
    /// Health actually removed, after shields.
    pub damage: i64,
    pub new_health: i64,
    /// The target was alive before this skill and is not now.
    pub died: bool,
}
