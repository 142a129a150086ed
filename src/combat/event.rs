//! Combat log.
//!
//! Events are appended to the encounter only when a mutation commits, so a
//! rejected request leaves no trace. The broadcast layer drains them.

use serde::{Deserialize, Serialize};

use crate::core::{CombatantId, SkillId};
use crate::effects::ApplyOutcome;
use crate::skills::EffectTag;

/// Something observable that happened in an encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    TurnStarted {
        combatant: CombatantId,
        round: u32,
    },
    TurnEnded {
        combatant: CombatantId,
    },
    SkillUsed {
        attacker: CombatantId,
        skill: SkillId,
        targets: Vec<CombatantId>,
    },
    DamageDealt {
        attacker: CombatantId,
        target: CombatantId,
        amount: i64,
        absorbed: i64,
    },
    Healed {
        target: CombatantId,
        amount: i64,
    },
    SpRestored {
        target: CombatantId,
        amount: i64,
    },
    EffectApplied {
        target: CombatantId,
        tag: EffectTag,
        outcome: ApplyOutcome,
    },
    /// The application chance roll failed.
    EffectMissed {
        target: CombatantId,
        tag: EffectTag,
    },
    /// Cleanse or dispel removed effects.
    EffectsRemoved {
        target: CombatantId,
        tags: Vec<EffectTag>,
    },
    EffectsExpired {
        target: CombatantId,
        tags: Vec<EffectTag>,
    },
    BurnTicked {
        target: CombatantId,
        source: CombatantId,
        amount: i64,
    },
    /// `by` is `None` when the killer already left the encounter.
    CombatantDefeated {
        combatant: CombatantId,
        by: Option<CombatantId>,
    },
    CombatantFled {
        combatant: CombatantId,
    },
    CombatantJoined {
        combatant: CombatantId,
    },
}
