//! Player and AI commands.
//!
//! The session layer turns every inbound request into a [`CombatCommand`]
//! and hands it to [`Encounter::dispatch`]. Commands that act in a turn are
//! only accepted from the combatant whose turn it is.

use serde::{Deserialize, Serialize};

use super::context::CombatContext;
use super::encounter::Encounter;
use super::result::CombatResult;
use crate::core::{CombatError, CombatantId, SkillId};

/// Something a combatant wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatCommand {
    UseSkill {
        attacker: CombatantId,
        target: CombatantId,
        skill: SkillId,
    },
    EndTurn {
        combatant: CombatantId,
    },
    /// Leave the encounter. Allowed at any time.
    Flee {
        combatant: CombatantId,
    },
}

impl CombatCommand {
    /// Who issued the command.
    #[must_use]
    pub fn actor(&self) -> CombatantId {
        match *self {
            CombatCommand::UseSkill { attacker, .. } => attacker,
            CombatCommand::EndTurn { combatant } | CombatCommand::Flee { combatant } => combatant,
        }
    }
}

/// Result of a dispatched command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Resolved(Vec<CombatResult>),
    TurnEnded(CombatantId),
    Fled(CombatantId),
}

impl Encounter {
    /// Execute a command.
    pub fn dispatch(
        &mut self,
        command: CombatCommand,
        ctx: &mut CombatContext<'_>,
    ) -> Result<CommandOutcome, CombatError> {
        match command {
            CombatCommand::UseSkill {
                attacker,
                target,
                skill,
            } => {
                self.ensure_turn(attacker)?;
                self.use_skill(ctx, attacker, target, skill)
                    .map(CommandOutcome::Resolved)
            }
            CombatCommand::EndTurn { combatant } => {
                self.ensure_turn(combatant)?;
                self.end_turn()
                    .map_err(|_| CombatError::OutOfTurn(combatant))?;
                Ok(CommandOutcome::TurnEnded(combatant))
            }
            CombatCommand::Flee { combatant } => self
                .remove_combatant(combatant)
                .map(|_| CommandOutcome::Fled(combatant))
                .ok_or(CombatError::NotFound(combatant)),
        }
    }

    fn ensure_turn(&self, id: CombatantId) -> Result<(), CombatError> {
        if !self.roster.contains(id) {
            return Err(CombatError::NotFound(id));
        }
        if self.current_combatant() != Some(id) {
            tracing::warn!(combatant = %id, current = ?self.current_combatant(), "command out of turn");
            return Err(CombatError::OutOfTurn(id));
        }
        Ok(())
    }
}
