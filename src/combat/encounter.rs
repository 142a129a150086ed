//! An encounter: roster, turn queue, config, and event log.
//!
//! `Encounter` owns all mutable combat state and nothing else. Collaborators
//! arrive per call through a [`CombatContext`], so an encounter can move
//! between threads freely while its host serializes access.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::CombatContext;
use super::event::CombatEvent;
use super::orchestrator::{CombatOrchestrator, SkillRequest};
use super::result::CombatResult;
use crate::combatants::{Combatant, Roster, Team};
use crate::core::{CombatError, CombatantId, EngineConfig, RandomSource, SkillId, TurnError};
use crate::effects::StatusEffectEngine;
use crate::skills::EffectTag;
use crate::turns::{TurnRoster, TurnScheduler};

/// Where an encounter stands, from the player side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterOutcome {
    InProgress,
    /// No living enemies.
    Victory,
    /// No living players.
    Defeat,
    /// Every player-side participant left.
    Aborted,
}

impl EncounterOutcome {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != EncounterOutcome::InProgress
    }
}

/// Mutable state of one combat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Encounter {
    pub(crate) roster: Roster,
    pub(crate) turns: TurnScheduler,
    pub(crate) config: EngineConfig,
    pub(crate) events: Vec<CombatEvent>,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Encounter {
    /// Create an empty encounter.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let turns = TurnScheduler::with_context(config.turn_order_context.clone());
        Self {
            roster: Roster::new(),
            turns,
            config,
            events: Vec::new(),
        }
    }

    // === Turn management ===

    /// Replace the roster and build the first round.
    ///
    /// Duplicate ids after the first are dropped with a warning.
    pub fn start_encounter(
        &mut self,
        combatants: impl IntoIterator<Item = Combatant>,
        rng: &mut dyn RandomSource,
    ) {
        self.roster = Roster::new();
        self.events.clear();
        for combatant in combatants {
            let id = combatant.id;
            if !self.roster.add(combatant) {
                warn!(combatant = %id, "duplicate combatant id ignored");
            }
        }

        self.turns = TurnScheduler::with_context(self.config.turn_order_context.clone());
        self.turns.start_encounter(self.roster.ids(), &self.roster, rng);
        debug!(combatants = self.roster.len(), "encounter started");
    }

    /// Add a combatant mid-fight. It acts from the next round on.
    ///
    /// Returns `false` if the id is already taken.
    pub fn add_combatant(&mut self, combatant: Combatant) -> bool {
        let id = combatant.id;
        if !self.roster.add(combatant) {
            return false;
        }
        self.turns.add_combatant(id);
        self.events.push(CombatEvent::CombatantJoined { combatant: id });
        true
    }

    /// Remove a combatant (flee or disconnect).
    pub fn remove_combatant(&mut self, id: CombatantId) -> Option<Combatant> {
        let combatant = self.roster.remove(id)?;
        self.turns.remove_combatant(id);
        self.events.push(CombatEvent::CombatantFled { combatant: id });
        debug!(combatant = %id, "combatant left the encounter");
        Some(combatant)
    }

    /// Start the next turn, ticking the new combatant's cooldowns.
    pub fn next_turn(&mut self, rng: &mut dyn RandomSource) -> Option<CombatantId> {
        let id = self.turns.next_turn(&mut self.roster, rng)?;
        self.events.push(CombatEvent::TurnStarted {
            combatant: id,
            round: self.turns.round(),
        });
        Some(id)
    }

    /// End the current turn.
    pub fn end_turn(&mut self) -> Result<CombatantId, TurnError> {
        let id = self.turns.end_turn()?;
        self.events.push(CombatEvent::TurnEnded { combatant: id });
        Ok(id)
    }

    #[must_use]
    pub fn current_combatant(&self) -> Option<CombatantId> {
        self.turns.current_combatant()
    }

    /// Has every turn of the current round been handed out and ended?
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.turns.current_combatant().is_none()
            && self
                .turns
                .queued()
                .all(|id| !TurnRoster::is_alive(&self.roster, id))
    }

    // === Resolution ===

    /// Use a skill. See [`CombatOrchestrator::use_skill`].
    pub fn use_skill(
        &mut self,
        ctx: &mut CombatContext<'_>,
        attacker: CombatantId,
        target: CombatantId,
        skill: SkillId,
    ) -> Result<Vec<CombatResult>, CombatError> {
        CombatOrchestrator::use_skill(
            self,
            ctx,
            SkillRequest {
                attacker,
                target,
                skill,
            },
        )
    }

    /// End-of-round upkeep: burn damage, then effect expiry.
    ///
    /// Returns the ids of combatants killed by burns.
    pub fn end_round(&mut self, ctx: &mut CombatContext<'_>) -> Vec<CombatantId> {
        let mut defeated: Vec<(CombatantId, CombatantId)> = Vec::new();

        for id in self.roster.ids() {
            let Some(combatant) = self.roster.get_mut(id) else {
                continue;
            };
            if !combatant.is_alive() {
                continue;
            }

            if self.config.burn_on_round_end {
                let burns: Vec<(CombatantId, i64)> = combatant
                    .effects()
                    .iter()
                    .filter(|e| e.tag == EffectTag::Burn)
                    .map(|e| (e.source, e.magnitude().round() as i64))
                    .collect();

                for (source, amount) in burns {
                    let dealt = combatant.take_damage(amount);
                    self.events.push(CombatEvent::BurnTicked {
                        target: id,
                        source,
                        amount: dealt,
                    });
                    if !combatant.is_alive() {
                        defeated.push((id, source));
                        break;
                    }
                }
            }

            let expired = StatusEffectEngine::tick(combatant.effects_mut());
            if !expired.is_empty() {
                self.events.push(CombatEvent::EffectsExpired {
                    target: id,
                    tags: expired.iter().map(|e| e.tag).collect(),
                });
            }
        }

        for &(id, source) in &defeated {
            self.turns.remove_combatant(id);
            let killer = self.roster.get(source);
            self.events.push(CombatEvent::CombatantDefeated {
                combatant: id,
                by: killer.map(|k| k.id),
            });
            if let (Some(killer), Some(victim)) = (killer, self.roster.get(id)) {
                ctx.rewards.on_defeat(killer, victim);
            }
        }

        debug!(defeated = defeated.len(), "round ended");
        defeated.into_iter().map(|(id, _)| id).collect()
    }

    // === Queries ===

    /// Victory/Defeat/Aborted/InProgress from current liveness.
    #[must_use]
    pub fn outcome(&self) -> EncounterOutcome {
        if !self.roster.has_team(Team::Player) {
            EncounterOutcome::Aborted
        } else if self.roster.living(Team::Player).next().is_none() {
            EncounterOutcome::Defeat
        } else if self.roster.living(Team::Enemy).next().is_none() {
            EncounterOutcome::Victory
        } else {
            EncounterOutcome::InProgress
        }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    /// Out-of-band edits (items, GM tools). Not logged as events.
    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.get_mut(id)
    }

    #[must_use]
    pub fn turns(&self) -> &TurnScheduler {
        &self.turns
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Events since the last drain.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}
