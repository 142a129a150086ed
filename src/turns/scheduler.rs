//! Round-robin turn scheduling.
//!
//! Each round is built from the combatants alive when it starts: shuffled
//! with the injected RNG, then stably sorted by descending speed, so speed
//! ties are broken by the seed. A round's queue is a snapshot. Combatants
//! that die or leave mid-round are skipped when their turn comes up, and
//! newcomers wait for the next round.

use std::cmp::Reverse;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{contexts, CombatantId, RandomSource, TurnError};

/// What the scheduler needs to know about combatants.
pub trait TurnRoster {
    /// Is the combatant present and alive?
    fn is_alive(&self, id: CombatantId) -> bool;

    /// Turn-order speed.
    fn speed(&self, id: CombatantId) -> i64;

    /// Called when a combatant's turn begins (cooldown ticking).
    fn on_turn_start(&mut self, id: CombatantId);
}

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No encounter started.
    #[default]
    Idle,
    /// Building the next round's queue.
    RoundBuilding,
    /// Handing out turns from the queue.
    RoundActive,
    /// No living combatants remain.
    Terminal,
}

/// Turn queue for one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScheduler {
    participants: Vec<CombatantId>,
    queue: VecDeque<CombatantId>,
    current: Option<CombatantId>,
    phase: TurnPhase,
    round: u32,
    shuffle_context: String,
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnScheduler {
    /// Create an idle scheduler shuffling with the `"TurnOrder"` context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(contexts::TURN_ORDER)
    }

    /// Create an idle scheduler shuffling with a custom RNG context.
    #[must_use]
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            participants: Vec::new(),
            queue: VecDeque::new(),
            current: None,
            phase: TurnPhase::Idle,
            round: 0,
            shuffle_context: context.into(),
        }
    }

    /// Reset and build the first round from `ids`.
    pub fn start_encounter<R>(
        &mut self,
        ids: impl IntoIterator<Item = CombatantId>,
        roster: &R,
        rng: &mut dyn RandomSource,
    ) where
        R: TurnRoster + ?Sized,
    {
        self.participants.clear();
        for id in ids {
            if !self.participants.contains(&id) {
                self.participants.push(id);
            }
        }
        self.queue.clear();
        self.current = None;
        self.round = 0;
        self.build_round(roster, rng);
    }

    /// Advance to the next living combatant.
    ///
    /// Returns `None` once nobody is left alive; the scheduler is then
    /// `Terminal` until the next `start_encounter`.
    pub fn next_turn<R>(&mut self, roster: &mut R, rng: &mut dyn RandomSource) -> Option<CombatantId>
    where
        R: TurnRoster + ?Sized,
    {
        self.current = None;
        if matches!(self.phase, TurnPhase::Idle | TurnPhase::Terminal) {
            return None;
        }

        loop {
            if self.queue.is_empty() && !self.build_round(roster, rng) {
                return None;
            }

            let Some(id) = self.queue.pop_front() else {
                continue;
            };
            if !roster.is_alive(id) || !self.participants.contains(&id) {
                debug!(combatant = %id, "skipping turn of departed combatant");
                continue;
            }

            self.current = Some(id);
            roster.on_turn_start(id);
            return Some(id);
        }
    }

    /// Finish the current combatant's turn.
    pub fn end_turn(&mut self) -> Result<CombatantId, TurnError> {
        if self.phase == TurnPhase::Terminal {
            return Err(TurnError::EncounterOver);
        }
        self.current.take().ok_or(TurnError::NoCurrentCombatant)
    }

    /// Join from the next round on.
    pub fn add_combatant(&mut self, id: CombatantId) {
        if !self.participants.contains(&id) {
            self.participants.push(id);
        }
    }

    /// Leave the encounter. Any queued turn is skipped.
    pub fn remove_combatant(&mut self, id: CombatantId) {
        self.participants.retain(|&p| p != id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    #[must_use]
    pub fn current_combatant(&self) -> Option<CombatantId> {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Rounds built so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Turns still queued this round, including any that will be skipped.
    pub fn queued(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn participants(&self) -> &[CombatantId] {
        &self.participants
    }

    /// Build a round from living participants. Returns `false` and goes
    /// `Terminal` if there are none.
    fn build_round<R>(&mut self, roster: &R, rng: &mut dyn RandomSource) -> bool
    where
        R: TurnRoster + ?Sized,
    {
        self.phase = TurnPhase::RoundBuilding;

        let mut order: Vec<CombatantId> = self
            .participants
            .iter()
            .copied()
            .filter(|&id| roster.is_alive(id))
            .collect();

        if order.is_empty() {
            debug!(round = self.round, "no living combatants, encounter over");
            self.phase = TurnPhase::Terminal;
            return false;
        }

        // Fisher-Yates, then a stable sort so only equal speeds keep the
        // shuffled order.
        for i in (1..order.len()).rev() {
            let j = rng.next_int(0, i as i64 + 1, &self.shuffle_context) as usize;
            order.swap(i, j);
        }
        order.sort_by_key(|&id| Reverse(roster.speed(id)));

        self.round += 1;
        debug!(round = self.round, order = ?order, "built round");
        self.queue = order.into();
        self.phase = TurnPhase::RoundActive;
        true
    }
}
