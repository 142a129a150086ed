//! Turn order.

mod scheduler;

pub use scheduler::{TurnPhase, TurnRoster, TurnScheduler};
