//! Deterministic game core
//!
//! Dice, rounds and the countdown. No platform dependencies:
//! - Seeded RNG only
//! - Time advances only through explicit ticks

pub mod state;
pub mod tick;

pub use state::{DiceRoller, Die, DieId, GameEvent, GamePhase, Round};
pub use tick::{Countdown, TickOutcome, TimerToken};
