//! Dice, round and session types
//!
//! Everything the controller mutates lives here. The RNG is seeded by the
//! caller so a session can be replayed exactly in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{DICE_COUNT, DIE_FACES};

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Dice dealt, waiting for Start
    #[default]
    Idle,
    /// Countdown running, rolls and holds accepted
    Running,
    /// All dice held on one value
    Won,
    /// Countdown hit zero first
    Lost,
}

/// Notifications surfaced to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Won { rolls: u32, new_high_score: bool },
    Lost,
    Reset,
}

/// Opaque die identity. A die gets a fresh id every time its value is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieId(u32);

impl DieId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A single die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub id: DieId,
    /// Face value, 1..=6
    pub value: u8,
    /// Frozen between rolls
    pub held: bool,
}

/// The ten dice in play, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    dice: [Die; DICE_COUNT],
}

impl Round {
    /// Build a round from explicit dice (tests and replays)
    pub fn from_dice(dice: [Die; DICE_COUNT]) -> Self {
        Self { dice }
    }

    pub fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }

    pub fn get(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|d| d.id == id)
    }

    /// Toggle the held flag of the die with `id`. Returns the new flag, or
    /// `None` if no die carries that id.
    pub fn toggle_hold(&mut self, id: DieId) -> Option<bool> {
        let die = self.dice.iter_mut().find(|d| d.id == id)?;
        die.held = !die.held;
        Some(die.held)
    }

    pub fn held_count(&self) -> usize {
        self.dice.iter().filter(|d| d.held).count()
    }

    /// Win predicate: every die held and every die showing the same value.
    /// Deliberately independent of the session phase.
    pub fn is_tenzies(&self) -> bool {
        let first = self.dice[0].value;
        self.dice.iter().all(|d| d.held && d.value == first)
    }
}

/// Source of dice: seeded RNG plus the id allocator
#[derive(Debug, Clone)]
pub struct DiceRoller {
    rng: Pcg32,
    next_id: u32,
}

impl DiceRoller {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn next_die_id(&mut self) -> DieId {
        let id = DieId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// A fresh unheld die with a uniform value in 1..=6
    pub fn new_die(&mut self) -> Die {
        Die {
            id: self.next_die_id(),
            value: self.rng.random_range(1..=DIE_FACES),
            held: false,
        }
    }

    /// Ten fresh unheld dice
    pub fn deal(&mut self) -> Round {
        Round {
            dice: std::array::from_fn(|_| self.new_die()),
        }
    }

    /// Replace every unheld die; held dice keep their id and value
    pub fn reroll(&mut self, round: &mut Round) {
        for die in round.dice.iter_mut().filter(|d| !d.held) {
            *die = self.new_die();
        }
    }
}
