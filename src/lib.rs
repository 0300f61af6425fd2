//! Tenzies - roll until all ten dice show the same face
//!
//! Core modules:
//! - `sim`: Dice, rounds and the countdown (deterministic, seeded)
//! - `controller`: Game lifecycle, win/lose detection, best score
//! - `platform`: LocalStorage-shaped key/value storage
//! - `settings`: Cosmetic theme preferences
//! - `ui`: View model consumed by the page

pub mod controller;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use controller::{GameController, HoldOutcome, RollOutcome};
pub use highscores::HighScore;
pub use platform::{MemoryStore, ScoreStore, StorageError};
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Dice per round
    pub const DICE_COUNT: usize = 10;
    /// Faces per die (values 1..=DIE_FACES)
    pub const DIE_FACES: u8 = 6;
    /// Countdown length per session
    pub const COUNTDOWN_SECONDS: u32 = 30;
    /// Countdown tick period
    pub const TICK_INTERVAL_MS: i32 = 1000;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "highScore";
    pub const SETTINGS_KEY: &str = "tenzies_settings";
}
