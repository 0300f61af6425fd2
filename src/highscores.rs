//! Best score: the fewest rolls ever needed to win
//!
//! Persisted as a decimal string under a single LocalStorage key. A missing,
//! unreadable or non-numeric value loads as "unset".

use std::fmt;

use crate::consts::HIGH_SCORE_KEY;
use crate::platform::ScoreStore;

/// Best (lowest) winning roll count, `None` when no game has been won yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(Option<u32>);

impl HighScore {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn new(rolls: u32) -> Self {
        Self(Some(rolls))
    }

    pub fn get(&self) -> Option<u32> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Whether `rolls` strictly beats the record (unset counts as infinity)
    pub fn is_beaten_by(&self, rolls: u32) -> bool {
        self.0.is_none_or(|best| rolls < best)
    }

    /// Load from the store, falling back to unset on any problem
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(rolls) => {
                    log::info!("Loaded high score: {} rolls", rolls);
                    Self::new(rolls)
                }
                Err(_) => {
                    log::warn!("Ignoring invalid stored high score {:?}", raw);
                    Self::unset()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::unset()
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                Self::unset()
            }
        }
    }

    /// Record `rolls` if it beats the current value. Returns true on a new record.
    pub fn submit(&mut self, rolls: u32, store: &mut impl ScoreStore) -> bool {
        if !self.is_beaten_by(rolls) {
            return false;
        }
        self.0 = Some(rolls);
        match store.set_item(HIGH_SCORE_KEY, &rolls.to_string()) {
            Ok(()) => log::info!("New high score saved: {} rolls", rolls),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
        true
    }

    /// Clear the record in memory and in the store
    pub fn clear(&mut self, store: &mut impl ScoreStore) {
        self.0 = None;
        if let Err(e) = store.remove_item(HIGH_SCORE_KEY) {
            log::warn!("Could not remove high score: {}", e);
        }
    }
}

/// Renders "-" when unset
impl fmt::Display for HighScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rolls) => write!(f, "{}", rolls),
            None => f.write_str("-"),
        }
    }
}
