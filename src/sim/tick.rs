//! Countdown timer
//!
//! The countdown is armed when a session starts and disarmed on any exit
//! from `Running`. Every arming hands out a new `TimerToken`; a tick that
//! carries an older token is dropped, so a late browser callback cannot
//! touch a newer session.

use crate::consts::COUNTDOWN_SECONDS;

/// Handle for one armed countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Result of feeding one elapsed second into the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token not armed (stale callback or no session)
    Stale,
    /// One second consumed, time left
    Counting { remaining: u32 },
    /// Reached zero; the countdown is now disarmed
    Expired,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    armed: Option<TimerToken>,
    generation: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: COUNTDOWN_SECONDS,
            armed: None,
            generation: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Restore the full duration and arm with a fresh token
    pub fn arm(&mut self) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.remaining = COUNTDOWN_SECONDS;
        self.armed = Some(token);
        token
    }

    /// Cancel the armed token, keeping the remaining time for display
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Disarm and restore the full duration
    pub fn reset(&mut self) {
        self.disarm();
        self.remaining = COUNTDOWN_SECONDS;
    }

    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if self.armed != Some(token) {
            return TickOutcome::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = None;
            TickOutcome::Expired
        } else {
            TickOutcome::Counting {
                remaining: self.remaining,
            }
        }
    }
}
