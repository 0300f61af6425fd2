//! Game controller
//!
//! Owns the round, the session, the countdown and the best score. Every
//! mutating operation finishes with the same explicit sequence: mutate the
//! round, check for a win, stop the countdown, update the best score, queue
//! a notification.

use crate::highscores::HighScore;
use crate::platform::ScoreStore;
use crate::sim::{
    Countdown, DiceRoller, DieId, GameEvent, GamePhase, Round, TickOutcome, TimerToken,
};

/// Result of `roll_dice`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// Unheld dice rerolled, no win yet
    Rolled,
    /// This roll completed the game
    Won,
    /// Pressed after a win: a new session was started
    NewGame,
    /// No running session (idle or lost)
    Ignored,
}

/// Result of `hold_die`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    Toggled { held: bool },
    /// This hold completed the game
    Won,
    /// No die with that id in the current round
    NotFound,
    /// No running session
    Ignored,
}

pub struct GameController<S: ScoreStore> {
    roller: DiceRoller,
    round: Round,
    phase: GamePhase,
    roll_count: u32,
    countdown: Countdown,
    high_score: HighScore,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> GameController<S> {
    /// Deal an idle round and load the best score from `store`
    pub fn new(seed: u64, store: S) -> Self {
        let mut roller = DiceRoller::new(seed);
        let round = roller.deal();
        let high_score = HighScore::load(&store);
        Self {
            roller,
            round,
            phase: GamePhase::Idle,
            roll_count: 0,
            countdown: Countdown::new(),
            high_score,
            store,
            events: Vec::new(),
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn has_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn roll_count(&self) -> u32 {
        self.roll_count
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    /// Token of the armed countdown, if a session is running
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.countdown.token()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Take the notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a session with a fresh deal and a full countdown
    pub fn start_game(&mut self) -> TimerToken {
        self.round = self.roller.deal();
        self.roll_count = 0;
        self.phase = GamePhase::Running;
        let token = self.countdown.arm();
        self.events.push(GameEvent::Started);
        log::info!("Game started");
        token
    }

    /// Reroll every unheld die. After a win the same control starts a new game.
    pub fn roll_dice(&mut self) -> RollOutcome {
        match self.phase {
            GamePhase::Running => {
                self.roller.reroll(&mut self.round);
                self.roll_count += 1;
                log::debug!(
                    "Roll {}: {} dice held",
                    self.roll_count,
                    self.round.held_count()
                );
                if self.after_round_mutation() {
                    RollOutcome::Won
                } else {
                    RollOutcome::Rolled
                }
            }
            GamePhase::Won => {
                self.reset_game();
                self.start_game();
                RollOutcome::NewGame
            }
            GamePhase::Idle | GamePhase::Lost => RollOutcome::Ignored,
        }
    }

    /// Toggle the held flag of one die
    pub fn hold_die(&mut self, id: DieId) -> HoldOutcome {
        if !self.is_running() {
            return HoldOutcome::Ignored;
        }
        let Some(held) = self.round.toggle_hold(id) else {
            log::debug!("Hold ignored, unknown die {}", id.raw());
            return HoldOutcome::NotFound;
        };
        if self.after_round_mutation() {
            HoldOutcome::Won
        } else {
            HoldOutcome::Toggled { held }
        }
    }

    /// Back to idle with a fresh deal, whatever the current state
    pub fn reset_game(&mut self) {
        self.round = self.roller.deal();
        self.roll_count = 0;
        self.phase = GamePhase::Idle;
        self.countdown.reset();
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
    }

    /// Whether the round is a win, regardless of phase
    pub fn evaluate_win_condition(&self) -> bool {
        self.round.is_tenzies()
    }

    /// Record the current roll count if it beats the best score
    pub fn update_high_score(&mut self) -> bool {
        self.high_score.submit(self.roll_count, &mut self.store)
    }

    pub fn reset_high_score(&mut self) {
        self.high_score.clear(&mut self.store);
        log::info!("High score reset");
    }

    /// One elapsed second of the countdown armed with `token`
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Stale;
        }
        let outcome = self.countdown.tick(token);
        if outcome == TickOutcome::Expired {
            self.phase = GamePhase::Lost;
            self.events.push(GameEvent::Lost);
            log::info!("Time up after {} rolls", self.roll_count);
        }
        outcome
    }

    /// Post-mutation hook. Returns true if this mutation won the game.
    fn after_round_mutation(&mut self) -> bool {
        if self.phase != GamePhase::Running || !self.evaluate_win_condition() {
            return false;
        }
        self.phase = GamePhase::Won;
        self.countdown.disarm();
        let new_high_score = self.update_high_score();
        self.events.push(GameEvent::Won {
            rolls: self.roll_count,
            new_high_score,
        });
        log::info!("Tenzies in {} rolls", self.roll_count);
        true
    }
}
