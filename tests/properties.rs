//! Property-based tests for the game lifecycle.

use proptest::prelude::*;

use tenzies::consts::{COUNTDOWN_SECONDS, DICE_COUNT, HIGH_SCORE_KEY};
use tenzies::sim::{DiceRoller, Die, GamePhase, Round, TickOutcome};
use tenzies::{GameController, HighScore, HoldOutcome, MemoryStore, RollOutcome, ScoreStore};

/// A player action drawn at random
#[derive(Debug, Clone)]
enum Action {
    Start,
    Roll,
    Hold(usize),
    Reset,
    Tick,
    ResetHighScore,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Start),
        4 => Just(Action::Roll),
        6 => (0..DICE_COUNT).prop_map(Action::Hold),
        1 => Just(Action::Reset),
        3 => Just(Action::Tick),
        1 => Just(Action::ResetHighScore),
    ]
}

fn apply(game: &mut GameController<MemoryStore>, action: &Action) {
    match action {
        Action::Start => {
            game.start_game();
        }
        Action::Roll => {
            game.roll_dice();
        }
        Action::Hold(slot) => {
            let id = game.round().dice()[*slot].id;
            game.hold_die(id);
        }
        Action::Reset => game.reset_game(),
        Action::Tick => {
            if let Some(token) = game.timer_token() {
                game.tick(token);
            }
        }
        Action::ResetHighScore => game.reset_high_score(),
    }
}

/// Strategy: ten dice with arbitrary values and held flags.
/// Ids are opaque, so they come from a real deal.
fn round_strategy() -> impl Strategy<Value = Round> {
    prop::array::uniform10((1..=6u8, any::<bool>())).prop_map(|cells| {
        let mut dice: [Die; DICE_COUNT] = *DiceRoller::new(0).deal().dice();
        for (die, (value, held)) in dice.iter_mut().zip(cells) {
            die.value = value;
            die.held = held;
        }
        Round::from_dice(dice)
    })
}

proptest! {
    // Every die ever shown is in 1..=6 and the round always has ten dice
    #[test]
    fn dice_in_range(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 0..80)) {
        let mut game = GameController::new(seed, MemoryStore::new());
        for action in &actions {
            apply(&mut game, action);
            prop_assert_eq!(game.round().dice().len(), DICE_COUNT);
            prop_assert!(game.round().dice().iter().all(|d| (1..=6).contains(&d.value)));
            prop_assert!(game.remaining_seconds() <= COUNTDOWN_SECONDS);
        }
    }

    // Rolling never changes a die that was held at call time
    #[test]
    fn roll_keeps_held(seed in any::<u64>(), holds in prop::collection::vec(0..DICE_COUNT, 0..9), rolls in 1..20usize) {
        let mut game = GameController::new(seed, MemoryStore::new());
        game.start_game();
        for slot in holds {
            let id = game.round().dice()[slot].id;
            game.hold_die(id);
        }
        for _ in 0..rolls {
            if !game.is_running() {
                break;
            }
            let before = game.round().clone();
            game.roll_dice();
            for (old, new) in before.dice().iter().zip(game.round().dice()) {
                if old.held {
                    prop_assert_eq!(old, new);
                } else {
                    prop_assert!(!new.held);
                    prop_assert_ne!(old.id, new.id);
                }
            }
        }
    }

    // The win predicate is exactly "all held and all equal"
    #[test]
    fn win_predicate(round in round_strategy()) {
        let dice = round.dice();
        let expected = dice.iter().filter(|d| d.held).count() == DICE_COUNT
            && dice.iter().all(|d| d.value == dice[0].value);
        prop_assert_eq!(round.is_tenzies(), expected);
    }

    // The stored best score only ever goes down
    #[test]
    fn high_score_monotonic(stored in prop::option::of(0..100u32), rolls in 0..100u32) {
        let mut store = MemoryStore::new();
        let mut best = match stored {
            Some(v) => HighScore::new(v),
            None => HighScore::unset(),
        };
        let improved = best.submit(rolls, &mut store);
        match stored {
            Some(v) if rolls >= v => {
                prop_assert!(!improved);
                prop_assert_eq!(best.get(), Some(v));
            }
            _ => {
                prop_assert!(improved);
                prop_assert_eq!(best.get(), Some(rolls));
                prop_assert_eq!(HighScore::load(&store), best);
            }
        }
    }

    // Reset from any reachable state lands in a clean idle state
    #[test]
    fn reset_from_any_state(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 0..80)) {
        let mut game = GameController::new(seed, MemoryStore::new());
        for action in &actions {
            apply(&mut game, action);
        }
        game.reset_game();
        prop_assert_eq!(game.phase(), GamePhase::Idle);
        prop_assert!(!game.is_running());
        prop_assert!(!game.has_won());
        prop_assert_eq!(game.roll_count(), 0);
        prop_assert_eq!(game.round().held_count(), 0);
        prop_assert_eq!(game.timer_token(), None);
    }

    // Holding the same die twice restores its held flag
    #[test]
    fn hold_twice_is_identity(seed in any::<u64>(), slot in 0..DICE_COUNT, pre_holds in prop::collection::vec(0..DICE_COUNT, 0..5)) {
        let mut game = GameController::new(seed, MemoryStore::new());
        game.start_game();
        for s in pre_holds {
            let id = game.round().dice()[s].id;
            game.hold_die(id);
        }
        prop_assume!(game.is_running());

        let before = game.round().clone();
        let id = before.dice()[slot].id;
        let first = game.hold_die(id);
        prop_assume!(first != HoldOutcome::Won);
        game.hold_die(id);
        prop_assert_eq!(game.round(), &before);
    }

    // Ticks never touch the best score, and the phase tracks win/loss
    #[test]
    fn phase_consistency(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 0..120)) {
        let mut game = GameController::new(seed, MemoryStore::new());
        for action in &actions {
            let best_before = game.high_score();
            let is_tick = matches!(action, Action::Tick);
            apply(&mut game, action);

            if is_tick {
                prop_assert_eq!(game.high_score(), best_before);
            }
            match game.phase() {
                GamePhase::Running => prop_assert!(game.timer_token().is_some()),
                GamePhase::Won => {
                    prop_assert!(game.evaluate_win_condition());
                    prop_assert_eq!(game.timer_token(), None);
                }
                GamePhase::Lost => {
                    prop_assert_eq!(game.remaining_seconds(), 0);
                    prop_assert_eq!(game.timer_token(), None);
                }
                GamePhase::Idle => prop_assert_eq!(game.timer_token(), None),
            }
        }
    }
}

#[test]
fn loss_leaves_high_score_unchanged() {
    let store = MemoryStore::new().with_item(HIGH_SCORE_KEY, "5");
    let mut game = GameController::new(2024, store);
    let token = game.start_game();
    let mut outcome = TickOutcome::Stale;
    for _ in 0..COUNTDOWN_SECONDS {
        outcome = game.tick(token);
    }
    assert_eq!(outcome, TickOutcome::Expired);
    assert_eq!(game.phase(), GamePhase::Lost);
    assert_eq!(game.high_score().get(), Some(5));
    assert_eq!(game.store().get_item(HIGH_SCORE_KEY), Ok(Some("5".to_string())));
    assert_eq!(game.roll_dice(), RollOutcome::Ignored);
}

#[test]
fn reset_high_score_reads_unset() {
    let store = MemoryStore::new().with_item(HIGH_SCORE_KEY, "17");
    let mut game = GameController::new(1, store);
    game.reset_high_score();
    assert_eq!(game.high_score().to_string(), "-");

    // A fresh controller over the same store sees no record either
    let reloaded = GameController::new(1, game.store().clone());
    assert!(!reloaded.high_score().is_set());
}
