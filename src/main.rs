//! Tenzies entry point
//!
//! Handles platform-specific initialization and wires the page to the controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlSelectElement, MouseEvent};

    use tenzies::consts::{DICE_COUNT, TICK_INTERVAL_MS};
    use tenzies::platform::LocalStorage;
    use tenzies::sim::{GameEvent, TimerToken};
    use tenzies::ui::ViewModel;
    use tenzies::{GameController, Settings, Theme};

    /// Game instance holding all state
    struct Game {
        controller: GameController<LocalStorage>,
        settings: Settings,
        /// Browser interval handle and the countdown token it ticks
        interval: Option<(i32, TimerToken)>,
        cells: Vec<HtmlElement>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load(&LocalStorage);
            Self {
                controller: GameController::new(seed, LocalStorage),
                settings,
                interval: None,
                cells: Vec::with_capacity(DICE_COUNT),
            }
        }

        fn set_theme(&mut self, theme: Theme) {
            self.settings.theme = theme;
            self.settings.save(self.controller.store_mut());
            log::info!("Theme: {}", theme.as_str());
        }

        /// Copy the view model into the DOM
        fn render(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = ViewModel::from_controller(&self.controller, self.settings.theme);

            for (cell, die) in self.cells.iter().zip(&view.dice) {
                cell.set_text_content(Some(&die.value.to_string()));
                let _ = cell
                    .style()
                    .set_property("background-color", die.background);
                let class = if die.held { "die-face held" } else { "die-face" };
                let _ = cell.set_attribute("class", class);
            }

            set_text(&document, "rolls", &view.rolls_text);
            set_text(&document, "high-score", &view.high_score_text);

            if let Some(el) = document.get_element_by_id("timer") {
                match &view.time_text {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            set_visible(&document, "start-btn", view.show_start);
            set_visible(&document, "roll-btn", view.roll_label.is_some());
            if let Some(label) = view.roll_label {
                set_text(&document, "roll-btn", label);
            }

            if let Some(link) = document.get_element_by_id("theme-stylesheet") {
                let _ = link.set_attribute("href", view.stylesheet);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tenzies starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_dice(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_theme_select(&document, game.clone());

        game.borrow().render();
        log::info!("Tenzies running!");
    }

    /// Create the ten die cells; a click holds whatever die occupies the slot
    fn setup_dice(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(container) = document.get_element_by_id("dice-container") else {
            log::error!("Missing #dice-container");
            return;
        };

        for slot in 0..DICE_COUNT {
            let cell: HtmlElement = match document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into().ok())
            {
                Some(cell) => cell,
                None => continue,
            };
            let _ = cell.set_attribute("class", "die-face");

            let game_ref = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game_ref.borrow_mut();
                    let id = g.controller.round().dice()[slot].id;
                    g.controller.hold_die(id);
                }
                after_action(&game_ref);
            });
            let _ = cell.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            let _ = container.append_child(&cell);
            game.borrow_mut().cells.push(cell);
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", &game, |g| {
            g.controller.start_game();
        });
        on_click(document, "roll-btn", &game, |g| {
            g.controller.roll_dice();
        });
        on_click(document, "reset-btn", &game, |g| g.controller.reset_game());
        on_click(document, "reset-high-score-btn", &game, |g| {
            g.controller.reset_high_score()
        });
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: &Rc<RefCell<Game>>,
        action: impl Fn(&mut Game) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
            after_action(&game);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_theme_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(select) = document
            .get_element_by_id("theme-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };

        for theme in Theme::ALL {
            if let Ok(option) = document.create_element("option") {
                let _ = option.set_attribute("value", theme.as_str());
                option.set_text_content(Some(theme.as_str()));
                let _ = select.append_child(&option);
            }
        }
        select.set_value(game.borrow().settings.theme.as_str());

        let select_ref = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(theme) = Theme::from_str(&select_ref.value()) else {
                return;
            };
            let mut g = game.borrow_mut();
            g.set_theme(theme);
            g.render();
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Shared tail of every user action and tick
    fn after_action(game: &Rc<RefCell<Game>>) {
        sync_timer(game);
        game.borrow().render();
        notify(game);
    }

    /// Keep exactly one browser interval, for the controller's armed token
    fn sync_timer(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut g = game.borrow_mut();
        let wanted = g.controller.timer_token();
        if g.interval.map(|(_, token)| token) == wanted {
            return;
        }

        if let Some((handle, token)) = g.interval.take() {
            window.clear_interval_with_handle(handle);
            log::debug!("Countdown {:?} cancelled", token);
        }

        let Some(token) = wanted else {
            return;
        };
        let game_ref = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game_ref.borrow_mut().controller.tick(token);
            after_action(&game_ref);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        ) {
            Ok(handle) => g.interval = Some((handle, token)),
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
        // Stale ticks are rejected by the controller, so the closure may outlive its interval
        closure.forget();
    }

    /// Surface win/loss notifications
    fn notify(game: &Rc<RefCell<Game>>) {
        let events = game.borrow_mut().controller.drain_events();
        let Some(window) = web_sys::window() else {
            return;
        };
        for event in events {
            let message = match event {
                GameEvent::Won {
                    rolls,
                    new_high_score: true,
                } => format!("You win in {} rolls, a new high score! Click New Game to play again", rolls),
                GameEvent::Won { rolls, .. } => {
                    format!("You win in {} rolls! Click New Game to play again", rolls)
                }
                GameEvent::Lost => "You Lose, Try again!".to_string(),
                GameEvent::Started | GameEvent::Reset => continue,
            };
            let _ = window.alert_with_message(&message);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tenzies (native) starting...");
    log::info!("Native mode plays one headless demo game - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    demo::play(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: hold the most common face, roll once per simulated second
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use tenzies::sim::{DieId, GameEvent, Round, TickOutcome};
    use tenzies::ui::{ViewModel, render_text};
    use tenzies::{GameController, MemoryStore, RollOutcome, Theme};

    fn most_common_value(round: &Round) -> u8 {
        let mut counts = [0usize; 7];
        for die in round.dice() {
            counts[die.value as usize] += 1;
        }
        (1..=6u8).max_by_key(|&v| counts[v as usize]).unwrap_or(1)
    }

    pub fn play(seed: u64) {
        let mut game = GameController::new(seed, MemoryStore::new());
        let token = game.start_game();

        while game.is_running() {
            let target = most_common_value(game.round());
            let toggles: Vec<DieId> = game
                .round()
                .dice()
                .iter()
                .filter(|d| (d.value == target) != d.held)
                .map(|d| d.id)
                .collect();
            for id in toggles {
                game.hold_die(id);
            }
            if !game.is_running() {
                break;
            }
            if game.roll_dice() == RollOutcome::Won {
                break;
            }
            print!("{}", render_text(&ViewModel::from_controller(&game, Theme::Classic)));
            if game.tick(token) == TickOutcome::Expired {
                break;
            }
        }

        print!("{}", render_text(&ViewModel::from_controller(&game, Theme::Classic)));
        for event in game.drain_events() {
            match event {
                GameEvent::Won { rolls, .. } => println!("You win in {} rolls!", rolls),
                GameEvent::Lost => println!("You lose, time is up."),
                GameEvent::Started | GameEvent::Reset => {}
            }
        }
    }
}
