//! View model
//!
//! Everything the page shows, derived from a controller snapshot. The wasm
//! shell copies it into the DOM; the native demo prints `render_text`.

use std::fmt::Write;

use crate::controller::GameController;
use crate::platform::ScoreStore;
use crate::settings::{Theme, UNHELD_COLOR};
use crate::sim::{DieId, GamePhase};

/// One die cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieCell {
    pub id: DieId,
    pub value: u8,
    pub held: bool,
    pub background: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub dice: Vec<DieCell>,
    pub rolls_text: String,
    pub high_score_text: String,
    /// Only while a session is running
    pub time_text: Option<String>,
    pub show_start: bool,
    /// `None` hides the Roll/New Game button
    pub roll_label: Option<&'static str>,
    pub theme: Theme,
    pub stylesheet: &'static str,
}

impl ViewModel {
    pub fn from_controller<S: ScoreStore>(game: &GameController<S>, theme: Theme) -> Self {
        let style = theme.style();
        let dice = game
            .round()
            .dice()
            .iter()
            .map(|d| DieCell {
                id: d.id,
                value: d.value,
                held: d.held,
                background: if d.held {
                    style.held_color
                } else {
                    UNHELD_COLOR
                },
            })
            .collect();

        let phase = game.phase();
        let roll_label = match phase {
            GamePhase::Running => Some("Roll"),
            GamePhase::Won => Some("New Game"),
            GamePhase::Idle | GamePhase::Lost => None,
        };

        Self {
            dice,
            rolls_text: format!("Rolls: {}", game.roll_count()),
            high_score_text: format!("High Score: {}", game.high_score()),
            time_text: (phase == GamePhase::Running)
                .then(|| format!("Time left: {} seconds", game.remaining_seconds())),
            show_start: matches!(phase, GamePhase::Idle | GamePhase::Lost),
            roll_label,
            theme,
            stylesheet: style.stylesheet,
        }
    }
}

/// Plain-text rendering, held dice in brackets
pub fn render_text(view: &ViewModel) -> String {
    let mut out = String::new();
    let cells: Vec<String> = view
        .dice
        .iter()
        .map(|d| {
            if d.held {
                format!("[{}]", d.value)
            } else {
                format!(" {} ", d.value)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", cells.join(""));
    let _ = writeln!(out, "{} | {}", view.rolls_text, view.high_score_text);
    if let Some(time) = &view.time_text {
        let _ = writeln!(out, "{}", time);
    }
    out
}
