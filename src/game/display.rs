//! Derived presentation state.
//!
//! Pure functions of [`GameState`]; a renderer only needs a [`GameSnapshot`].

use serde::Serialize;

use crate::game::state::GameState;
use crate::game::types::{GameStatus, Point, PointId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub text: &'static str,
    pub highlighted: bool,
}

pub fn title(status: GameStatus) -> Title {
    match status {
        GameStatus::Idle | GameStatus::Playing => Title { text: "LET'S PLAY", highlighted: false },
        GameStatus::Cleared => Title { text: "ALL CLEARED", highlighted: true },
        GameStatus::GameOver => Title { text: "GAME OVER", highlighted: true },
    }
}

pub fn button_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "Play",
        _ => "Restart",
    }
}

/// Elapsed time as shown next to "Time:", e.g. `"3.4s"`.
pub fn format_elapsed(seconds: f64) -> String {
    format!("{:.1}s", seconds)
}

/// One marker as the renderer draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView {
    pub id: PointId,
    pub label: u32,
    pub top: f64,
    pub left: f64,
    pub clicked: bool,
    pub countdown: Option<f64>,
    pub opacity: f64,
}

impl PointView {
    /// `countdown_start` is the full fade duration, used to scale opacity.
    pub fn from_point(point: &Point, countdown_start: f64) -> Self {
        let opacity = match point.countdown {
            Some(remaining) if countdown_start > 0.0 => (remaining / countdown_start).clamp(0.0, 1.0),
            Some(_) => 0.0,
            None => 1.0,
        };
        Self {
            id: point.id,
            label: point.label(),
            top: point.top,
            left: point.left,
            clicked: point.clicked,
            countdown: point.countdown,
            opacity,
        }
    }
}

/// Everything an observer receives after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub title: Title,
    pub button_label: &'static str,
    pub time_text: String,
    pub points: Vec<PointView>,
}

impl GameSnapshot {
    pub fn from_state(state: &GameState, countdown_start: f64) -> Self {
        Self {
            state: state.clone(),
            title: title(state.status),
            button_label: button_label(state.status),
            time_text: format_elapsed(state.elapsed_seconds),
            points: state.points.iter().map(|p| PointView::from_point(p, countdown_start)).collect(),
        }
    }
}
