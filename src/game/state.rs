//! Round state and its transitions.
//!
//! Everything here is synchronous and free of timers: the engine decides
//! *when* a transition runs, this module decides *what* it does.

use serde::{Serialize, Deserialize};
use log::debug;

use crate::game::types::{GameStatus, Point, PointId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub points: Vec<Point>,
    /// Count requested for the next round, as last typed by the player.
    pub point_count: Option<i64>,
    pub next_expected_id: PointId,
    pub elapsed_seconds: f64,
    pub status: GameStatus,
    pub auto_play_enabled: bool,
    pub clicked_history: Vec<PointId>,
}

/// What a click did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Round is not being played; nothing happened.
    Ignored,
    /// The id had already been clicked; nothing happened.
    AlreadyClicked,
    Correct,
    GameOver,
}

/// What a countdown decay tick did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecayOutcome {
    pub changed: bool,
    pub removed: usize,
    pub cleared: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            point_count: None,
            next_expected_id: 0,
            elapsed_seconds: 0.0,
            status: GameStatus::Idle,
            auto_play_enabled: false,
            clicked_history: Vec::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Begin a new round with freshly generated points.
    pub fn reset_round(&mut self, points: Vec<Point>) {
        self.points = points;
        self.next_expected_id = 0;
        self.elapsed_seconds = 0.0;
        self.clicked_history.clear();
        self.auto_play_enabled = false;
        self.status = GameStatus::Playing;
    }

    /// Apply a player click on `id`.
    pub fn click(&mut self, id: PointId, countdown: f64) -> ClickOutcome {
        if !self.is_playing() {
            return ClickOutcome::Ignored;
        }
        if id < self.next_expected_id {
            return ClickOutcome::AlreadyClicked;
        }
        if id != self.next_expected_id {
            self.status = GameStatus::GameOver;
            return ClickOutcome::GameOver;
        }
        // Every point is clicked and fading; there is no point with this id.
        if !self.mark_next_clicked(countdown) {
            return ClickOutcome::Ignored;
        }
        ClickOutcome::Correct
    }

    pub fn toggle_auto_play(&mut self) -> bool {
        self.auto_play_enabled = !self.auto_play_enabled;
        self.auto_play_enabled
    }

    /// Elapsed-time ticker step. Returns false when the round is not running.
    pub fn advance_elapsed(&mut self, step: f64) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.elapsed_seconds += step;
        true
    }

    /// Countdown decay step: shrink every running countdown, drop the points
    /// whose countdown reached zero and clear the round if none remain.
    pub fn decay_countdowns(&mut self, step: f64) -> DecayOutcome {
        let mut outcome = DecayOutcome::default();
        if !self.is_playing() {
            return outcome;
        }

        for point in self.points.iter_mut().filter(|p| p.clicked) {
            if let Some(remaining) = point.countdown.as_mut() {
                if *remaining > 0.0 {
                    let next = *remaining - step;
                    // Absorb float residue so a full countdown always lasts a whole number of steps.
                    *remaining = if next < step * 1e-6 { 0.0 } else { next };
                    outcome.changed = true;
                }
            }
        }

        let before = self.points.len();
        self.points.retain(|p| !p.is_expired());
        outcome.removed = before - self.points.len();
        if outcome.removed > 0 {
            outcome.changed = true;
            debug!("[GameState] Removed {} faded point(s), {} left", outcome.removed, self.points.len());
        }

        outcome.cleared = self.check_cleared();
        outcome
    }

    /// Auto-play step: click the expected point if it is still on the board.
    pub fn auto_play_step(&mut self, countdown: f64) -> Option<PointId> {
        if !self.is_playing() || !self.auto_play_enabled {
            return None;
        }
        let expected = self.next_expected_id;
        self.mark_next_clicked(countdown).then_some(expected)
    }

    /// Switch to `cleared` when the board emptied during play.
    pub fn check_cleared(&mut self) -> bool {
        if self.is_playing() && self.points.is_empty() {
            self.status = GameStatus::Cleared;
            return true;
        }
        false
    }

    /// Smallest id that has not been clicked yet, if any point is left unclicked.
    #[cfg(test)]
    pub fn min_unclicked_id(&self) -> Option<PointId> {
        self.points.iter().filter(|p| !p.clicked).map(|p| p.id).min()
    }

    /// Click the expected point if it is on the board and unclicked.
    fn mark_next_clicked(&mut self, countdown: f64) -> bool {
        let id = self.next_expected_id;
        let Some(point) = self.points.iter_mut().find(|p| p.id == id && !p.clicked) else {
            return false;
        };
        point.mark_clicked(countdown);
        self.clicked_history.push(id);
        self.next_expected_id += 1;
        true
    }
}
