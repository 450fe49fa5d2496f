use serde::{Serialize, Deserialize};

/// Identifier of a point; also its position in the required click order.
pub type PointId = u32;

/// Lifecycle of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Idle,
    Playing,
    Cleared,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub top: f64,
    pub left: f64,
    pub clicked: bool,
    pub countdown: Option<f64>,
}

impl Point {
    pub fn new(id: PointId, top: f64, left: f64) -> Self {
        Self {
            id,
            top,
            left,
            clicked: false,
            countdown: None,
        }
    }

    /// Mark the point as correctly clicked and start its fade-out.
    pub fn mark_clicked(&mut self, countdown: f64) {
        self.clicked = true;
        self.countdown = Some(countdown);
    }

    /// True once the fade-out has run out.
    pub fn is_expired(&self) -> bool {
        matches!(self.countdown, Some(remaining) if remaining <= 0.0)
    }

    /// 1-based number shown on the marker.
    pub fn label(&self) -> u32 {
        self.id + 1
    }
}

/// The periodic background processes driven while a round is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Process {
    ElapsedTicker,
    CountdownDecay,
    AutoPlay,
}

impl Process {
    pub const ALL: [Process; 3] = [Process::ElapsedTicker, Process::CountdownDecay, Process::AutoPlay];
}
