//! Engine tuning.
//!
//! Gathers the gameplay constants into a single value handed to the engine,
//! so a host (or a test) can run rounds with different timings.

use std::time::Duration;

use crate::config::game::{
    AUTO_PLAY_TICK, COUNTDOWN_START, COUNTDOWN_STEP, COUNTDOWN_TICK, ELAPSED_STEP, ELAPSED_TICK,
    MAX_POINT_COUNT, MIN_POINT_COUNT, POINT_MARGIN,
};
use crate::game::types::Process;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub min_point_count: i64,
    pub max_point_count: i64,
    pub point_margin: f64,
    pub countdown_start: f64,
    pub countdown_step: f64,
    pub countdown_tick: Duration,
    pub elapsed_step: f64,
    pub elapsed_tick: Duration,
    pub auto_play_tick: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_point_count: MIN_POINT_COUNT,
            max_point_count: MAX_POINT_COUNT,
            point_margin: POINT_MARGIN,
            countdown_start: COUNTDOWN_START,
            countdown_step: COUNTDOWN_STEP,
            countdown_tick: COUNTDOWN_TICK,
            elapsed_step: ELAPSED_STEP,
            elapsed_tick: ELAPSED_TICK,
            auto_play_tick: AUTO_PLAY_TICK,
        }
    }
}

impl EngineConfig {
    /// Period at which the given background process is scheduled.
    pub fn period_of(&self, process: Process) -> Duration {
        match process {
            Process::ElapsedTicker => self.elapsed_tick,
            Process::CountdownDecay => self.countdown_tick,
            Process::AutoPlay => self.auto_play_tick,
        }
    }
}
