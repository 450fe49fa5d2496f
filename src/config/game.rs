//! Game configuration constants.
//!
//! This module defines the main gameplay parameters such as the minimum
//! round size, board margins, and the periods of the background processes.

use std::time::Duration;

/// Minimum number of points a round can be started with.
pub const MIN_POINT_COUNT: i64 = 3;

/// Maximum number of points a round can be started with.
pub const MAX_POINT_COUNT: i64 = 10_000;

/// Distance (in percent of the board) kept free on every edge.
/// Points are placed with `top`/`left` in `[POINT_MARGIN, 100 - POINT_MARGIN]`.
pub const POINT_MARGIN: f64 = 8.0;

/// Seconds a correctly clicked point stays on the board before removal.
pub const COUNTDOWN_START: f64 = 3.0;

/// Period of the elapsed-time ticker.
pub const ELAPSED_TICK: Duration = Duration::from_millis(100);

/// Seconds added to the elapsed time on every ticker period.
pub const ELAPSED_STEP: f64 = 0.1;

/// Period of the countdown decay loop (about 60 times per second).
pub const COUNTDOWN_TICK: Duration = Duration::from_micros(16_667);

/// Seconds removed from every running countdown on each decay tick.
pub const COUNTDOWN_STEP: f64 = 1.0 / 60.0;

/// Period of the auto-play driver.
pub const AUTO_PLAY_TICK: Duration = Duration::from_millis(500);
