//! Game engine.
//!
//! Owns the live [`GameState`], turns commands and timer ticks into state
//! transitions, keeps the background processes in step with the round and
//! notifies subscribers after every mutation.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::engine::EngineConfig;
use crate::game::display::GameSnapshot;
use crate::game::entities::spawn_random_points;
use crate::game::error::{GameError, validate_point_count};
use crate::game::scheduler::{Scheduler, TimerToken};
use crate::game::state::{ClickOutcome, GameState};
use crate::game::types::{GameStatus, PointId, Process};

pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&GameSnapshot)>;

pub struct GameEngine<H> {
    state: GameState,
    config: EngineConfig,
    rng: StdRng,
    round: u64,
    timers: HashMap<Process, H>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

impl<H> GameEngine<H> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default(), StdRng::from_os_rng())
    }

    /// Engine with a reproducible point layout.
    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_config(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            state: GameState::new(),
            config,
            rng,
            round: 0,
            timers: HashMap::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of rounds started so far.
    #[cfg(test)]
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(&self.state, self.config.countdown_start)
    }

    /// Register an observer called with a fresh snapshot after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameSnapshot) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Remember the raw point-count input for the next [`GameEngine::play`].
    /// Anything that is not a whole number leaves the count unset.
    pub fn set_point_count(&mut self, raw: &str) -> Option<i64> {
        let parsed = raw.trim().parse::<i64>().ok();
        if self.state.point_count != parsed {
            self.state.point_count = parsed;
            self.notify();
        }
        parsed
    }

    /// Start (or restart) a round with the stored point count.
    pub fn play<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) -> Result<(), GameError> {
        match self.state.point_count {
            Some(count) => self.start(count, scheduler),
            None => {
                warn!("[GameEngine] Play requested without a point count");
                Err(GameError::InvalidConfiguration("point count is missing".to_string()))
            }
        }
    }

    /// Start a round of `count` points, replacing any round in progress.
    /// On error the state is left untouched.
    pub fn start<S: Scheduler<Handle = H>>(&mut self, count: i64, scheduler: &mut S) -> Result<(), GameError> {
        let count = validate_point_count(count, self.config.min_point_count, self.config.max_point_count)
            .inspect_err(|e| {
                warn!("[GameEngine] Rejected start: {}", e);
            })?;

        self.cancel_all(scheduler);
        self.round += 1;

        let points = spawn_random_points(&mut self.rng, count, self.config.point_margin);
        self.state.reset_round(points);
        self.state.point_count = Some(i64::from(count));
        info!("[GameEngine] Round {} started with {} points", self.round, count);

        self.sync_timers(scheduler);
        self.notify();
        Ok(())
    }

    pub fn click<S: Scheduler<Handle = H>>(&mut self, id: PointId, scheduler: &mut S) -> ClickOutcome {
        let outcome = self.state.click(id, self.config.countdown_start);
        match outcome {
            ClickOutcome::Ignored | ClickOutcome::AlreadyClicked => {
                debug!("[GameEngine] Click on {} ignored ({:?})", id, outcome);
                return outcome;
            }
            ClickOutcome::Correct => {
                debug!("[GameEngine] Correct click on {}, next is {}", id, self.state.next_expected_id);
            }
            ClickOutcome::GameOver => {
                info!(
                    "[GameEngine] Round {} over: clicked {} while {} was expected",
                    self.round, id, self.state.next_expected_id
                );
            }
        }
        self.sync_timers(scheduler);
        self.notify();
        outcome
    }

    pub fn toggle_auto_play<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) -> bool {
        let enabled = self.state.toggle_auto_play();
        debug!("[GameEngine] Auto-play {}", if enabled { "enabled" } else { "disabled" });
        self.sync_timers(scheduler);
        self.notify();
        enabled
    }

    /// Deliver one tick of a scheduled process.
    /// Ticks from a previous round or from a cancelled process are dropped.
    pub fn fire<S: Scheduler<Handle = H>>(&mut self, token: TimerToken, scheduler: &mut S) {
        if token.round != self.round || !self.timers.contains_key(&token.process) {
            warn!("[GameEngine] Ignored stale tick {:?} (current round {})", token, self.round);
            return;
        }

        let changed = match token.process {
            Process::ElapsedTicker => self.state.advance_elapsed(self.config.elapsed_step),
            Process::CountdownDecay => {
                let outcome = self.state.decay_countdowns(self.config.countdown_step);
                if outcome.cleared {
                    info!(
                        "[GameEngine] Round {} cleared in {:.1}s",
                        self.round, self.state.elapsed_seconds
                    );
                }
                outcome.changed
            }
            Process::AutoPlay => match self.state.auto_play_step(self.config.countdown_start) {
                Some(id) => {
                    debug!("[GameEngine] Auto-play clicked {}", id);
                    true
                }
                None => false,
            },
        };

        if changed {
            self.sync_timers(scheduler);
            self.notify();
        }
    }

    /// Cancel every live timer, e.g. when the host goes away.
    pub fn shutdown<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        self.cancel_all(scheduler);
    }

    fn wants(&self, process: Process) -> bool {
        let playing = self.state.status == GameStatus::Playing;
        match process {
            Process::ElapsedTicker | Process::CountdownDecay => playing,
            Process::AutoPlay => playing && self.state.auto_play_enabled,
        }
    }

    /// Bring the live timers in line with the current state.
    fn sync_timers<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        for process in Process::ALL {
            let wanted = self.wants(process);
            let running = self.timers.contains_key(&process);
            if wanted && !running {
                let token = TimerToken { process, round: self.round };
                let handle = scheduler.schedule(token, self.config.period_of(process));
                self.timers.insert(process, handle);
            } else if !wanted && running {
                if let Some(handle) = self.timers.remove(&process) {
                    scheduler.cancel(handle);
                }
            }
        }
    }

    fn cancel_all<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        for (_, handle) in self.timers.drain() {
            scheduler.cancel(handle);
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = GameSnapshot::from_state(&self.state, self.config.countdown_start);
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}

impl<H> Default for GameEngine<H> {
    fn default() -> Self {
        Self::new()
    }
}
