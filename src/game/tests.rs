//! Round scenarios driven through the engine on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::game::display::GameSnapshot;
use crate::game::engine::GameEngine;
use crate::game::error::GameError;
use crate::game::scheduler::{ManualHandle, ManualScheduler, TimerToken};
use crate::game::state::ClickOutcome;
use crate::game::types::{GameStatus, Process};

type Engine = GameEngine<ManualHandle>;

fn setup(count: i64) -> (Engine, ManualScheduler) {
    let mut engine = Engine::with_seed(42);
    let mut scheduler = ManualScheduler::new();
    engine.start(count, &mut scheduler).expect("valid count");
    (engine, scheduler)
}

fn record_snapshots(engine: &mut Engine) -> Rc<RefCell<Vec<GameSnapshot>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
    seen
}

fn decay_ticks(scheduler: &mut ManualScheduler, engine: &mut Engine, ticks: usize) {
    for _ in 0..ticks {
        assert!(scheduler.fire_once(engine, Process::CountdownDecay), "decay loop not running");
    }
}

#[test]
fn test_start_rejects_small_counts() {
    let mut engine = Engine::with_seed(1);
    let mut scheduler = ManualScheduler::new();
    for count in [2, 0, -1] {
        assert!(matches!(
            engine.start(count, &mut scheduler),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
    assert_eq!(engine.state().status, GameStatus::Idle);
    assert!(engine.state().points.is_empty());
    assert!(scheduler.active_tokens().is_empty());
}

#[test]
fn test_start_rejects_huge_counts() {
    let mut engine = Engine::with_seed(1);
    let mut scheduler = ManualScheduler::new();
    for count in [10_001, i64::from(u32::MAX), i64::MAX] {
        assert!(matches!(
            engine.start(count, &mut scheduler),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
    assert_eq!(engine.state().status, GameStatus::Idle);
    assert!(engine.state().points.is_empty());
    engine.start(10_000, &mut scheduler).expect("upper bound is allowed");
    assert_eq!(engine.state().points.len(), 10_000);
}

#[test]
fn test_click_after_all_clicked_changes_nothing() {
    let (mut engine, mut scheduler) = setup(3);
    for id in 0..3 {
        engine.click(id, &mut scheduler);
    }
    assert_eq!(engine.click(3, &mut scheduler), ClickOutcome::Ignored);
    assert_eq!(engine.state().clicked_history, vec![0, 1, 2]);
    assert_eq!(engine.state().next_expected_id, 3);

    scheduler.advance(&mut engine, Duration::from_secs(4));
    assert_eq!(engine.state().status, GameStatus::Cleared);
}

#[test]
fn test_failed_restart_keeps_round() {
    let (mut engine, mut scheduler) = setup(4);
    engine.click(0, &mut scheduler);
    let before = engine.state().clone();
    assert!(engine.start(1, &mut scheduler).is_err());
    assert_eq!(engine.state(), &before);
    assert!(scheduler.is_running(Process::ElapsedTicker));
}

#[test]
fn test_start_three_points() {
    let (engine, scheduler) = setup(3);
    let state = engine.state();
    assert_eq!(state.status, GameStatus::Playing);
    let mut ids: Vec<_> = state.points.iter().map(|p| p.id).collect();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2]);
    for p in &state.points {
        assert!((8.0..=92.0).contains(&p.top));
        assert!((8.0..=92.0).contains(&p.left));
    }
    assert!(scheduler.is_running(Process::ElapsedTicker));
    assert!(scheduler.is_running(Process::CountdownDecay));
    assert!(!scheduler.is_running(Process::AutoPlay));
}

#[test]
fn test_play_uses_stored_count() {
    let mut engine = Engine::with_seed(3);
    let mut scheduler = ManualScheduler::new();
    assert!(engine.play(&mut scheduler).is_err());

    assert_eq!(engine.set_point_count("abc"), None);
    assert!(engine.play(&mut scheduler).is_err());

    engine.set_point_count("2");
    assert!(engine.play(&mut scheduler).is_err());
    assert_eq!(engine.state().status, GameStatus::Idle);

    engine.set_point_count(" 5 ");
    engine.play(&mut scheduler).expect("five points");
    assert_eq!(engine.state().points.len(), 5);
}

#[test]
fn test_correct_clicks_advance() {
    let (mut engine, mut scheduler) = setup(6);
    for id in 0..6 {
        assert_eq!(engine.state().next_expected_id, id);
        assert_eq!(engine.click(id, &mut scheduler), ClickOutcome::Correct);
        assert_eq!(engine.state().next_expected_id, id + 1);
        assert_ne!(engine.state().status, GameStatus::GameOver);
    }
    assert_eq!(engine.state().clicked_history, (0..6).collect::<Vec<_>>());
}

#[test]
fn test_wrong_click_game_over() {
    let (mut engine, mut scheduler) = setup(5);
    assert_eq!(engine.click(1, &mut scheduler), ClickOutcome::GameOver);
    assert_eq!(engine.state().status, GameStatus::GameOver);
    assert!(scheduler.active_tokens().is_empty());

    assert_eq!(engine.click(0, &mut scheduler), ClickOutcome::Ignored);
    engine.toggle_auto_play(&mut scheduler);
    scheduler.advance(&mut engine, Duration::from_secs(5));
    assert_eq!(engine.state().next_expected_id, 0);
    assert_eq!(engine.state().elapsed_seconds, 0.0);
    assert_eq!(engine.state().status, GameStatus::GameOver);
}

#[test]
fn test_clicked_point_fades_then_removed() {
    let (mut engine, mut scheduler) = setup(3);
    engine.click(0, &mut scheduler);

    // 3.0s at 1/60s per tick.
    decay_ticks(&mut scheduler, &mut engine, 179);
    let point = engine.state().points.iter().find(|p| p.id == 0).expect("still fading");
    let remaining = point.countdown.expect("countdown set");
    assert!(remaining > 0.0 && remaining < 0.02);
    assert_eq!(engine.state().points.len(), 3);

    decay_ticks(&mut scheduler, &mut engine, 1);
    assert_eq!(engine.state().points.len(), 2);
    assert!(engine.state().points.iter().all(|p| p.id != 0));
}

#[test]
fn test_countdown_monotonic() {
    let (mut engine, mut scheduler) = setup(3);
    engine.click(0, &mut scheduler);
    let mut last = 3.0;
    for _ in 0..100 {
        decay_ticks(&mut scheduler, &mut engine, 1);
        let now = engine.state().points[0].countdown.expect("countdown set");
        assert!(now < last);
        last = now;
    }
}

#[test]
fn test_removals_one_at_a_time() {
    let (mut engine, mut scheduler) = setup(4);
    let mut lengths = vec![engine.state().points.len()];
    for id in 0..4 {
        engine.click(id, &mut scheduler);
        decay_ticks(&mut scheduler, &mut engine, 30);
    }
    for _ in 0..300 {
        decay_ticks_if_running(&mut scheduler, &mut engine);
        let len = engine.state().points.len();
        if Some(&len) != lengths.last() {
            lengths.push(len);
        }
    }
    assert_eq!(lengths, vec![4, 3, 2, 1, 0]);
}

fn decay_ticks_if_running(scheduler: &mut ManualScheduler, engine: &mut Engine) {
    scheduler.fire_once(engine, Process::CountdownDecay);
}

#[test]
fn test_clear_happens_once_and_time_stops() {
    let (mut engine, mut scheduler) = setup(3);
    let snapshots = record_snapshots(&mut engine);
    for id in 0..3 {
        engine.click(id, &mut scheduler);
    }
    scheduler.advance(&mut engine, Duration::from_secs(4));
    assert_eq!(engine.state().status, GameStatus::Cleared);
    assert!(scheduler.active_tokens().is_empty());

    let elapsed = engine.state().elapsed_seconds;
    assert!(elapsed > 2.9 && elapsed < 3.2, "elapsed {elapsed}");
    scheduler.advance(&mut engine, Duration::from_secs(2));
    assert_eq!(engine.state().elapsed_seconds, elapsed);

    let cleared = snapshots
        .borrow()
        .windows(2)
        .filter(|w| w[0].state.status == GameStatus::Playing && w[1].state.status == GameStatus::Cleared)
        .count();
    assert_eq!(cleared, 1);
    let last = snapshots.borrow().last().cloned().expect("notified");
    assert_eq!(last.title.text, "ALL CLEARED");
    assert_eq!(last.button_label, "Restart");
}

#[test]
fn test_auto_play_clears_round() {
    let (mut engine, mut scheduler) = setup(5);
    assert!(engine.toggle_auto_play(&mut scheduler));
    assert!(scheduler.is_running(Process::AutoPlay));

    scheduler.advance(&mut engine, Duration::from_secs(10));
    let state = engine.state();
    assert_eq!(state.next_expected_id, 5);
    assert_eq!(state.status, GameStatus::Cleared);
    assert_eq!(state.clicked_history, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_auto_play_toggle_off_stops_driver() {
    let (mut engine, mut scheduler) = setup(5);
    engine.toggle_auto_play(&mut scheduler);
    scheduler.advance(&mut engine, Duration::from_millis(1_000));
    assert_eq!(engine.state().next_expected_id, 2);

    assert!(!engine.toggle_auto_play(&mut scheduler));
    assert!(!scheduler.is_running(Process::AutoPlay));
    scheduler.advance(&mut engine, Duration::from_millis(2_000));
    assert_eq!(engine.state().next_expected_id, 2);
    assert_eq!(engine.state().status, GameStatus::Playing);
}

#[test]
fn test_manual_click_during_auto_play() {
    let (mut engine, mut scheduler) = setup(4);
    engine.toggle_auto_play(&mut scheduler);
    scheduler.advance(&mut engine, Duration::from_millis(500));
    assert_eq!(engine.state().next_expected_id, 1);

    // The player clicks the point auto-play just took.
    assert_eq!(engine.click(0, &mut scheduler), ClickOutcome::AlreadyClicked);
    assert_eq!(engine.click(1, &mut scheduler), ClickOutcome::Correct);
    scheduler.advance(&mut engine, Duration::from_millis(500));
    assert_eq!(engine.state().clicked_history, vec![0, 1, 2]);
    assert_eq!(engine.state().status, GameStatus::Playing);
}

#[test]
fn test_elapsed_ten_ticks() {
    let (mut engine, mut scheduler) = setup(3);
    for _ in 0..10 {
        assert!(scheduler.fire_once(&mut engine, Process::ElapsedTicker));
    }
    assert!((engine.state().elapsed_seconds - 1.0).abs() < 1e-9);

    engine.start(3, &mut scheduler).expect("restart");
    assert_eq!(engine.state().elapsed_seconds, 0.0);
}

#[test]
fn test_restart_drops_previous_timers() {
    let (mut engine, mut scheduler) = setup(3);
    engine.toggle_auto_play(&mut scheduler);
    let old_tokens = scheduler.active_tokens();
    assert_eq!(old_tokens.len(), 3);

    engine.start(4, &mut scheduler).expect("restart");
    assert_eq!(engine.round(), 2);
    assert!(!engine.state().auto_play_enabled);
    let tokens = scheduler.active_tokens();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.round == 2));

    // A tick that was already in flight for the old round does nothing.
    let before = engine.state().clone();
    engine.fire(TimerToken { process: Process::AutoPlay, round: 1 }, &mut scheduler);
    engine.fire(TimerToken { process: Process::ElapsedTicker, round: 1 }, &mut scheduler);
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_restart_from_game_over() {
    let (mut engine, mut scheduler) = setup(3);
    engine.click(2, &mut scheduler);
    assert_eq!(engine.snapshot().title.text, "GAME OVER");

    engine.start(3, &mut scheduler).expect("restart");
    let state = engine.state();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.next_expected_id, 0);
    assert!(state.clicked_history.is_empty());
    assert_eq!(state.points.len(), 3);
}

#[test]
fn test_next_expected_is_min_unclicked() {
    let (mut engine, mut scheduler) = setup(8);
    engine.toggle_auto_play(&mut scheduler);
    for step in 0..40 {
        if step % 3 == 0 {
            let id = engine.state().next_expected_id;
            engine.click(id, &mut scheduler);
        }
        scheduler.advance(&mut engine, Duration::from_millis(250));
        let state = engine.state();
        if let Some(min) = state.min_unclicked_id() {
            assert_eq!(state.next_expected_id, min);
        }
    }
    assert_eq!(engine.state().status, GameStatus::Cleared);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut engine = Engine::with_seed(5);
    let mut scheduler = ManualScheduler::new();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = engine.subscribe(move |_| *sink.borrow_mut() += 1);

    engine.start(3, &mut scheduler).expect("start");
    assert_eq!(*count.borrow(), 1);
    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    engine.click(0, &mut scheduler);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_idle_decay_does_not_notify() {
    let (mut engine, mut scheduler) = setup(3);
    let snapshots = record_snapshots(&mut engine);
    decay_ticks(&mut scheduler, &mut engine, 10);
    assert!(snapshots.borrow().is_empty());
    scheduler.fire_once(&mut engine, Process::ElapsedTicker);
    assert_eq!(snapshots.borrow().len(), 1);
}
