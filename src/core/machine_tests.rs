// License: MIT

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, TimeZone};

use crate::config::Config;
use crate::core::action::Action;
use crate::core::clock::ActivityClock;
use crate::core::event::{ActivityKind, Event, SessionSwitchReason};
use crate::core::hotkey::{parse_key_press, HotkeyBinding};
use crate::core::machine::TimerMachine;
use crate::core::session::{local_date_of_ms, WorkInterval};
use crate::core::state::{State, TrackingStatus};

fn test_cfg(threshold_secs: u64) -> Config {
    Config {
        hotkey: HotkeyBinding::parse("ctrl+shift+f9").unwrap(),
        inactivity_timeout_secs: threshold_secs,
        worklog: PathBuf::from("/tmp/work.csv"),
        notifications: true,
    }
}

fn machine_with_threshold(threshold_secs: u64) -> (TimerMachine, State, Arc<ActivityClock>) {
    let clock = Arc::new(ActivityClock::new(0));
    let machine = TimerMachine::new(test_cfg(threshold_secs), clock.clone());
    (machine, State::new(), clock)
}

fn started_actions() -> Vec<Action> {
    vec![
        Action::StartInactivityMonitor,
        Action::StatusChanged {
            status: TrackingStatus::Tracking,
        },
        Action::Notify {
            summary: "Timer started.".to_string(),
            body: None,
        },
    ]
}

fn stopped_actions(stop_ms: u64, duration_secs: u64, summary: &str, body: &str) -> Vec<Action> {
    vec![
        Action::Record {
            interval: WorkInterval {
                date: local_date_of_ms(stop_ms),
                duration_secs,
            },
        },
        Action::StopInactivityMonitor,
        Action::StatusChanged {
            status: TrackingStatus::Idle,
        },
        Action::Notify {
            summary: summary.to_string(),
            body: Some(body.to_string()),
        },
    ]
}

#[test]
fn toggle_starts_then_stops_with_one_truncated_interval() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let actions = machine
        .handle_event(&mut state, Event::ToggleRequested { now_ms: 1000 })
        .unwrap();
    assert_eq!(actions, started_actions());
    assert!(state.is_tracking());

    // 5999 ms elapsed truncates to 5 whole seconds
    let actions = machine
        .handle_event(&mut state, Event::ToggleRequested { now_ms: 6999 })
        .unwrap();
    assert_eq!(
        actions,
        stopped_actions(6999, 5, "Timer stopped.", "Recorded 5s")
    );
    assert!(!state.is_tracking());
}

#[test]
fn stop_while_idle_is_a_noop() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let actions = machine
        .handle_event(&mut state, Event::StopRequested { now_ms: 1000 })
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(state.status(), TrackingStatus::Idle);
}

#[test]
fn start_while_tracking_is_a_noop() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 1000 })
        .unwrap();

    let actions = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 5000 })
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(state.session().map(|s| s.started_at_ms()), Some(1000));
}

#[test]
fn matching_key_press_toggles() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);
    let press = parse_key_press("ctrl+shift+f9").unwrap();

    let actions = machine
        .handle_event(&mut state, Event::KeyPressed { press, now_ms: 500 })
        .unwrap();
    assert_eq!(actions, started_actions());

    let actions = machine
        .handle_event(
            &mut state,
            Event::KeyPressed {
                press,
                now_ms: 10_500,
            },
        )
        .unwrap();
    assert_eq!(
        actions,
        stopped_actions(10_500, 10, "Timer stopped.", "Recorded 10s")
    );
}

#[test]
fn key_press_with_extra_modifiers_still_toggles() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);
    let press = parse_key_press("ctrl+shift+alt+f9").unwrap();

    let actions = machine
        .handle_event(&mut state, Event::KeyPressed { press, now_ms: 500 })
        .unwrap();

    assert_eq!(actions, started_actions());
}

#[test]
fn non_matching_key_press_is_ignored_while_idle() {
    let (mut machine, mut state, clock) = machine_with_threshold(300);
    let press = parse_key_press("a").unwrap();

    let actions = machine
        .handle_event(&mut state, Event::KeyPressed { press, now_ms: 700 })
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(state.status(), TrackingStatus::Idle);
    // not tracking, so the press does not feed the activity clock either
    assert_eq!(clock.last_activity_ms(), 0);
}

#[test]
fn inactivity_timeout_stops_exactly_once() {
    let (mut machine, mut state, _clock) = machine_with_threshold(60);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 0 })
        .unwrap();

    let actions = machine
        .handle_event(&mut state, Event::InactivityTimeout { now_ms: 60_000 })
        .unwrap();
    assert_eq!(
        actions,
        stopped_actions(
            60_000,
            60,
            "Timer stopped due to inactivity.",
            "Recorded 1m 0s"
        )
    );

    // a stale timeout after the stop does nothing
    let actions = machine
        .handle_event(&mut state, Event::InactivityTimeout { now_ms: 61_000 })
        .unwrap();
    assert!(actions.is_empty());
    assert_eq!(state.status(), TrackingStatus::Idle);
}

#[test]
fn inactivity_timeout_while_idle_is_a_noop() {
    let (mut machine, mut state, _clock) = machine_with_threshold(60);

    let actions = machine
        .handle_event(&mut state, Event::InactivityTimeout { now_ms: 5000 })
        .unwrap();

    assert!(actions.is_empty());
}

#[test]
fn session_lock_while_idle_is_a_noop() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let actions = machine
        .handle_event(
            &mut state,
            Event::SessionSwitch {
                reason: SessionSwitchReason::Lock,
                now_ms: 1000,
            },
        )
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(state.status(), TrackingStatus::Idle);
}

#[test]
fn session_logoff_while_tracking_records_elapsed_time() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 0 })
        .unwrap();

    let actions = machine
        .handle_event(
            &mut state,
            Event::SessionSwitch {
                reason: SessionSwitchReason::Logoff,
                now_ms: 30_000,
            },
        )
        .unwrap();

    assert_eq!(
        actions,
        stopped_actions(30_000, 30, "Timer stopped.", "Recorded 30s")
    );
}

#[test]
fn unlock_and_other_session_switches_are_ignored() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    for reason in [SessionSwitchReason::Unlock, SessionSwitchReason::Other] {
        let actions = machine
            .handle_event(
                &mut state,
                Event::SessionSwitch {
                    reason,
                    now_ms: 1000,
                },
            )
            .unwrap();
        assert!(actions.is_empty());
    }

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 2000 })
        .unwrap();

    for reason in [SessionSwitchReason::Unlock, SessionSwitchReason::Other] {
        let actions = machine
            .handle_event(
                &mut state,
                Event::SessionSwitch {
                    reason,
                    now_ms: 3000,
                },
            )
            .unwrap();
        assert!(actions.is_empty());
        assert!(state.is_tracking());
    }
}

#[test]
fn morning_session_logs_expected_line() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let start = Local
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .unwrap()
        .timestamp_millis() as u64;
    let stop = start + 5000;

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: start })
        .unwrap();
    let actions = machine
        .handle_event(&mut state, Event::StopRequested { now_ms: stop })
        .unwrap();

    let Action::Record { interval } = &actions[0] else {
        panic!("expected a record action, got {actions:?}");
    };
    assert_eq!(interval.log_line(), "2024-01-01;5");
}

#[test]
fn zero_threshold_never_arms_the_monitor() {
    let (mut machine, mut state, _clock) = machine_with_threshold(0);

    let actions = machine
        .handle_event(&mut state, Event::ToggleRequested { now_ms: 1000 })
        .unwrap();

    assert_eq!(
        actions,
        vec![
            Action::StatusChanged {
                status: TrackingStatus::Tracking,
            },
            Action::Notify {
                summary: "Timer started.".to_string(),
                body: None,
            },
        ]
    );
}

#[test]
fn activity_only_refreshes_the_clock_while_tracking() {
    let (mut machine, mut state, clock) = machine_with_threshold(300);

    let _ = machine
        .handle_event(
            &mut state,
            Event::UserActivity {
                kind: ActivityKind::Any,
                now_ms: 500,
            },
        )
        .unwrap();
    assert_eq!(clock.last_activity_ms(), 0);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 1000 })
        .unwrap();
    assert_eq!(clock.last_activity_ms(), 1000);

    let _ = machine
        .handle_event(
            &mut state,
            Event::UserActivity {
                kind: ActivityKind::Any,
                now_ms: 2000,
            },
        )
        .unwrap();
    assert_eq!(clock.last_activity_ms(), 2000);
}

#[test]
fn any_key_press_counts_as_activity_while_tracking() {
    let (mut machine, mut state, clock) = machine_with_threshold(300);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 0 })
        .unwrap();

    let press = parse_key_press("a").unwrap();
    let actions = machine
        .handle_event(
            &mut state,
            Event::KeyPressed {
                press,
                now_ms: 3000,
            },
        )
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(clock.last_activity_ms(), 3000);
    assert!(state.is_tracking());
}

#[test]
fn shutdown_closes_and_records_the_open_session() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 0 })
        .unwrap();

    let actions = machine
        .handle_event(&mut state, Event::Shutdown { now_ms: 10_000 })
        .unwrap();

    assert_eq!(
        actions,
        stopped_actions(10_000, 10, "Timer stopped.", "Recorded 10s")
    );
    assert_eq!(state.status(), TrackingStatus::Idle);
}

#[test]
fn shutdown_while_idle_does_nothing() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let actions = machine
        .handle_event(&mut state, Event::Shutdown { now_ms: 1000 })
        .unwrap();

    assert!(actions.is_empty());
}

#[test]
fn snapshot_reports_elapsed_while_tracking() {
    let (mut machine, mut state, _clock) = machine_with_threshold(300);

    let snap = machine.snapshot(&state, 1000);
    assert_eq!(snap.state, "idle");
    assert!(!snap.tracking);
    assert_eq!(snap.elapsed_secs, None);

    let _ = machine
        .handle_event(&mut state, Event::StartRequested { now_ms: 1000 })
        .unwrap();

    let snap = machine.snapshot(&state, 201_000);
    assert_eq!(snap.state, "tracking");
    assert!(snap.tracking);
    assert_eq!(snap.elapsed_secs, Some(200));
    assert!(snap.pretty_text.contains("tracking for 3m 20s"));
    assert_eq!(snap.hotkey, "ctrl+shift+f9");
}
