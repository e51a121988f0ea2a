// License: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::core::{
    action::Action,
    clock::ActivityClock,
    error::Error,
    event::{Event, SessionSwitchReason},
    info::StatusSnapshot,
    state::{State, TrackingStatus},
    utils::format_duration,
};

const MSG_STARTED: &str = "Timer started.";
const MSG_STOPPED: &str = "Timer stopped.";
const MSG_STOPPED_INACTIVE: &str = "Timer stopped due to inactivity.";

/// The timer state machine. Pure with respect to the outside world: it
/// consumes one event at a time and returns the actions the runtime should
/// perform. All timestamps come in with the events, so transitions are
/// fully deterministic and testable.
pub struct TimerMachine {
    cfg: Config,
    clock: Arc<ActivityClock>,
}

impl TimerMachine {
    pub fn new(cfg: Config, clock: Arc<ActivityClock>) -> Self {
        Self { cfg, clock }
    }

    pub fn handle_event(&mut self, state: &mut State, event: Event) -> Result<Vec<Action>, Error> {
        let mut out = Vec::new();

        match event {
            Event::KeyPressed { press, now_ms } => {
                if state.is_tracking() {
                    self.clock.touch(now_ms);
                }

                if self.cfg.hotkey.matches(&press) {
                    tracing::debug!("hotkey matched: {}", self.cfg.hotkey);
                    out.extend(self.toggle(state, now_ms)?);
                }
            }

            Event::UserActivity { now_ms, .. } => {
                // Only refreshed while tracking: every start gets a fresh
                // grace period measured from the session open.
                if state.is_tracking() {
                    self.clock.touch(now_ms);
                }
            }

            Event::ToggleRequested { now_ms } => {
                out.extend(self.toggle(state, now_ms)?);
            }

            Event::StartRequested { now_ms } => {
                if !state.is_tracking() {
                    out.extend(self.start_tracking(state, now_ms));
                }
            }

            Event::StopRequested { now_ms } => {
                if state.is_tracking() {
                    out.extend(self.close_session(state, now_ms, MSG_STOPPED)?);
                }
            }

            Event::InactivityTimeout { now_ms } => {
                if state.is_tracking() {
                    tracing::debug!("inactivity timeout reached");
                    out.extend(self.close_session(state, now_ms, MSG_STOPPED_INACTIVE)?);
                }
            }

            Event::SessionSwitch { reason, now_ms } => match reason {
                SessionSwitchReason::Lock | SessionSwitchReason::Logoff => {
                    if state.is_tracking() {
                        tracing::debug!("session switch ({reason:?}) while tracking");
                        out.extend(self.close_session(state, now_ms, MSG_STOPPED)?);
                    }
                }
                SessionSwitchReason::Unlock | SessionSwitchReason::Other => {}
            },

            Event::Shutdown { now_ms } => {
                if state.is_tracking() {
                    out.extend(self.close_session(state, now_ms, MSG_STOPPED)?);
                }
            }
        }

        Ok(out)
    }

    pub fn snapshot(&self, state: &State, now_ms: u64) -> StatusSnapshot {
        let elapsed_secs = state.session().map(|s| s.elapsed_ms(now_ms) / 1000);

        let state_text = match state.status() {
            TrackingStatus::Idle => "idle",
            TrackingStatus::Tracking => "tracking",
        };

        let headline = match elapsed_secs {
            Some(secs) => format!(
                "stint: tracking for {}",
                format_duration(Duration::from_secs(secs))
            ),
            None => "stint: idle".to_string(),
        };

        let pretty_text = format!(
            "{headline}\nhotkey:  {}\nworklog: {}",
            self.cfg.hotkey,
            self.cfg.worklog.display()
        );

        StatusSnapshot {
            state: state_text.to_string(),
            tracking: state.is_tracking(),
            elapsed_secs,
            pretty_text,
            hotkey: self.cfg.hotkey.to_string(),
            worklog: self.cfg.worklog.display().to_string(),
        }
    }

    fn toggle(&mut self, state: &mut State, now_ms: u64) -> Result<Vec<Action>, Error> {
        if state.is_tracking() {
            self.close_session(state, now_ms, MSG_STOPPED)
        } else {
            Ok(self.start_tracking(state, now_ms))
        }
    }

    fn start_tracking(&mut self, state: &mut State, now_ms: u64) -> Vec<Action> {
        state.open_session(now_ms);
        self.clock.touch(now_ms);

        let mut out = Vec::new();

        if self.cfg.inactivity_timeout_secs > 0 {
            out.push(Action::StartInactivityMonitor);
        }

        out.push(Action::StatusChanged {
            status: TrackingStatus::Tracking,
        });
        out.push(Action::Notify {
            summary: MSG_STARTED.to_string(),
            body: None,
        });

        out
    }

    fn close_session(
        &mut self,
        state: &mut State,
        now_ms: u64,
        summary: &str,
    ) -> Result<Vec<Action>, Error> {
        let session = state.take_session()?;
        tracing::debug!("closing session opened at {}", session.started_at_ms());
        let interval = session.close(now_ms);

        let body = format!(
            "Recorded {}",
            format_duration(Duration::from_secs(interval.duration_secs))
        );

        Ok(vec![
            Action::Record { interval },
            Action::StopInactivityMonitor,
            Action::StatusChanged {
                status: TrackingStatus::Idle,
            },
            Action::Notify {
                summary: summary.to_string(),
                body: Some(body),
            },
        ])
    }
}
