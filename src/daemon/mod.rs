// License: MIT

mod actions;
mod run;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::core::{
    action::Action, clock::ActivityClock, daemon_msg::DaemonMsg, event::Event,
    machine::TimerMachine, state::State,
};
use crate::services::session::EventSink;
use crate::worklog::IntervalRecorder;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

struct MpscEventSink {
    tx: mpsc::Sender<DaemonMsg>,
}

impl EventSink for MpscEventSink {
    fn push(&self, ev: Event) {
        let _ = self.tx.try_send(DaemonMsg::Event(ev));
    }
}

pub struct Daemon {
    machine: TimerMachine,
    state: State,

    cfg: Config,
    recorder: IntervalRecorder,
    clock: Arc<ActivityClock>,

    // Running only while a session is open and a timeout is configured.
    monitor_task: Option<JoinHandle<()>>,
}

impl Daemon {
    pub fn new(cfg: Config) -> Self {
        let clock = Arc::new(ActivityClock::new(crate::core::utils::now_ms()));
        let machine = TimerMachine::new(cfg.clone(), clock.clone());
        let recorder = IntervalRecorder::new(cfg.worklog.clone());

        tracing::debug!(
            "daemon: hotkey={}, inactivity_timeout={}s, notifications={}, worklog={}",
            cfg.hotkey,
            cfg.inactivity_timeout_secs,
            cfg.notifications,
            cfg.worklog.display(),
        );

        Self {
            machine,
            state: State::new(),
            cfg,
            recorder,
            clock,
            monitor_task: None,
        }
    }

    fn handle_one_event(&mut self, event: Event) -> Vec<Action> {
        match event {
            // High-frequency producers; keep them out of debug logs.
            Event::KeyPressed { .. } | Event::UserActivity { .. } => {
                tracing::trace!("event: {event:?}");
            }
            _ => tracing::debug!("event: {event:?}"),
        }

        match self.machine.handle_event(&mut self.state, event) {
            Ok(actions) => actions,
            Err(e) => {
                tracing::error!("event rejected: {e}");
                Vec::new()
            }
        }
    }
}
