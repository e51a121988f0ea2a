// License: MIT

use std::process::Stdio;

use tokio::sync::mpsc;

use crate::core::{action::Action, daemon_msg::DaemonMsg, utils::escape_single_quotes};

use super::{AnyError, Daemon};

impl Daemon {
    pub(super) async fn exec_action(
        &mut self,
        action: Action,
        tx: mpsc::Sender<DaemonMsg>,
    ) -> Result<(), AnyError> {
        match action {
            Action::Record { interval } => {
                if let Err(e) = self.recorder.record(&interval) {
                    // The interval is lost but the daemon keeps running.
                    return Err(format!(
                        "worklog append to {} failed: {e}",
                        self.recorder.path().display()
                    )
                    .into());
                }
                tracing::info!("recorded {}", interval.log_line());
            }

            Action::Notify { summary, body } => {
                tracing::info!("notify: {summary}");

                if self.cfg.notifications {
                    let cmd = match body {
                        Some(body) => format!(
                            "notify-send -a stint '{}' '{}'",
                            escape_single_quotes(&summary),
                            escape_single_quotes(&body)
                        ),
                        None => {
                            format!("notify-send -a stint '{}'", escape_single_quotes(&summary))
                        }
                    };

                    let _ = std::process::Command::new("sh")
                        .arg("-lc")
                        .arg(cmd)
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .spawn();
                }
            }

            Action::StartInactivityMonitor => {
                self.spawn_monitor(tx);
            }

            Action::StopInactivityMonitor => {
                self.cancel_monitor();
            }

            Action::StatusChanged { status } => {
                tracing::info!("status: {status:?}");
            }
        }

        Ok(())
    }

    fn spawn_monitor(&mut self, tx: mpsc::Sender<DaemonMsg>) {
        // A stale task from a previous session must not fire into this one.
        self.cancel_monitor();

        if self.cfg.inactivity_timeout_secs == 0 {
            return;
        }

        let clock = self.clock.clone();
        let threshold = self.cfg.inactivity_timeout_secs;
        self.monitor_task = Some(tokio::spawn(crate::services::monitor::run_monitor(
            clock, threshold, tx,
        )));
    }

    pub(super) fn cancel_monitor(&mut self) {
        if let Some(task) = self.monitor_task.take() {
            task.abort();
        }
    }
}
