// License: MIT

use tokio::sync::mpsc;

use crate::core::daemon_msg::DaemonMsg;

use super::handlers::{inject, quit, status, timer};

/// Routes one socket command to its handler and returns the reply text.
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<DaemonMsg>) -> String {
    match cmd {
        "toggle" => timer::handle_toggle(tx).await,
        "start" => timer::handle_start(tx).await,
        "stop" => timer::handle_stop(tx).await,

        cmd if cmd.starts_with("status") => {
            let as_json = cmd.contains("--json");
            status::handle_status(tx, as_json).await
        }

        "quit" => quit::handle_quit(tx).await,

        "activity" => inject::handle_activity(tx).await,

        cmd if cmd.starts_with("key ") => {
            let spec = cmd.strip_prefix("key ").unwrap_or("").trim();
            inject::handle_key(tx, spec).await
        }

        _ => {
            tracing::warn!("unknown ipc command: {cmd}");
            format!("ERROR: unknown command '{cmd}'")
        }
    }
}
