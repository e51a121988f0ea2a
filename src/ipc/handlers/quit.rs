// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::daemon_msg::DaemonMsg;

/// Handle `stint quit` (no args).
///
/// Semantics:
/// - Ask the daemon to exit cleanly, recording any open session.
/// - Reply once the daemon has acknowledged the request.
pub async fn handle_quit(tx: &mpsc::Sender<DaemonMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx
        .send(DaemonMsg::StopDaemon { reply: reply_tx })
        .await
        .is_err()
    {
        return "stint daemon not running".to_string();
    }

    match reply_rx.await {
        Ok(Ok(msg)) => {
            let out = msg.trim_end();
            if out.is_empty() {
                "Stopping stint daemon".to_string()
            } else {
                out.to_string()
            }
        }
        Ok(Err(e)) => {
            let out = e.trim_end();
            if out.is_empty() {
                "ERROR: quit failed".to_string()
            } else {
                format!("ERROR: {out}")
            }
        }
        Err(_) => "ERROR: No response from daemon".to_string(),
    }
}
