// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::daemon_msg::DaemonMsg;

/// Handle `stint status [--json]`.
pub async fn handle_status(tx: &mpsc::Sender<DaemonMsg>, as_json: bool) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx
        .send(DaemonMsg::GetStatus { reply: reply_tx })
        .await
        .is_err()
    {
        return not_running(as_json);
    }

    let snap = match reply_rx.await {
        Ok(snap) => snap,
        Err(_) => return not_running(as_json),
    };

    if as_json {
        serde_json::to_string(&snap).unwrap_or_else(|e| format!("ERROR: {e}"))
    } else {
        snap.pretty_text
    }
}

/// Shared with the CLI fallback for when the daemon is not up at all.
pub fn not_running(as_json: bool) -> String {
    if as_json {
        serde_json::json!({
            "state": "not_running",
            "tracking": false,
        })
        .to_string()
    } else {
        "stint daemon not running".to_string()
    }
}
