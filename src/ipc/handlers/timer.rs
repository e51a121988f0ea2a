// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::daemon_msg::DaemonMsg;
use crate::core::event::Event;
use crate::core::utils::now_ms;

/// Handle `stint toggle`.
///
/// The reply is phrased from the state before the toggle: the daemon applies
/// events in order, so the flip is committed by the time any later command
/// observes it.
pub async fn handle_toggle(tx: &mpsc::Sender<DaemonMsg>) -> String {
    let was_tracking = match fetch_tracking(tx).await {
        Ok(t) => t,
        Err(e) => return e,
    };

    let ev = Event::ToggleRequested { now_ms: now_ms() };
    if tx.send(DaemonMsg::Event(ev)).await.is_err() {
        return "ERROR: daemon event channel closed".to_string();
    }

    if was_tracking {
        "Timer stopped.".to_string()
    } else {
        "Timer started.".to_string()
    }
}

/// Handle `stint start`: start tracking, no-op if already running.
pub async fn handle_start(tx: &mpsc::Sender<DaemonMsg>) -> String {
    let was_tracking = match fetch_tracking(tx).await {
        Ok(t) => t,
        Err(e) => return e,
    };

    if was_tracking {
        return "Timer already running".to_string();
    }

    let ev = Event::StartRequested { now_ms: now_ms() };
    if tx.send(DaemonMsg::Event(ev)).await.is_err() {
        return "ERROR: daemon event channel closed".to_string();
    }

    "Timer started.".to_string()
}

/// Handle `stint stop`: stop tracking, no-op if idle.
pub async fn handle_stop(tx: &mpsc::Sender<DaemonMsg>) -> String {
    let was_tracking = match fetch_tracking(tx).await {
        Ok(t) => t,
        Err(e) => return e,
    };

    if !was_tracking {
        return "Timer not running".to_string();
    }

    let ev = Event::StopRequested { now_ms: now_ms() };
    if tx.send(DaemonMsg::Event(ev)).await.is_err() {
        return "ERROR: daemon event channel closed".to_string();
    }

    "Timer stopped.".to_string()
}

async fn fetch_tracking(tx: &mpsc::Sender<DaemonMsg>) -> Result<bool, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx
        .send(DaemonMsg::GetStatus { reply: reply_tx })
        .await
        .is_err()
    {
        return Err("ERROR: daemon event channel closed".to_string());
    }

    match reply_rx.await {
        Ok(snap) => Ok(snap.tracking),
        Err(_) => Err("ERROR: daemon status channel closed".to_string()),
    }
}
