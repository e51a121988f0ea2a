// License: MIT

use tokio::sync::mpsc;

use crate::core::daemon_msg::DaemonMsg;
use crate::core::event::{ActivityKind, Event};
use crate::core::hotkey::parse_key_press;
use crate::core::utils::now_ms;

/// Handle `stint key <combo>`: feed one abstract key press into the daemon.
/// This is how compositor keybindings reach the hotkey matcher.
pub async fn handle_key(tx: &mpsc::Sender<DaemonMsg>, spec: &str) -> String {
    let press = match parse_key_press(spec) {
        Ok(p) => p,
        Err(e) => return format!("ERROR: {e}"),
    };

    let ev = Event::KeyPressed {
        press,
        now_ms: now_ms(),
    };
    if tx.send(DaemonMsg::Event(ev)).await.is_err() {
        return "ERROR: daemon event channel closed".to_string();
    }

    "ok".to_string()
}

/// Handle `stint activity`: report user activity that is not a key press.
pub async fn handle_activity(tx: &mpsc::Sender<DaemonMsg>) -> String {
    let ev = Event::UserActivity {
        kind: ActivityKind::Any,
        now_ms: now_ms(),
    };
    if tx.send(DaemonMsg::Event(ev)).await.is_err() {
        return "ERROR: daemon event channel closed".to_string();
    }

    "ok".to_string()
}
