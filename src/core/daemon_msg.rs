// License: MIT

use tokio::sync::oneshot;

use crate::core::{event::Event, info::StatusSnapshot};

#[derive(Debug)]
pub enum DaemonMsg {
    Event(Event),

    GetStatus { reply: oneshot::Sender<StatusSnapshot> },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
