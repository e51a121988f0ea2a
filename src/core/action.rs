// License: MIT

use crate::core::session::WorkInterval;
use crate::core::state::TrackingStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append one completed interval to the worklog. An append failure is
    /// reported, not fatal; the state transition it belongs to stands.
    Record {
        interval: WorkInterval,
    },

    /// Notify the user (runtime decides how: notify-send, dbus notification, etc.)
    Notify {
        summary: String,
        body: Option<String>,
    },

    /// Arm the periodic inactivity check for the session that just opened.
    StartInactivityMonitor,

    /// Cancel the periodic inactivity check; its task must not outlive the
    /// session it monitors.
    StopInactivityMonitor,

    /// The tracking state flipped; presentation decides how to render it.
    StatusChanged {
        status: TrackingStatus,
    },
}
