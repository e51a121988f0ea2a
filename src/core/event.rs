// License: MIT

use crate::core::hotkey::KeyPress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Any,
}

/// Why the desktop session switched away from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSwitchReason {
    Lock,
    Unlock,
    Logoff,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press with its active modifier set. Counts as user activity
    /// and may match the configured toggle hotkey.
    KeyPressed {
        press: KeyPress,
        now_ms: u64,
    },

    /// Payload-free "the user did something" (pointer move, click, ...).
    UserActivity {
        kind: ActivityKind,
        now_ms: u64,
    },

    /// Toggle between Idle and Tracking (control command).
    ToggleRequested {
        now_ms: u64,
    },

    /// Explicit start; a no-op while already tracking.
    StartRequested {
        now_ms: u64,
    },

    /// Explicit stop; a no-op while idle.
    StopRequested {
        now_ms: u64,
    },

    /// Raised by the inactivity monitor once the configured threshold of
    /// no qualifying input is reached while tracking.
    InactivityTimeout {
        now_ms: u64,
    },

    SessionSwitch {
        reason: SessionSwitchReason,
        now_ms: u64,
    },

    /// The daemon is going down; close and record any open session.
    Shutdown {
        now_ms: u64,
    },
}
