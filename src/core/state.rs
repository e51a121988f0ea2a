// License: MIT

use crate::core::error::{Error, StateError};
use crate::core::session::TrackingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    Idle,
    Tracking,
}

/// Mutable state owned by the timer's event loop. The open session is
/// exclusively owned here; no other component reads or mutates it directly.
#[derive(Debug, Clone)]
pub struct State {
    status: TrackingStatus,
    session: Option<TrackingSession>,
}

impl State {
    pub fn new() -> Self {
        Self {
            status: TrackingStatus::Idle,
            session: None,
        }
    }

    // ---------------- getters ----------------

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.status, TrackingStatus::Tracking)
    }

    pub fn session(&self) -> Option<&TrackingSession> {
        self.session.as_ref()
    }

    // ---------------- transitions ----------------

    pub fn open_session(&mut self, now_ms: u64) {
        debug_assert!(self.session.is_none(), "session opened twice");
        self.session = Some(TrackingSession::open(now_ms));
        self.status = TrackingStatus::Tracking;
    }

    /// Take the open session for closing. A missing session here is an
    /// invariant violation: loud under debug assertions, a reportable
    /// error otherwise.
    pub fn take_session(&mut self) -> Result<TrackingSession, Error> {
        debug_assert!(self.session.is_some(), "session closed twice");
        match self.session.take() {
            Some(session) => {
                self.status = TrackingStatus::Idle;
                Ok(session)
            }
            None => Err(Error::InvalidState(StateError::NoOpenSession)),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}
