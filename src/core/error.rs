// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration semantics failed.
    ///
    /// Examples:
    /// - hotkey string has no trigger key
    /// - hotkey token cannot be resolved to a key or modifier
    InvalidConfig(ConfigError),

    /// An event was rejected because it is invalid in the current state.
    ///
    /// Examples:
    /// - closing a tracking session that was never opened
    InvalidState(StateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The hotkey string was empty or whitespace.
    EmptyHotkey,

    /// A hotkey token is neither a known modifier nor a known key.
    UnknownKeyToken(String),

    /// The hotkey string contains only modifiers.
    MissingTriggerKey,

    /// The hotkey string contains a second non-modifier key.
    DuplicateTriggerKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A session close was attempted with no open session. This is an
    /// internal invariant violation, not a user-reachable condition.
    NoOpenSession,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "{e}"),
            Error::InvalidState(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyHotkey =>
                write!(f, "hotkey is empty"),
            ConfigError::UnknownKeyToken(tok) =>
                write!(f, "unknown hotkey token '{tok}'"),
            ConfigError::MissingTriggerKey =>
                write!(f, "hotkey has no trigger key (only modifiers)"),
            ConfigError::DuplicateTriggerKey(tok) =>
                write!(f, "hotkey has more than one trigger key ('{tok}')"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NoOpenSession =>
                write!(f, "no open tracking session"),
        }
    }
}

impl std::error::Error for Error {}
