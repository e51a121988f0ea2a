// License: MIT

use serde::Serialize;

/// Snapshot returned from the daemon for `stint status`.
///
/// - The serialized form is the stable JSON contract for `status --json`.
/// - `pretty_text` is CLI-facing output for plain `stint status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub state: String,
    pub tracking: bool,
    pub elapsed_secs: Option<u64>,

    #[serde(skip_serializing)]
    pub pretty_text: String,

    pub hotkey: String,
    pub worklog: String,
}
