// License: MIT

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::session::WorkInterval;

/// Append-only writer for the worklog. One line per completed interval,
/// `YYYY-MM-DD;<seconds>`, newline terminated. The file and any missing
/// parent directories are created on first write; existing contents are
/// never touched.
pub struct IntervalRecorder {
    path: PathBuf,
}

impl IntervalRecorder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, interval: &WorkInterval) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(interval.log_line().as_bytes())?;
        f.write_all(b"\n")?;
        f.flush()?;
        Ok(())
    }
}
