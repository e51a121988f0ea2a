// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::core::error::Error;
use crate::core::hotkey::HotkeyBinding;

/// Written to the user config path on first start.
pub const DEFAULT_CONFIG: &str = r#"{
  "hotkey": "ctrl+shift+f9",
  "inactivity_timeout_secs": 300,
  "notifications": true
}
"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    hotkey: String,
    #[serde(default)]
    inactivity_timeout_secs: u64,
    #[serde(default)]
    worklog: Option<PathBuf>,
    #[serde(default = "default_notifications")]
    notifications: bool,
}

fn default_notifications() -> bool {
    true
}

/// Validated daemon configuration. A zero `inactivity_timeout_secs`
/// disables the auto-stop entirely.
#[derive(Debug, Clone)]
pub struct Config {
    pub hotkey: HotkeyBinding,
    pub inactivity_timeout_secs: u64,
    pub worklog: PathBuf,
    pub notifications: bool,
}

pub fn parse_str(raw: &str) -> Result<Config> {
    let raw: RawConfig = serde_json::from_str(raw).wrap_err("config is not valid JSON")?;

    let hotkey = HotkeyBinding::parse(&raw.hotkey).map_err(Error::InvalidConfig)?;
    let worklog = raw.worklog.unwrap_or_else(default_worklog_path);

    Ok(Config {
        hotkey,
        inactivity_timeout_secs: raw.inactivity_timeout_secs,
        worklog,
        notifications: raw.notifications,
    })
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read config at {}", path.display()))?;
    parse_str(&raw).wrap_err_with(|| format!("invalid config at {}", path.display()))
}

/// Determine the config path.
pub fn resolve_config_path() -> PathBuf {
    // 1. User config first
    let user = user_config_path();
    if user.exists() {
        return user;
    }

    // 2. System-wide fallback
    let system = PathBuf::from("/etc/stint/config.json");
    if system.exists() {
        return system;
    }

    // 3. Neither exists yet: the user path, to be bootstrapped there
    user
}

fn user_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stint/config.json");
    path
}

pub fn default_worklog_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stint/work.csv");
    path
}

/// Write the default config if the user has none yet. Returns whether a
/// fresh file was written.
pub fn ensure_user_config_exists() -> io::Result<bool> {
    let path = user_config_path();
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, DEFAULT_CONFIG)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let cfg = parse_str(
            r#"{
                "hotkey": "ctrl+alt+t",
                "inactivity_timeout_secs": 120,
                "worklog": "/tmp/hours.csv",
                "notifications": false
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.hotkey.to_string(), "ctrl+alt+t");
        assert_eq!(cfg.inactivity_timeout_secs, 120);
        assert_eq!(cfg.worklog, PathBuf::from("/tmp/hours.csv"));
        assert!(!cfg.notifications);
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let cfg = parse_str(r#"{ "hotkey": "f9" }"#).unwrap();

        assert_eq!(cfg.inactivity_timeout_secs, 0);
        assert_eq!(cfg.worklog, default_worklog_path());
        assert!(cfg.notifications);
    }

    #[test]
    fn shipped_default_config_parses() {
        let cfg = parse_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(cfg.hotkey.to_string(), "ctrl+shift+f9");
        assert_eq!(cfg.inactivity_timeout_secs, 300);
        assert!(cfg.notifications);
    }

    #[test]
    fn bad_hotkey_reports_the_offending_token() {
        let err = parse_str(r#"{ "hotkey": "ctrl+bogus" }"#).unwrap_err();

        assert!(format!("{err:#}").contains("unknown hotkey token 'bogus'"));
    }

    #[test]
    fn missing_hotkey_is_an_error() {
        assert!(parse_str(r#"{ "inactivity_timeout_secs": 60 }"#).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_str(r#"{ "hotkey": "f9", "hotkeys": "f10" }"#).is_err());
    }

    #[test]
    fn loads_a_config_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "hotkey": "lctrl+space", "inactivity_timeout_secs": 45 }"#).unwrap();

        let cfg = load_from_path(&path).unwrap();

        assert_eq!(cfg.hotkey.to_string(), "lctrl+space");
        assert_eq!(cfg.inactivity_timeout_secs, 45);
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let err = load_from_path(Path::new("/nonexistent/stint.json")).unwrap_err();

        assert!(format!("{err:#}").contains("/nonexistent/stint.json"));
    }
}
