// License: MIT

use std::fmt;

use bitflags::bitflags;

use crate::core::error::ConfigError;

bitflags! {
    /// Modifier flags active at key-press time. Left and right variants are
    /// tracked separately; the two-bit masks cover either side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const LCTRL  = 1 << 0;
        const RCTRL  = 1 << 1;
        const LSHIFT = 1 << 2;
        const RSHIFT = 1 << 3;
        const LALT   = 1 << 4;
        const RALT   = 1 << 5;
        const LMETA  = 1 << 6;
        const RMETA  = 1 << 7;

        const CTRL  = Self::LCTRL.bits() | Self::RCTRL.bits();
        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const ALT   = Self::LALT.bits() | Self::RALT.bits();
        const META  = Self::LMETA.bits() | Self::RMETA.bits();
    }
}

/// A non-modifier trigger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Letters and digits, stored lowercase.
    Char(char),
    /// Function keys F1..=F24.
    F(u8),
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    PrintScreen,
    ScrollLock,
    Pause,
}

/// An incoming key-press event: the key plus the modifiers held at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub mods: Modifiers,
}

/// A configured toggle hotkey: required modifiers plus exactly one trigger key.
///
/// Each required modifier is kept as a mask of acceptable flags, so a
/// side-agnostic `ctrl` accepts either `LCTRL` or `RCTRL` while a
/// side-specific `lctrl` accepts only that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    mods: Vec<Modifiers>,
    key: Key,
}

impl HotkeyBinding {
    /// Parse a '+'-separated, case-insensitive hotkey string such as
    /// `"Ctrl+Shift+F9"`. Exactly one token must be a non-modifier key;
    /// it is the trigger. Unknown tokens fail the parse.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let (mods, key) = parse_tokens(spec)?;
        Ok(Self { mods, key })
    }

    /// Subset match: the press must carry the trigger key and every required
    /// modifier, while extra held modifiers are tolerated.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key == self.key && self.mods.iter().all(|req| press.mods.intersects(*req))
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.mods {
            write!(f, "{}+", modifier_name(*m))?;
        }
        write!(f, "{}", self.key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "f{n}"),
            Key::Space => write!(f, "space"),
            Key::Enter => write!(f, "enter"),
            Key::Tab => write!(f, "tab"),
            Key::Escape => write!(f, "escape"),
            Key::Backspace => write!(f, "backspace"),
            Key::Delete => write!(f, "delete"),
            Key::Insert => write!(f, "insert"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pageup"),
            Key::PageDown => write!(f, "pagedown"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::PrintScreen => write!(f, "printscreen"),
            Key::ScrollLock => write!(f, "scrolllock"),
            Key::Pause => write!(f, "pause"),
        }
    }
}

/// Parse a key-press description in the same token vocabulary as the hotkey
/// config (`"ctrl+shift+f9"`). Used by the control socket to inject abstract
/// key events. A side-agnostic modifier token marks both sides as active.
pub fn parse_key_press(spec: &str) -> Result<KeyPress, ConfigError> {
    let (mod_list, key) = parse_tokens(spec)?;

    let mut mods = Modifiers::empty();
    for m in mod_list {
        mods |= m;
    }

    Ok(KeyPress { key, mods })
}

fn parse_tokens(spec: &str) -> Result<(Vec<Modifiers>, Key), ConfigError> {
    if spec.trim().is_empty() {
        return Err(ConfigError::EmptyHotkey);
    }

    let mut mods = Vec::new();
    let mut key: Option<Key> = None;

    for raw in spec.split('+') {
        let tok = raw.trim().to_ascii_lowercase();

        if let Some(m) = parse_modifier(&tok) {
            mods.push(m);
            continue;
        }

        if let Some(k) = parse_key(&tok) {
            if key.is_some() {
                return Err(ConfigError::DuplicateTriggerKey(tok));
            }
            key = Some(k);
            continue;
        }

        return Err(ConfigError::UnknownKeyToken(tok));
    }

    match key {
        Some(key) => Ok((mods, key)),
        None => Err(ConfigError::MissingTriggerKey),
    }
}

fn parse_modifier(tok: &str) -> Option<Modifiers> {
    let m = match tok {
        "ctrl" | "control" => Modifiers::CTRL,
        "lctrl" => Modifiers::LCTRL,
        "rctrl" => Modifiers::RCTRL,
        "shift" => Modifiers::SHIFT,
        "lshift" => Modifiers::LSHIFT,
        "rshift" => Modifiers::RSHIFT,
        "alt" => Modifiers::ALT,
        "lalt" => Modifiers::LALT,
        "ralt" | "altgr" => Modifiers::RALT,
        "meta" | "super" | "win" => Modifiers::META,
        "lmeta" | "lsuper" => Modifiers::LMETA,
        "rmeta" | "rsuper" => Modifiers::RMETA,
        _ => return None,
    };
    Some(m)
}

fn parse_key(tok: &str) -> Option<Key> {
    let mut chars = tok.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(Key::Char(c));
        }
        return None;
    }

    if let Some(num) = tok.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=24).contains(&n) {
                return Some(Key::F(n));
            }
        }
        return None;
    }

    let k = match tok {
        "space" => Key::Space,
        "enter" | "return" => Key::Enter,
        "tab" => Key::Tab,
        "esc" | "escape" => Key::Escape,
        "backspace" => Key::Backspace,
        "del" | "delete" => Key::Delete,
        "ins" | "insert" => Key::Insert,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "printscreen" | "prtsc" => Key::PrintScreen,
        "scrolllock" => Key::ScrollLock,
        "pause" => Key::Pause,
        _ => return None,
    };
    Some(k)
}

fn modifier_name(m: Modifiers) -> &'static str {
    match m {
        m if m == Modifiers::CTRL => "ctrl",
        m if m == Modifiers::LCTRL => "lctrl",
        m if m == Modifiers::RCTRL => "rctrl",
        m if m == Modifiers::SHIFT => "shift",
        m if m == Modifiers::LSHIFT => "lshift",
        m if m == Modifiers::RSHIFT => "rshift",
        m if m == Modifiers::ALT => "alt",
        m if m == Modifiers::LALT => "lalt",
        m if m == Modifiers::RALT => "ralt",
        m if m == Modifiers::META => "meta",
        m if m == Modifiers::LMETA => "lmeta",
        m if m == Modifiers::RMETA => "rmeta",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, mods: Modifiers) -> KeyPress {
        KeyPress { key, mods }
    }

    #[test]
    fn parses_case_insensitively() {
        let a = HotkeyBinding::parse("Ctrl+Shift+F9").unwrap();
        let b = HotkeyBinding::parse("ctrl+shift+f9").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn matches_its_own_modifiers_and_key() {
        let binding = HotkeyBinding::parse("ctrl+shift+f9").unwrap();
        let p = parse_key_press("ctrl+shift+f9").unwrap();
        assert!(binding.matches(&p));
    }

    #[test]
    fn side_agnostic_modifier_accepts_either_side() {
        let binding = HotkeyBinding::parse("ctrl+f9").unwrap();

        assert!(binding.matches(&press(Key::F(9), Modifiers::LCTRL)));
        assert!(binding.matches(&press(Key::F(9), Modifiers::RCTRL)));
    }

    #[test]
    fn side_specific_modifier_requires_that_side() {
        let binding = HotkeyBinding::parse("lctrl+x").unwrap();

        assert!(binding.matches(&press(Key::Char('x'), Modifiers::LCTRL)));
        assert!(!binding.matches(&press(Key::Char('x'), Modifiers::RCTRL)));
    }

    #[test]
    fn extra_held_modifiers_are_tolerated() {
        let binding = HotkeyBinding::parse("ctrl+f9").unwrap();
        let p = press(Key::F(9), Modifiers::LCTRL | Modifiers::LALT | Modifiers::LSHIFT);
        assert!(binding.matches(&p));
    }

    #[test]
    fn missing_modifier_rejects() {
        let binding = HotkeyBinding::parse("ctrl+shift+f9").unwrap();
        assert!(!binding.matches(&press(Key::F(9), Modifiers::LCTRL)));
    }

    #[test]
    fn wrong_key_rejects() {
        let binding = HotkeyBinding::parse("ctrl+f9").unwrap();
        assert!(!binding.matches(&press(Key::F(8), Modifiers::LCTRL)));
    }

    #[test]
    fn bare_key_binding_matches_with_or_without_modifiers() {
        let binding = HotkeyBinding::parse("f9").unwrap();

        assert!(binding.matches(&press(Key::F(9), Modifiers::empty())));
        assert!(binding.matches(&press(Key::F(9), Modifiers::LCTRL)));
    }

    #[test]
    fn rejects_empty_spec() {
        assert_eq!(HotkeyBinding::parse("  "), Err(ConfigError::EmptyHotkey));
    }

    #[test]
    fn rejects_modifier_only_spec() {
        assert_eq!(
            HotkeyBinding::parse("ctrl+shift"),
            Err(ConfigError::MissingTriggerKey)
        );
    }

    #[test]
    fn rejects_two_trigger_keys() {
        assert_eq!(
            HotkeyBinding::parse("a+b"),
            Err(ConfigError::DuplicateTriggerKey("b".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_token() {
        assert_eq!(
            HotkeyBinding::parse("ctrl+bogus"),
            Err(ConfigError::UnknownKeyToken("bogus".to_string()))
        );
    }

    #[test]
    fn display_is_canonical_lowercase() {
        let binding = HotkeyBinding::parse("Ctrl+Shift+F9").unwrap();
        assert_eq!(binding.to_string(), "ctrl+shift+f9");

        let binding = HotkeyBinding::parse("LCtrl+Space").unwrap();
        assert_eq!(binding.to_string(), "lctrl+space");
    }

    #[test]
    fn key_press_spec_marks_both_sides_for_agnostic_tokens() {
        let p = parse_key_press("ctrl+f9").unwrap();
        assert!(p.mods.contains(Modifiers::LCTRL));
        assert!(p.mods.contains(Modifiers::RCTRL));
    }

    #[test]
    fn function_keys_out_of_range_are_unknown() {
        assert_eq!(
            HotkeyBinding::parse("f25"),
            Err(ConfigError::UnknownKeyToken("f25".to_string()))
        );
        assert!(HotkeyBinding::parse("f12").is_ok());
    }
}
