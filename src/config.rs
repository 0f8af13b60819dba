//! User configuration — reel timing, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/digit-reel/config.toml` (default `~/.config/digit-reel/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::core::easing::Easing;
use crate::core::reel::{Motion, ReturnMode, DEFAULT_DURATION};
use crate::error::ConfigError;

pub const DEFAULT_FPS: u16 = 60;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleScroll,
    Cancel,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (config file order).
    pub const ALL: &[Action] = &[
        Action::ToggleScroll,
        Action::Cancel,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ToggleScroll => "toggle_scroll",
            Action::Cancel => "cancel",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short form for the status bar (e.g. `"Space"`, `"Ctrl+r"`).
    pub fn display(&self) -> String {
        self.render(false)
    }

    /// Config-file form; parses back with [`KeyBind::parse`].
    fn to_config_string(&self) -> String {
        self.render(true)
    }

    fn render(&self, config_form: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up if !config_form => "↑".into(),
            KeyCode::Down if !config_form => "↓".into(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Space"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — reel timing and keybindings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub duration: Duration,
    pub easing: Easing,
    pub return_mode: ReturnMode,
    /// Frame ticks per second while the event loop is running.
    pub fps: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            duration: DEFAULT_DURATION,
            easing: Easing::MECHANICAL,
            return_mode: ReturnMode::Snap,
            fps: DEFAULT_FPS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ToggleScroll, vec![KeyBind::new(Char(' '), n), KeyBind::new(Enter, n)]);
        m.insert(Cancel, vec![KeyBind::new(Char('c'), n), KeyBind::new(Backspace, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// The reel timing described by this config.
    pub fn motion(&self) -> Motion {
        Motion {
            duration: self.duration,
            easing: self.easing,
            return_mode: self.return_mode,
        }
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: roll | {}: cancel | {}: settings | {}: quit",
            self.short_binding(Action::ToggleScroll),
            self.short_binding(Action::Cancel),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config; using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Parse the key-value format.  Bad lines are logged and skipped so one
    /// typo never costs the user the rest of their settings.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let applied = match key {
                "duration_ms" => parse_duration_ms(value).map(|d| config.duration = d),
                "easing" => value.parse::<Easing>().map(|e| config.easing = e),
                "return_mode" => ReturnMode::parse(value)
                    .map(|m| config.return_mode = m)
                    .ok_or_else(|| ConfigError::InvalidReturnMode(value.to_string())),
                "fps" => parse_fps(value).map(|f| config.fps = f),
                _ => {
                    if let Some(action) = Action::from_config_key(key) {
                        let parsed: Vec<KeyBind> =
                            value.split(',').filter_map(|p| KeyBind::parse(p.trim())).collect();
                        if !parsed.is_empty() {
                            config.bindings.insert(action, parsed);
                        }
                    }
                    Ok(())
                }
            };
            if let Err(err) = applied {
                warn!(key, %err, "ignoring config entry");
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# digit-reel configuration".to_string(),
            String::new(),
            "# Reel motion".to_string(),
            format!("duration_ms = {}", self.duration.as_millis()),
            format!("easing = {}", self.easing),
            format!("return_mode = {}", self.return_mode.label()),
            format!("fps = {}", self.fps),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Parse a duration given in whole milliseconds (at most one minute).
pub fn parse_duration_ms(s: &str) -> Result<Duration, ConfigError> {
    s.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms <= 60_000)
        .map(Duration::from_millis)
        .ok_or_else(|| ConfigError::InvalidDuration(s.to_string()))
}

pub fn parse_fps(s: &str) -> Result<u16, ConfigError> {
    s.trim()
        .parse::<u16>()
        .ok()
        .filter(|fps| (1..=240).contains(fps))
        .ok_or_else(|| ConfigError::InvalidFps(s.to_string()))
}

/// Return the config file path (`$XDG_CONFIG_HOME/digit-reel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("digit-reel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::easing::CubicBezier;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::ToggleScroll)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_reel_settings_and_bindings() {
        let config = AppConfig::parse(
            "# comment\n\
             duration_ms = 900\n\
             easing = linear\n\
             return_mode = ease\n\
             fps = 30\n\
             toggle_scroll = r, Ctrl+Space\n",
        );
        assert_eq!(config.duration, Duration::from_millis(900));
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.return_mode, ReturnMode::Ease);
        assert_eq!(config.fps, 30);
        assert_eq!(
            config.bindings[&Action::ToggleScroll],
            vec![
                KeyBind::new(KeyCode::Char('r'), KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char(' '), KeyModifiers::CONTROL),
            ]
        );
        // Untouched actions keep their defaults.
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn bad_entries_fall_back_to_defaults() {
        let config = AppConfig::parse("duration_ms = soon\neasing = 2, 0, 0, 1\nfps = 0\nreturn_mode = fling\n");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.duration = Duration::from_millis(2000);
        config.easing = Easing::CubicBezier(CubicBezier::new(0.25, 0.1, 0.25, 1.0).unwrap());
        config.return_mode = ReturnMode::Ease;
        config
            .bindings
            .insert(Action::Cancel, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::ALT)]);

        assert_eq!(AppConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn more_specific_binding_wins() {
        let mut config = AppConfig::default();
        config
            .bindings
            .insert(Action::Cancel, vec![KeyBind::new(KeyCode::Char(' '), KeyModifiers::CONTROL)]);
        assert_eq!(
            config.match_key(key(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn value_parsers_enforce_ranges() {
        assert_eq!(parse_duration_ms("1500").unwrap(), Duration::from_millis(1500));
        assert!(parse_duration_ms("-1").is_err());
        assert!(parse_duration_ms("600000").is_err());
        assert_eq!(parse_fps("60").unwrap(), 60);
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("1000").is_err());
    }
}
