//! Configuration file support
//!
//! Loads settings from ~/.parenlight.toml (or %USERPROFILE%\.parenlight.toml on Windows)
//!
//! Example:
//! ```text
//! # parenlight configuration
//! highlight-current-line = true
//! highlight-brackets = true
//! tab-width = 4
//!
//! [colors]
//! match-fg = "red"
//! match-bg = "#a0eea0"
//! mismatch-bg = "red"
//! current-line-bg = "rgb(232, 242, 254)"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use toml::{Table, Value};

use crate::error::{ParenError, Result};
use crate::highlight::{Color, Theme};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to highlight the line holding the cursor
    pub highlight_current_line: bool,
    /// Whether to highlight brackets next to the cursor
    pub highlight_brackets: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Highlight styles
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight_current_line: true,
            highlight_brackets: true,
            tab_width: 8,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".parenlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".parenlight.toml"))
        }
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Some(path) if path.exists() => path,
            _ => return Config::default(),
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Config::default();
        config.apply(&Self::parse(&contents)?);
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse config file contents into a table
    fn parse(contents: &str) -> Result<Table> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply settings from a parsed table; bad values are skipped
    fn apply(&mut self, settings: &Table) {
        if let Some(value) = bool_setting(settings, "highlight-current-line") {
            self.highlight_current_line = value;
        }

        if let Some(value) = bool_setting(settings, "highlight-brackets") {
            self.highlight_brackets = value;
        }

        match settings.get("tab-width") {
            Some(Value::Integer(n)) => self.tab_width = (*n).clamp(1, 16) as usize, // Between 1 and 16
            Some(other) => warn!("tab-width: expected an integer, got {}", other),
            None => {}
        }

        if let Some(colors) = settings.get("colors").and_then(Value::as_table) {
            self.apply_colors(colors);
        }
    }

    fn apply_colors(&mut self, colors: &Table) {
        let theme = &mut self.theme;
        let slots: [(&str, &mut Color); 6] = [
            ("match-fg", &mut theme.paren_match.fg),
            ("match-bg", &mut theme.paren_match.bg),
            ("mismatch-fg", &mut theme.paren_mismatch.fg),
            ("mismatch-bg", &mut theme.paren_mismatch.bg),
            ("current-line-fg", &mut theme.current_line.fg),
            ("current-line-bg", &mut theme.current_line.bg),
        ];

        for (key, slot) in slots {
            let Some(value) = colors.get(key) else {
                continue;
            };
            match value.as_str().map(parse_color) {
                Some(Ok(color)) => *slot = color,
                Some(Err(e)) => warn!("colors.{}: {}", key, e),
                None => warn!("colors.{}: expected a string, got {}", key, value),
            }
        }
    }
}

fn bool_setting(settings: &Table, key: &str) -> Option<bool> {
    let value = settings.get(key)?;
    let parsed = value.as_bool();
    if parsed.is_none() {
        warn!("{}: expected a boolean, got {}", key, value);
    }
    parsed
}

/// Parse a color: an ANSI name, `#rrggbb`, or `rgb(r, g, b)`
pub fn parse_color(s: &str) -> Result<Color> {
    static HEX: OnceLock<Regex> = OnceLock::new();
    static RGB: OnceLock<Regex> = OnceLock::new();

    let s = s.trim();
    if let Some(color) = Color::from_name(s) {
        return Ok(color);
    }

    let invalid = || ParenError::InvalidColor(s.to_string());

    let hex = HEX.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").expect("valid regex")
    });
    if let Some(caps) = hex.captures(s) {
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| invalid());
        return Ok(Color::Rgb(channel(1)?, channel(2)?, channel(3)?));
    }

    let rgb = RGB.get_or_init(|| {
        Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").expect("valid regex")
    });
    if let Some(caps) = rgb.captures(s) {
        let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
        return Ok(Color::Rgb(channel(1)?, channel(2)?, channel(3)?));
    }

    Err(invalid())
}
