//! Engine configuration.
//!
//! Defaults match a freshly created engine; [`EngineConfig::from_env`] lets a
//! client override them without flags of its own:
//!
//! - `TERMINATION_FPS`: global tick rate (default 60)
//! - `TERMINATION_TRANSPARENCY`: transparency character (default `?`)
//! - `TERMINATION_DEFAULT_COLOR`: default color symbol (default `w`)
//! - `TERMINATION_DEBUG`: debug log file path (unset or blank disables it)

use std::path::PathBuf;

use crate::types::{DEFAULT_COLOR_SYMBOL, DEFAULT_FRAMES_PER_SECOND, DEFAULT_TRANSPARENCY_CHAR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub frames_per_second: i32,
    pub transparency_char: char,
    pub default_color: char,
    /// Append diagnostics to this file. Nothing is logged when unset.
    pub debug_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            transparency_char: DEFAULT_TRANSPARENCY_CHAR,
            default_color: DEFAULT_COLOR_SYMBOL,
            debug_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Create from any key lookup; unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().merge_lookup(lookup)
    }

    /// Apply environment overrides on top of `self`.
    pub fn merge_env(self) -> Self {
        self.merge_lookup(|key| std::env::var(key).ok())
    }

    pub fn merge_lookup(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let frames_per_second = lookup("TERMINATION_FPS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(self.frames_per_second);

        let transparency_char = lookup("TERMINATION_TRANSPARENCY")
            .and_then(|s| single_char(&s))
            .unwrap_or(self.transparency_char);

        let default_color = lookup("TERMINATION_DEFAULT_COLOR")
            .and_then(|s| single_char(&s))
            .unwrap_or(self.default_color);

        let debug_path = lookup("TERMINATION_DEBUG")
            .map(|s| s.trim().to_string())
            .map(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
            .unwrap_or(self.debug_path);

        Self {
            frames_per_second,
            transparency_char,
            default_color,
            debug_path,
        }
    }

    pub fn with_frames_per_second(mut self, frames_per_second: i32) -> Self {
        self.frames_per_second = frames_per_second;
        self
    }

    pub fn with_debug_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_path = Some(path.into());
        self
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(EngineConfig::from_lookup(lookup(&[])), EngineConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("TERMINATION_FPS", " 10 "),
            ("TERMINATION_TRANSPARENCY", "~"),
            ("TERMINATION_DEFAULT_COLOR", "G"),
            ("TERMINATION_DEBUG", "/tmp/termination.log"),
        ]));
        assert_eq!(cfg.frames_per_second, 10);
        assert_eq!(cfg.transparency_char, '~');
        assert_eq!(cfg.default_color, 'G');
        assert_eq!(cfg.debug_path, Some(PathBuf::from("/tmp/termination.log")));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("TERMINATION_FPS", "fast"),
            ("TERMINATION_TRANSPARENCY", "ab"),
            ("TERMINATION_DEBUG", "   "),
        ]));
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn builder_helpers() {
        let cfg = EngineConfig::default()
            .with_frames_per_second(5)
            .with_debug_path("debug.log");
        assert_eq!(cfg.frames_per_second, 5);
        assert_eq!(cfg.debug_path, Some(PathBuf::from("debug.log")));
    }

    #[test]
    fn merge_keeps_caller_defaults() {
        let cfg = EngineConfig::default()
            .with_frames_per_second(5)
            .merge_lookup(lookup(&[("TERMINATION_DEFAULT_COLOR", "r")]));
        assert_eq!(cfg.frames_per_second, 5);
        assert_eq!(cfg.default_color, 'r');

        let cfg = EngineConfig::default()
            .with_frames_per_second(5)
            .merge_lookup(lookup(&[("TERMINATION_FPS", "30")]));
        assert_eq!(cfg.frames_per_second, 30);
    }
}
