//! Session configuration with validate-and-fill-defaults semantics.

use std::env;
use std::path::PathBuf;

use crate::error::CantripError;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;
pub const DEFAULT_CONTINUE_PROMPT: &str = "... ";

fn env_flag(name: &str) -> bool {
    let Ok(value) = env::var(name) else {
        return false;
    };
    !value.trim().is_empty()
}

#[derive(Clone, Debug)]
pub struct ReplConfig {
    /// Name of the guest language the session hosts. Must be non-empty.
    pub engine: String,
    pub prompt: String,
    pub continue_prompt: String,
    /// History file; `None` keeps history in memory only.
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub save_history: bool,
    pub syntax_highlight: bool,
    pub auto_complete: bool,
    pub multi_line: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            engine: String::new(),
            prompt: String::new(),
            continue_prompt: String::new(),
            history_file: None,
            history_size: DEFAULT_HISTORY_SIZE,
            save_history: false,
            syntax_highlight: false,
            auto_complete: false,
            multi_line: false,
        }
    }
}

impl ReplConfig {
    /// Interactive defaults for the given engine: persistent history at
    /// the home-directory path, completion and multi-line on, and
    /// highlighting on unless `NO_COLOR` is set.
    pub fn for_engine(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            history_file: default_history_path(),
            save_history: true,
            syntax_highlight: !env_flag("NO_COLOR"),
            auto_complete: true,
            multi_line: true,
            ..Self::default()
        }
    }

    /// Checks the configuration and fills defaults in place: the prompt
    /// becomes `<engine>> `, the continuation prompt `... `, and a zero
    /// history size the standard 1000.
    pub fn validate(&mut self) -> Result<(), CantripError> {
        if self.engine.is_empty() {
            return Err(CantripError::config("engine cannot be empty"));
        }
        if self.prompt.is_empty() {
            self.prompt = format!("{}> ", self.engine);
        }
        if self.continue_prompt.is_empty() {
            self.continue_prompt = DEFAULT_CONTINUE_PROMPT.to_string();
        }
        if self.history_size == 0 {
            self.history_size = DEFAULT_HISTORY_SIZE;
        }
        Ok(())
    }
}

/// Default history location under the user's home directory.
pub fn default_history_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| {
        let mut p = PathBuf::from(home);
        p.push(".cantrip_history");
        p
    })
}

/// Expands a leading `~/` to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = env::var_os("HOME") {
            let mut p = PathBuf::from(home);
            p.push(rest);
            return p;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_engine_is_rejected() {
        let mut config = ReplConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fills_defaults() {
        let mut config = ReplConfig {
            engine: "lua".to_string(),
            history_size: 0,
            ..ReplConfig::default()
        };
        config.validate().unwrap();
        assert_eq!(config.prompt, "lua> ");
        assert_eq!(config.continue_prompt, "... ");
        assert_eq!(config.history_size, DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn explicit_settings_survive_validation() {
        let mut config = ReplConfig {
            engine: "tengo".to_string(),
            prompt: ">>> ".to_string(),
            continue_prompt: "| ".to_string(),
            history_size: 50,
            ..ReplConfig::default()
        };
        config.validate().unwrap();
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.continue_prompt, "| ");
        assert_eq!(config.history_size, 50);
    }

    #[test]
    fn tilde_paths_expand_against_home() {
        if let Some(home) = env::var_os("HOME") {
            let expanded = expand_path("~/x/history");
            assert!(expanded.starts_with(home));
            assert!(expanded.ends_with("x/history"));
        }
        assert_eq!(expand_path("/abs/path"), PathBuf::from("/abs/path"));
    }
}
