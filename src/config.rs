//! External configuration loader.
//!
//! Reads `atlas.toml` from the executable's directory (or CWD).
//! Falls back to defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "atlas.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub rules: Rules,
    pub catalog: Option<PathBuf>,
    pub log_file: PathBuf,
    /// Problems met while loading, reported once logging is up.
    pub warnings: Vec<String>,
}

/// Everything the state machine needs to know about pacing and scoring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub time_limit_secs: u32,
    pub tick: Duration,
    pub hint_penalty_secs: u32,
    pub fragment_target: usize,
    pub incorrect_feedback: Duration,
    pub correct_feedback: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        TomlConfig::default().rules()
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timer: TomlTimer,
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    feedback: TomlFeedback,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTimer {
    #[serde(default = "default_time_limit")]
    time_limit_secs: u32,
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
    #[serde(default = "default_hint_penalty")]
    hint_penalty_secs: u32,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_fragment_target")]
    fragment_target: usize,
}

#[derive(Deserialize, Debug)]
struct TomlFeedback {
    #[serde(default = "default_incorrect_ms")]
    incorrect_ms: u64,
    #[serde(default = "default_correct_ms")]
    correct_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    catalog: Option<String>,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_time_limit() -> u32 { 1500 } // 25 minutes
fn default_tick_ms() -> u64 { 1000 }
fn default_hint_penalty() -> u32 { 60 }
fn default_fragment_target() -> usize { 3 }
fn default_incorrect_ms() -> u64 { 2000 }
fn default_correct_ms() -> u64 { 1500 }
fn default_log_file() -> String { "atlas.log".into() }

impl Default for TomlTimer {
    fn default() -> Self {
        TomlTimer {
            time_limit_secs: default_time_limit(),
            tick_ms: default_tick_ms(),
            hint_penalty_secs: default_hint_penalty(),
        }
    }
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            fragment_target: default_fragment_target(),
        }
    }
}

impl Default for TomlFeedback {
    fn default() -> Self {
        TomlFeedback {
            incorrect_ms: default_incorrect_ms(),
            correct_ms: default_correct_ms(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            catalog: None,
            log_file: default_log_file(),
        }
    }
}

impl TomlConfig {
    fn rules(&self) -> Rules {
        Rules {
            time_limit_secs: self.timer.time_limit_secs,
            tick: Duration::from_millis(self.timer.tick_ms.max(1)),
            hint_penalty_secs: self.timer.hint_penalty_secs,
            fragment_target: self.rules.fragment_target.max(1),
            incorrect_feedback: Duration::from_millis(self.feedback.incorrect_ms),
            correct_feedback: Duration::from_millis(self.feedback.correct_ms),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `atlas.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        Self::load_from(&candidate_dirs())
    }

    pub fn load_from(search_dirs: &[PathBuf]) -> Self {
        let mut warnings = Vec::new();
        let (toml_cfg, base) = load_toml(search_dirs, &mut warnings);

        // Relative paths resolve against the directory the config came from
        let resolve = |p: &str| match &base {
            Some(dir) if !Path::new(p).is_absolute() => dir.join(p),
            _ => PathBuf::from(p),
        };

        GameConfig {
            rules: toml_cfg.rules(),
            catalog: toml_cfg.general.catalog.as_deref().map(resolve),
            log_file: resolve(&toml_cfg.general.log_file),
            warnings,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rules: Rules::default(),
            catalog: None,
            log_file: PathBuf::from(default_log_file()),
            warnings: Vec::new(),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// First readable `atlas.toml`, and the directory it was found in.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> (TomlConfig, Option<PathBuf>) {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => return (cfg, Some(dir.clone())),
                Err(e) => {
                    warnings.push(format!("{} parse error, using defaults: {e}", path.display()));
                    return (TomlConfig::default(), None);
                }
            },
            Err(e) => {
                warnings.push(format!("could not read {}: {e}", path.display()));
            }
        }
    }
    (TomlConfig::default(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_give_a_25_minute_game() {
        let rules = Rules::default();
        assert_eq!(rules.time_limit_secs, 1500);
        assert_eq!(rules.tick, Duration::from_secs(1));
        assert_eq!(rules.hint_penalty_secs, 60);
        assert_eq!(rules.fragment_target, 3);
        assert_eq!(rules.incorrect_feedback, Duration::from_millis(2000));
        assert_eq!(rules.correct_feedback, Duration::from_millis(1500));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_from(&[dir.path().to_path_buf()]);
        assert_eq!(config.rules, Rules::default());
        assert!(config.catalog.is_none());
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[timer]\nhint_penalty_secs = 30\n\n[general]\ncatalog = \"puzzles\"\n",
        )
        .unwrap();

        let config = GameConfig::load_from(&[dir.path().to_path_buf()]);
        assert_eq!(config.rules.hint_penalty_secs, 30);
        assert_eq!(config.rules.time_limit_secs, 1500);
        assert_eq!(config.catalog, Some(dir.path().join("puzzles")));
        assert_eq!(config.log_file, dir.path().join("atlas.log"));
    }

    #[test]
    fn broken_file_warns_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[timer\n").unwrap();

        let config = GameConfig::load_from(&[dir.path().to_path_buf()]);
        assert_eq!(config.rules, Rules::default());
        assert_eq!(config.warnings.len(), 1);
    }
}
