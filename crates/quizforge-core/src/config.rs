//! Quiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question file to load when none is given on the command line.
    #[serde(default)]
    pub questions: Option<PathBuf>,
    /// Time limit for a session, in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Present questions in random order.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Fixed shuffle seed, for reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Address the HTTP server binds to.
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_time_limit() -> u64 {
    300
}
fn default_shuffle() -> bool {
    true
}
fn default_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: None,
            time_limit_secs: default_time_limit(),
            shuffle: default_shuffle(),
            seed: None,
            address: default_address(),
        }
    }
}

impl QuizConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Apply `QUIZFORGE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("QUIZFORGE_QUESTIONS") {
            self.questions = Some(PathBuf::from(path));
        }
        if let Ok(secs) = std::env::var("QUIZFORGE_TIME_LIMIT_SECS") {
            self.time_limit_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid QUIZFORGE_TIME_LIMIT_SECS: '{secs}'"))?;
        }
        if let Ok(seed) = std::env::var("QUIZFORGE_SEED") {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("invalid QUIZFORGE_SEED: '{seed}'"))?,
            );
        }
        if let Ok(address) = std::env::var("QUIZFORGE_ADDRESS") {
            self.address = address;
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_QUESTIONS`,
/// `QUIZFORGE_TIME_LIMIT_SECS`, `QUIZFORGE_SEED`, `QUIZFORGE_ADDRESS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    config.apply_env_overrides()?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
