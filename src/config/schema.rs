use crate::core::controller::{DEFAULT_DELAY_MAX_MS, DEFAULT_DELAY_MIN_MS};
use crate::core::formatter::FormatOptions;
use crate::core::heuristics::HeuristicRule;
use crate::core::modes::ModeFlags;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

/// Upper bound on the simulated thinking pause.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Max tracing level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Which reply segments are on at startup
    #[serde(default)]
    pub modes: ModeFlags,

    #[serde(default)]
    pub reply: ReplyConfig,

    #[serde(default)]
    pub formatter: FormatOptions,

    #[serde(default)]
    pub heuristics: HeuristicsConfig,
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            log_level: default_log_level(),
            modes: ModeFlags::default(),
            reply: ReplyConfig::default(),
            formatter: FormatOptions::default(),
            heuristics: HeuristicsConfig::default(),
        }
    }
}

// ── Reply timing ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Shortest simulated thinking pause (default: 550)
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,
    /// Longest simulated thinking pause (default: 950)
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,
    /// Still append an (empty) agent message when every mode is off
    #[serde(default = "default_true")]
    pub append_empty: bool,
    /// System message shown at the top of a new chat
    #[serde(default = "default_greeting")]
    pub greeting: Option<String>,
}

fn default_delay_min_ms() -> u64 {
    DEFAULT_DELAY_MIN_MS
}

fn default_delay_max_ms() -> u64 {
    DEFAULT_DELAY_MAX_MS
}

#[allow(clippy::unnecessary_wraps)]
fn default_greeting() -> Option<String> {
    Some("Describe a goal and I'll sketch an analysis, a plan, and a first move.".into())
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            append_empty: true,
            greeting: default_greeting(),
        }
    }
}

// ── Heuristic table ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicsConfig {
    /// Keep the stock rules after any custom ones (default: true)
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    /// Extra rules, checked before the stock ones in the order given
    #[serde(default)]
    pub rules: Vec<HeuristicRule>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            rules: Vec::new(),
        }
    }
}

// ── Validation ───────────────────────────────────────────────────

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        tracing::Level::from_str(&self.log_level).map_err(|_| {
            ConfigError::Validation(format!("log_level '{}' is not a tracing level", self.log_level))
        })?;

        if self.reply.delay_min_ms > self.reply.delay_max_ms {
            return Err(ConfigError::Validation(format!(
                "reply.delay_min_ms ({}) must not exceed reply.delay_max_ms ({})",
                self.reply.delay_min_ms, self.reply.delay_max_ms
            )));
        }
        if self.reply.delay_max_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "reply.delay_max_ms must be at most {MAX_REPLY_DELAY_MS}"
            )));
        }

        if self.formatter.primary_task_max_chars == 0 {
            return Err(ConfigError::Validation(
                "formatter.primary_task_max_chars must be greater than 0".into(),
            ));
        }

        self.heuristics.validate()
    }
}

impl HeuristicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            let id = rule.id.trim();
            if id.is_empty() {
                return Err(ConfigError::Validation(
                    "heuristics.rules: rule id must not be empty".into(),
                ));
            }
            if !seen.insert(id) {
                return Err(ConfigError::Validation(format!(
                    "heuristics.rules: duplicate rule id '{id}'"
                )));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "heuristics.rules.{id}: at least one keyword is required"
                )));
            }
            if rule.steps.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "heuristics.rules.{id}: at least one step is required"
                )));
            }
        }
        Ok(())
    }
}
