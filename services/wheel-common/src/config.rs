//! Configuration management for the Wheel screener.
//!
//! The screener reads a single configuration file at `~/.wheel-screener/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (WHEEL_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `WHEEL_PASS_THRESHOLD` → scoring.pass_threshold
//! - `WHEEL_BUDGET_PRICE` → report.budget_price_limit
//! - `WHEEL_LOG_LEVEL` → observability.log_level
//! - `WHEEL_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".wheel-screener"),
        |dirs| dirs.home_dir().join(".wheel-screener"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration shared by the screener library and CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scoring engine settings
    #[serde(default)]
    pub scoring: ScoringSettings,

    /// Result view settings
    #[serde(default)]
    pub report: ReportSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// A variable that is set but unparseable is an error rather than
    /// silently ignored, since it would change which tickers pass.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("WHEEL_PASS_THRESHOLD") {
            self.scoring.pass_threshold = raw
                .trim()
                .parse()
                .with_context(|| format!("WHEEL_PASS_THRESHOLD is not a number: {raw}"))?;
        }
        if let Some(raw) = lookup("WHEEL_BUDGET_PRICE") {
            self.report.budget_price_limit = raw
                .trim()
                .parse()
                .with_context(|| format!("WHEEL_BUDGET_PRICE is not a number: {raw}"))?;
        }
        if let Some(level) = lookup("WHEEL_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("WHEEL_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        Ok(())
    }
}

// ============================================================================
// Scoring Settings
// ============================================================================

/// Scoring engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Minimum total score for a ticker to be classified as passing.
    /// Must lie within the reachable score range [-3, 16].
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,

    /// Score batches across worker threads
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            parallel: true,
        }
    }
}

// ============================================================================
// Report Settings
// ============================================================================

/// Settings for the views built over a scored batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Upper price bound (exclusive) for the budget-friendly view
    #[serde(default = "default_budget_price_limit")]
    pub budget_price_limit: f64,

    /// Number of top candidates logged after a run
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            budget_price_limit: default_budget_price_limit(),
            top_n: default_top_n(),
        }
    }
}

// ============================================================================
// Observability
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to hold at `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_pass_threshold() -> f64 {
    7.0
}
fn default_budget_price_limit() -> f64 {
    20.0 // keeps cash-secured put collateral small
}
fn default_top_n() -> usize {
    20
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "pretty".into()
}
fn default_true() -> bool {
    true
}
