//! Configuration for the analytics engine.
//!
//! Provides YAML configuration loading with defaults for every section and
//! an explicit validation step.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analytics_engine::config::{AnalyticsConfig, load_config};
//!
//! // Load from default path (analytics.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/analytics.yaml"))?;
//! ```

mod observability;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LoggingConfig, ObservabilityConfig};

use crate::charges::ChargesSchedules;

/// Default configuration file path.
const DEFAULT_CONFIG_PATH: &str = "analytics.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyticsConfig {
    /// Reporting calendar configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Cache TTL configuration.
    #[serde(default)]
    pub cache: CacheTtlConfig,
    /// Broker charge schedule overrides.
    #[serde(default)]
    pub charges: ChargesSchedules,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AnalyticsConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reporting.validate()?;
        self.cache.validate()?;
        self.charges
            .validate()
            .map_err(ConfigError::ValidationError)?;
        Ok(())
    }
}

/// Reporting calendar configuration.
///
/// One fixed UTC offset governs every calendar decision — "today", month
/// and year boundaries, the default metrics window — so mixed local/UTC
/// date handling cannot creep in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Reporting timezone as minutes east of UTC (default +05:30).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Days covered by the dashboard's recent-performance window.
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: u32,
    /// Months covered by the default performance-metrics window.
    #[serde(default = "default_metrics_months")]
    pub default_metrics_months: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            recent_window_days: default_recent_window_days(),
            default_metrics_months: default_metrics_months(),
        }
    }
}

impl ReportingConfig {
    /// The configured offset as a chrono `FixedOffset`.
    ///
    /// An out-of-range value (rejected by `validate`) falls back to UTC.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Offsets beyond +/-14h do not exist on any civil calendar.
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ConfigError::ValidationError(format!(
                "utc_offset_minutes {} outside +/-840",
                self.utc_offset_minutes
            )));
        }
        if self.recent_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "recent_window_days must be at least 1".to_string(),
            ));
        }
        if self.default_metrics_months == 0 {
            return Err(ConfigError::ValidationError(
                "default_metrics_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_utc_offset_minutes() -> i32 {
    330 // +05:30, exchange-local
}

fn default_recent_window_days() -> u32 {
    30
}

fn default_metrics_months() -> u32 {
    12
}

/// Cache TTLs per query family, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// Dashboard summary TTL.
    #[serde(default = "default_dashboard_ttl")]
    pub dashboard_secs: u64,
    /// Performance metrics TTL.
    #[serde(default = "default_metrics_ttl")]
    pub metrics_secs: u64,
    /// Report TTL.
    #[serde(default = "default_report_ttl")]
    pub report_secs: u64,
    /// Breakdown TTL.
    #[serde(default = "default_breakdown_ttl")]
    pub breakdown_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            dashboard_secs: default_dashboard_ttl(),
            metrics_secs: default_metrics_ttl(),
            report_secs: default_report_ttl(),
            breakdown_secs: default_breakdown_ttl(),
        }
    }
}

impl CacheTtlConfig {
    /// Dashboard TTL as a duration.
    #[must_use]
    pub const fn dashboard(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.dashboard_secs)
    }

    /// Metrics TTL as a duration.
    #[must_use]
    pub const fn metrics(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.metrics_secs)
    }

    /// Report TTL as a duration.
    #[must_use]
    pub const fn report(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.report_secs)
    }

    /// Breakdown TTL as a duration.
    #[must_use]
    pub const fn breakdown(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.breakdown_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, secs) in [
            ("dashboard_secs", self.dashboard_secs),
            ("metrics_secs", self.metrics_secs),
            ("report_secs", self.report_secs),
            ("breakdown_secs", self.breakdown_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "cache ttl {name} must be positive"
                )));
            }
        }
        Ok(())
    }
}

fn default_dashboard_ttl() -> u64 {
    300
}

fn default_metrics_ttl() -> u64 {
    900
}

fn default_report_ttl() -> u64 {
    1800
}

fn default_breakdown_ttl() -> u64 {
    900
}

/// Load and validate configuration from a YAML file.
///
/// With no path, reads `analytics.yaml` from the working directory; a
/// missing default file yields the built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<AnalyticsConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    let config = match std::fs::read_to_string(path) {
        Ok(raw) => serde_yaml_bw::from_str(&raw)?,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound && !required => {
            AnalyticsConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source,
            });
        }
    };

    config.validate()?;
    Ok(config)
}
