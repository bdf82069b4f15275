//! Bot configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from morpheus.toml)
//! - User config in the home directory (~/.config/morpheus/morpheus.toml)
//! - `./morpheus.toml`, or an explicit path passed on the command line
//! - Environment variables such as `MORPHEUS__SCHEDULE__UTC_OFFSET_HOURS`;
//!   `MORPHEUS__MONITOR__SEARCH_TERMS` takes a comma-separated list

use crate::prompts::Prompts;
use crate::schedule::validate_slots;
use chrono::{FixedOffset, TimeDelta};
use config::{Config, Environment, File, FileFormat};
use morpheus_core::{EngagementMetric, ScheduleSlot};
use morpheus_error::{ConfigError, MorpheusError, MorpheusResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../morpheus.toml");

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "MORPHEUS";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("monitor.search_terms")
        .try_parsing(true)
}

/// Assistant job settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Seconds between status polls
    pub poll_interval_secs: u64,
    /// Seconds before a job is abandoned
    pub timeout_secs: u64,
    /// Cancel abandoned jobs on the remote
    #[serde(default)]
    pub cancel_on_timeout: bool,
}

impl AssistantConfig {
    /// Pause between status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Job timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Scheduled post settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Offset of the reference timezone from UTC, in hours
    pub utc_offset_hours: i32,
    /// Minutes after the top of the hour during which a slot may fire
    pub window_minutes: u32,
    /// Time-of-day slots
    #[serde(default)]
    pub slots: Vec<ScheduleSlot>,
}

impl ScheduleConfig {
    /// Reference timezone.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the offset is outside ±23 hours.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        if self.utc_offset_hours.abs() > 23 {
            return Err(ConfigError::new(format!(
                "UTC offset must be within ±23 hours, got {}",
                self.utc_offset_hours
            )));
        }
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            ConfigError::new(format!("Invalid UTC offset {}", self.utc_offset_hours))
        })
    }
}

/// Community monitoring settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Search terms, one query each
    pub search_terms: Vec<String>,
    /// Appended to every search term
    #[serde(default)]
    pub query_suffix: String,
    /// Minimum engagement score for a reply
    pub min_engagement: u64,
    /// Counters making up the engagement score
    #[serde(default)]
    pub engagement_metric: EngagementMetric,
    /// Maximum replies per cycle
    pub batch_size: usize,
    /// Results requested per search
    pub max_results: usize,
    /// Seconds to pause between replies
    pub cooldown_secs: u64,
    /// Generation attempts before a too-long reply is given up
    pub max_reply_attempts: u32,
}

impl MonitorConfig {
    /// Pause between replies.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Main loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Seconds between ticks
    pub tick_interval_secs: u64,
    /// Seconds to wait after a tick with errors
    pub error_backoff_secs: u64,
}

impl RuntimeConfig {
    /// Pause after a clean tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    /// Pause after a tick with errors.
    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

/// Dedup store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Store location
    pub path: PathBuf,
    /// Days before an engagement stops blocking another reply
    pub retention_days: u32,
}

impl DedupConfig {
    /// Retention window.
    pub fn retention(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.retention_days))
    }
}

/// Complete bot configuration.
///
/// # Example
///
/// ```
/// use morpheus_bot::BotConfig;
///
/// let config = BotConfig::from_toml_str(
///     r#"
///     [monitor]
///     min_engagement = 25
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.monitor.min_engagement, 25);
/// assert_eq!(config.runtime.tick_interval_secs, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Assistant job settings
    pub assistant: AssistantConfig,
    /// Scheduled post settings
    pub schedule: ScheduleConfig,
    /// Community monitoring settings
    pub monitor: MonitorConfig,
    /// Main loop timing
    pub runtime: RuntimeConfig,
    /// Dedup store settings
    pub dedup: DedupConfig,
    /// Prompt templates
    #[serde(default)]
    pub prompts: Prompts,
}

impl BotConfig {
    /// Load configuration from every source.
    ///
    /// When `path` is given it must exist and replaces `./morpheus.toml`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or parsed, or the
    /// result fails [`validate`](Self::validate).
    #[instrument]
    pub fn load(path: Option<&Path>) -> MorpheusResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/morpheus/morpheus.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("morpheus").required(false)),
        };

        Self::finish(builder.add_source(environment()).build())
    }

    /// Bundled defaults with `toml` layered on top. Reads no files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `toml` cannot be parsed or the result is
    /// invalid.
    pub fn from_toml_str(toml: &str) -> MorpheusResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build(),
        )
    }

    /// Bundled defaults with the given variables applied as environment
    /// overrides. Reads neither files nor the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a value cannot be parsed or the result is
    /// invalid.
    pub fn from_env_vars<I, K, V>(vars: I) -> MorpheusResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(environment().source(Some(vars)))
                .build(),
        )
    }

    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the bundled file is invalid.
    pub fn bundled() -> MorpheusResult<Self> {
        Self::from_toml_str("")
    }

    fn finish(built: Result<Config, config::ConfigError>) -> MorpheusResult<Self> {
        let config: Self = built
            .map_err(|e| {
                MorpheusError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MorpheusError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and consistency.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_slots(&self.schedule.slots)?;
        self.schedule.offset()?;

        if !(1..=60).contains(&self.schedule.window_minutes) {
            return Err(ConfigError::new(format!(
                "schedule.window_minutes must be 1-60, got {}",
                self.schedule.window_minutes
            )));
        }

        let intervals = [
            ("assistant.poll_interval_secs", self.assistant.poll_interval_secs),
            ("assistant.timeout_secs", self.assistant.timeout_secs),
            ("runtime.tick_interval_secs", self.runtime.tick_interval_secs),
            ("runtime.error_backoff_secs", self.runtime.error_backoff_secs),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::new(format!("{} must be greater than zero", name)));
        }

        if self.monitor.batch_size == 0 {
            return Err(ConfigError::new("monitor.batch_size must be at least 1"));
        }
        if self.monitor.max_reply_attempts == 0 {
            return Err(ConfigError::new(
                "monitor.max_reply_attempts must be at least 1",
            ));
        }
        if self.dedup.retention_days == 0 {
            return Err(ConfigError::new("dedup.retention_days must be at least 1"));
        }

        Ok(())
    }
}
