use crate::core::PartitionPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the engine's inputs come from.
///
/// `mode = "matrix"` reads a precomputed score matrix plus gender lists;
/// `mode = "roster"` reads a questionnaire roster and scores it on the fly.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_mode")]
    pub mode: String,
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
    #[serde(default = "default_genders_path")]
    pub genders_path: String,
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
    #[serde(default = "default_roster_path")]
    pub roster_path: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            mode: default_input_mode(),
            scores_path: default_scores_path(),
            genders_path: default_genders_path(),
            preferences_path: default_preferences_path(),
            roster_path: default_roster_path(),
        }
    }
}

fn default_input_mode() -> String { "matrix".to_string() }
fn default_scores_path() -> String { "raw_scores.txt".to_string() }
fn default_genders_path() -> String { "genders.txt".to_string() }
fn default_preferences_path() -> String { "gender_preferences.txt".to_string() }
fn default_roster_path() -> String { "testdata.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// "index-order" or "shuffle"
    #[serde(default = "default_partition_strategy")]
    pub partition: String,
    /// Shuffle seed; only read when partition = "shuffle"
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            partition: default_partition_strategy(),
            seed: None,
        }
    }
}

fn default_partition_strategy() -> String { "index-order".to_string() }

impl MatchingSettings {
    pub fn policy(&self) -> Result<PartitionPolicy, ConfigError> {
        match self.partition.as_str() {
            "index-order" => Ok(PartitionPolicy::IndexOrder),
            "shuffle" => Ok(PartitionPolicy::Shuffle {
                seed: self.seed.unwrap_or(0),
            }),
            other => Err(ConfigError::Message(format!(
                "unknown partition strategy {:?} (expected \"index-order\" or \"shuffle\")",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// "table" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_output_format() -> String { "table".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with DUET__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with DUET__)
            // e.g., DUET__MATCHING__SEED -> matching.seed
            .add_source(
                Environment::with_prefix("DUET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DUET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
