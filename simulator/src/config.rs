use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing::Level;
use wheelhouse_execution::{presets, DefinitionError, Runtime, StrategyDefinition};
use wheelhouse_types::{BetLimits, LimitsError};

/// Table limits as written in a config file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TableConfig {
    pub min: u64,
    pub min_outside: u64,
    pub max: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min: 1,
            min_outside: 5,
            max: 500,
        }
    }
}

/// Either a preset name or an inline definition.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StrategySource {
    Preset(String),
    Definition(Box<StrategyDefinition>),
}

/// Configuration for a [crate::Simulator] session.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub table: TableConfig,
    pub strategy: StrategySource,

    #[serde(default = "default_bankroll")]
    pub bankroll: u64,
    #[serde(default = "default_spins")]
    pub spins: u64,
    /// Wheel seed.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub diagnostics: Option<String>,
    #[serde(default = "default_flush_every")]
    pub flush_every: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid table limits: {0}")]
    InvalidLimits(#[from] LimitsError),
    #[error("invalid strategy: {0}")]
    InvalidDefinition(#[from] DefinitionError),
    #[error("unknown preset: {value}")]
    UnknownPreset { value: String },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

pub struct ValidatedConfig {
    pub runtime: Runtime,
    pub bankroll: u64,
    pub spins: u64,
    pub seed: u64,
    pub log_level: Level,
    pub diagnostics: Option<PathBuf>,
    pub flush_every: usize,
}

fn default_bankroll() -> u64 {
    1_000
}

fn default_spins() -> u64 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_flush_every() -> usize {
    100
}

impl Config {
    /// A session on the default table running a named preset.
    pub fn from_preset(name: &str) -> Self {
        Self {
            table: TableConfig::default(),
            strategy: StrategySource::Preset(name.to_string()),
            bankroll: default_bankroll(),
            spins: default_spins(),
            seed: 0,
            log_level: default_log_level(),
            diagnostics: None,
            flush_every: default_flush_every(),
        }
    }

    /// Parse a config file. Enums inside an inline strategy are written as
    /// single-key maps (`overflow: { recycle_to: 3 }`).
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        wheelhouse_execution::from_yaml(yaml)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let limits = BetLimits::new(self.table.min, self.table.min_outside, self.table.max)?;
        let definition = match self.strategy {
            StrategySource::Preset(name) => {
                presets::preset(&name).ok_or(ConfigError::UnknownPreset { value: name })?
            }
            StrategySource::Definition(definition) => *definition,
        };
        let runtime = Runtime::new(definition, limits)?;

        if self.bankroll == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "bankroll",
                value: self.bankroll,
            });
        }
        if self.flush_every == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "flush_every",
                value: 0,
            });
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            runtime,
            bankroll: self.bankroll,
            spins: self.spins,
            seed: self.seed,
            log_level,
            diagnostics: self.diagnostics.map(PathBuf::from),
            flush_every: self.flush_every,
        })
    }
}
