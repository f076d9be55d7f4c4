use crate::coaching::{CoachingError, HarshWordMatch};
use crate::emotion::MEANINGFUL_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const ENV_MEANINGFUL_THRESHOLD: &str = "PERSONA_COACH_MEANINGFUL_THRESHOLD";
pub const ENV_HARSH_WORD_MATCH: &str = "PERSONA_COACH_HARSH_WORD_MATCH";

/// A probability cut-off in `[0, 1]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ThresholdOutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(MEANINGFUL_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl FromStr for Threshold {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(s.to_owned()))?;
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CoachingConfig {
    pub meaningful_threshold: Threshold,
    pub harsh_word_match: HarshWordMatch,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownOutputFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("markdown"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub audio: PathBuf,
    /// Overrides `<audio>.txt`.
    pub transcript: Option<PathBuf>,
    /// Overrides `<audio>.emotions.json`.
    pub emotions: Option<PathBuf>,
    pub output: OutputFormat,
    pub coaching: CoachingConfig,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(String),
    #[error("not a number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    InvalidHarshWordMatch(#[from] CoachingError),
    #[error("unknown output format: {0}")]
    UnknownOutputFormat(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_threshold(
    cli_value: Option<f64>,
    env_key: &str,
    env: &impl Env,
) -> Result<Threshold, ConfigError> {
    match cli_value {
        Some(v) => Threshold::new(v),
        None => match env.var(env_key) {
            Some(v) => v.parse(),
            None => Ok(Threshold::default()),
        },
    }
}

pub fn resolve_harsh_word_match(
    cli_value: Option<HarshWordMatch>,
    env_key: &str,
    env: &impl Env,
) -> Result<HarshWordMatch, ConfigError> {
    match cli_value {
        Some(v) => Ok(v),
        None => match env.var(env_key) {
            Some(v) => Ok(v.parse::<HarshWordMatch>()?),
            None => Ok(HarshWordMatch::default()),
        },
    }
}
