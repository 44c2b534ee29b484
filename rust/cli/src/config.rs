//! Layered CLI configuration: defaults, then a TOML file named by
//! `HUCOACH_CONFIG`, then `HUCOACH_SEED` / `HUCOACH_EVAL` from the environment.

use hucoach_engine::evaluator::EvaluatorKind;
use hucoach_engine::game::HandConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

pub const CONFIG_ENV: &str = "HUCOACH_CONFIG";
pub const SEED_ENV: &str = "HUCOACH_SEED";
pub const EVAL_ENV: &str = "HUCOACH_EVAL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub init_stack: u32,
    pub sb: u32,
    pub bb: u32,
    pub seed: Option<u64>,
    pub evaluator: EvaluatorKind,
}

impl Default for Config {
    fn default() -> Self {
        let hand = HandConfig::default();
        Self {
            init_stack: hand.init_stack,
            sb: hand.sb,
            bb: hand.bb,
            seed: None,
            evaluator: EvaluatorKind::default(),
        }
    }
}

impl Config {
    pub fn hand_config(&self) -> HandConfig {
        HandConfig {
            init_stack: self.init_stack,
            sb: self.sb,
            bb: self.bb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub init_stack: ValueSource,
    pub sb: ValueSource,
    pub bb: ValueSource,
    pub seed: ValueSource,
    pub evaluator: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            init_stack: ValueSource::Default,
            sb: ValueSource::Default,
            bb: ValueSource::Default,
            seed: ValueSource::Default,
            evaluator: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.init_stack {
            cfg.init_stack = v;
            sources.init_stack = ValueSource::File;
        }
        if let Some(v) = f.sb {
            cfg.sb = v;
            sources.sb = ValueSource::File;
        }
        if let Some(v) = f.bb {
            cfg.bb = v;
            sources.bb = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.evaluator {
            cfg.evaluator = v;
            sources.evaluator = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("invalid {SEED_ENV}: {seed:?}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(name) = std::env::var(EVAL_ENV)
        && !name.is_empty()
    {
        cfg.evaluator = name
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("invalid {EVAL_ENV}: {e}")))?;
        sources.evaluator = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    init_stack: Option<u32>,
    #[serde(default)]
    sb: Option<u32>,
    #[serde(default)]
    bb: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    evaluator: Option<EvaluatorKind>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.hand_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {e}")))
}
