//! Engine configuration.
//!
//! Loaded with the following precedence:
//! explicit values > `OUTFITTER_*` environment variables > config file > defaults.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.outfitter/config.toml
//! score_floor = 0.2
//! score_ceiling = 1.8
//! top_k_per_category = 3
//! max_items = 6
//! max_accessories = 2
//! llm_sample_size = 30
//! unknown_season_policy = "fail_open"
//! strategy = "rule_based"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::season::UnknownSeasonPolicy;
use crate::types::normalize_key;

/// How the engine ranks candidate outfits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Exhaustive search over the bounded candidate pool.
    #[default]
    RuleBased,
    /// Ask the language model first, then fall back to search.
    LlmAssisted,
}

impl FromStr for SelectionStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "rule-based" | "rules" | "search" => Ok(Self::RuleBased),
            "llm-assisted" | "llm" => Ok(Self::LlmAssisted),
            other => Err(EngineError::invalid_config(
                "strategy",
                format!("expected rule_based or llm_assisted, got {other:?}"),
            )),
        }
    }
}

/// Tunables for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest standalone weather score a garment can receive.
    pub score_floor: f64,
    /// Highest standalone weather score a garment can receive.
    pub score_ceiling: f64,
    /// Candidates kept per category before combination search.
    pub top_k_per_category: usize,
    /// Largest outfit the engine will return.
    pub max_items: usize,
    /// Combined cap on accessory-like items (accessory, bag, hat, scarf).
    pub max_accessories: usize,
    /// Garments sampled into the LLM prompt.
    pub llm_sample_size: usize,
    pub unknown_season_policy: UnknownSeasonPolicy,
    pub strategy: SelectionStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_floor: 0.2,
            score_ceiling: 1.8,
            top_k_per_category: 3,
            max_items: 6,
            max_accessories: 2,
            llm_sample_size: 30,
            unknown_season_policy: UnknownSeasonPolicy::FailOpen,
            strategy: SelectionStrategy::RuleBased,
        }
    }
}

/// Parse an environment override, ignoring (and logging) malformed values.
fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                target: "outfitter::config",
                key,
                value = %raw,
                "Ignoring unparseable environment override"
            );
            None
        }
    }
}

impl EngineConfig {
    /// `~/.outfitter/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".outfitter").join("config.toml"))
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, EngineError> {
        toml::from_str(content).map_err(|source| EngineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file. Missing keys take their defaults.
    pub fn load_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        debug!(
            target: "outfitter::config",
            path = %path.display(),
            "Loaded configuration file"
        );
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when present. Environment overrides are applied on top and the result
    /// is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let base = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(default) => Self::load_file(&default)?,
                None => Self::default(),
            },
        };
        let config = base.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Overlay `OUTFITTER_*` environment variables.
    pub fn apply_env(mut self) -> Self {
        if let Some(v) = env_override("OUTFITTER_SCORE_FLOOR") {
            self.score_floor = v;
        }
        if let Some(v) = env_override("OUTFITTER_SCORE_CEILING") {
            self.score_ceiling = v;
        }
        if let Some(v) = env_override("OUTFITTER_TOP_K") {
            self.top_k_per_category = v;
        }
        if let Some(v) = env_override("OUTFITTER_MAX_ITEMS") {
            self.max_items = v;
        }
        if let Some(v) = env_override("OUTFITTER_MAX_ACCESSORIES") {
            self.max_accessories = v;
        }
        if let Some(v) = env_override("OUTFITTER_LLM_SAMPLE_SIZE") {
            self.llm_sample_size = v;
        }
        if let Some(v) = env_override("OUTFITTER_UNKNOWN_SEASON") {
            self.unknown_season_policy = v;
        }
        if let Some(v) = env_override("OUTFITTER_STRATEGY") {
            self.strategy = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.score_floor.is_finite() && self.score_floor > 0.0) {
            return Err(EngineError::invalid_config(
                "score_floor",
                "must be a finite value above zero",
            ));
        }
        if !(self.score_ceiling.is_finite() && self.score_ceiling > self.score_floor) {
            return Err(EngineError::invalid_config(
                "score_ceiling",
                "must be finite and greater than score_floor",
            ));
        }
        if self.top_k_per_category == 0 {
            return Err(EngineError::invalid_config(
                "top_k_per_category",
                "must be at least 1",
            ));
        }
        if self.max_items < 2 {
            return Err(EngineError::invalid_config(
                "max_items",
                "must be at least 2",
            ));
        }
        if self.max_accessories > self.max_items {
            return Err(EngineError::invalid_config(
                "max_accessories",
                "cannot exceed max_items",
            ));
        }
        if self.llm_sample_size == 0 {
            return Err(EngineError::invalid_config(
                "llm_sample_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
