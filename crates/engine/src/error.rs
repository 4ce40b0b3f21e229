use std::path::PathBuf;

use thiserror::Error;

use crate::wardrobe::WardrobeError;

/// Errors surfaced to the caller of the engine.
///
/// Data-quality gaps (unknown colors, unparseable season tags, a failing LLM)
/// never show up here; they degrade to neutral scores inside the engine.
/// What remains are contract errors and collaborator failures.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value is out of its valid range.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A category key outside the closed category set reached the engine.
    #[error("unknown garment category: {0:?}")]
    UnknownCategory(String),

    /// A weather field could not be interpreted.
    #[error("invalid weather {field}: {value:?}")]
    InvalidWeather { field: &'static str, value: String },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::EngineConfig`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The wardrobe collaborator failed to list garments.
    #[error(transparent)]
    Wardrobe(#[from] WardrobeError),
}

impl EngineError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
