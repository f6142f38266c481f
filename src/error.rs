//! Registry errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::Layer;

/// Registry result type
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Everything the registry can reject.
///
/// `UnknownDataset` is a caller error and surfaces at the offending lookup.
/// `InvalidDate` covers both malformed literals and a range whose start is
/// after its end.
/// The remaining variants are configuration-authoring faults raised while the
/// registry is being built; none of them are worth retrying.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown layer '{0}' (expected 'raw' or 'trusted')")]
    UnknownLayer(String),

    #[error("unknown dataset '{name}' in {layer} layer")]
    UnknownDataset { layer: Layer, name: String },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("data root is empty")]
    EmptyDataRoot,

    #[error("spatial parameter {name} must be positive and nonzero, got {value}")]
    InvalidSpatial { name: &'static str, value: f64 },

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
