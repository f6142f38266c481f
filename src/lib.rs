//! Dataset registry for the Amazon deforestation frames pipeline.
//!
//! Resolves the raw/trusted data layout from a single data root and derives
//! the quarterly sampling grid and frame tiling parameters. Build one
//! [`Registry`] at startup and pass it by reference.

pub mod config;
pub mod error;
pub mod paths;
pub mod registry;
pub mod spatial;
pub mod temporal;

pub use config::Config;
pub use error::{RegistryError, Result};
pub use paths::{Dataset, DatasetKind, Layer};
pub use registry::{Entry, Registry};
pub use spatial::{BoundingBox, SpatialParameters};
pub use temporal::TemporalRange;
