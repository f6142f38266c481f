//! The dataset registry.
//! Built once from a validated `Config` and then only read. Resolution is
//! pure path joining: nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::paths::{Dataset, DatasetKind, Layer};
use crate::spatial::SpatialParameters;
use crate::temporal::{QuarterStarts, TemporalRange};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registry {
    root: PathBuf,
    temporal: TemporalRange,
    spatial: SpatialParameters,
}

/// One resolved dataset, as listed by `Registry::entries`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entry {
    pub layer: Layer,
    pub dataset: Dataset,
    pub key: &'static str,
    pub kind: DatasetKind,
    pub path: PathBuf,
}

impl Registry {
    pub fn new(
        root: impl Into<PathBuf>,
        temporal: TemporalRange,
        spatial: SpatialParameters,
    ) -> Self {
        Self {
            root: root.into(),
            temporal,
            spatial,
        }
    }

    /// Validates the config literals. An empty root, bad dates or bad tiling
    /// constants abort here.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.data_path.as_os_str().is_empty() {
            return Err(RegistryError::EmptyDataRoot);
        }
        let temporal = TemporalRange::parse(&config.start_date, &config.end_date)?;
        let spatial = SpatialParameters::new(
            config.base_unit,
            config.box_scale,
            config.input_box_size,
        )?;
        let registry = Self::new(&config.data_path, temporal, spatial);
        info!(
            root = %registry.root.display(),
            start = %temporal.start(),
            end = %temporal.end(),
            "registry ready"
        );
        Ok(registry)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layer_path(&self, layer: Layer) -> PathBuf {
        self.root.join(layer.segment())
    }

    /// Root + layer segment + dataset segment.
    pub fn resolve_path(&self, layer: Layer, dataset: Dataset) -> Result<PathBuf> {
        if dataset.layer() != layer {
            return Err(RegistryError::UnknownDataset {
                layer,
                name: dataset.key().to_string(),
            });
        }
        Ok(self.path_of(dataset))
    }

    /// Same as `resolve_path`, from a textual dataset key.
    pub fn resolve_named(&self, layer: Layer, name: &str) -> Result<PathBuf> {
        let dataset = Dataset::from_key(layer, name)?;
        Ok(self.path_of(dataset))
    }

    /// Path of a dataset in its own layer.
    pub fn path_of(&self, dataset: Dataset) -> PathBuf {
        self.layer_path(dataset.layer()).join(dataset.segment())
    }

    pub fn entries(&self) -> Vec<Entry> {
        Dataset::ALL
            .iter()
            .map(|&dataset| Entry {
                layer: dataset.layer(),
                dataset,
                key: dataset.key(),
                kind: dataset.kind(),
                path: self.path_of(dataset),
            })
            .collect()
    }

    pub fn temporal(&self) -> &TemporalRange {
        &self.temporal
    }

    pub fn temporal_range(&self) -> (NaiveDate, NaiveDate) {
        self.temporal.bounds()
    }

    pub fn quarters(&self) -> QuarterStarts {
        self.temporal.quarters()
    }

    pub fn sampling_grid(&self) -> Vec<NaiveDate> {
        self.temporal.sampling_grid()
    }

    pub fn spatial(&self) -> &SpatialParameters {
        &self.spatial
    }

    /// (box side in degrees, input box size in pixels)
    pub fn spatial_parameters(&self) -> (f64, u32) {
        self.spatial.as_tuple()
    }
}
