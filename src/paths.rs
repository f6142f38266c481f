//! Data layers and the fixed dataset enumeration.
//! Each dataset lives in exactly one layer under a literal segment, and is
//! either a directory of files or a single tabular file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{RegistryError, Result};

/// Data lake layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Source data as originally published
    Raw,
    /// Cleaned and derived tables
    Trusted,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Raw, Layer::Trusted];

    pub fn segment(self) -> &'static str {
        match self {
            Layer::Raw => "raw",
            Layer::Trusted => "trusted",
        }
    }

    pub fn datasets(self) -> impl Iterator<Item = Dataset> {
        Dataset::ALL.into_iter().filter(move |d| d.layer() == self)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.segment())
    }
}

impl FromStr for Layer {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Layer::Raw),
            "trusted" => Ok(Layer::Trusted),
            _ => Err(RegistryError::UnknownLayer(s.to_string())),
        }
    }
}

/// Whether a resolved path names a directory or a single file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Directory,
    File,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            DatasetKind::Directory => "dir",
            DatasetKind::File => "file",
        })
    }
}

/// Every dataset the pipeline knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    // raw
    AmazonFrontier,
    InitialDeforestation,
    Deter,
    Prodes,
    RawCounties,
    RawRainfall,
    // trusted
    Deforestation,
    Frames,
    FramesIdx,
    Counties,
    CountiesDeforestation,
    AverageRainfall,
}

impl Dataset {
    pub const ALL: [Dataset; 12] = [
        Dataset::AmazonFrontier,
        Dataset::InitialDeforestation,
        Dataset::Deter,
        Dataset::Prodes,
        Dataset::RawCounties,
        Dataset::RawRainfall,
        Dataset::Deforestation,
        Dataset::Frames,
        Dataset::FramesIdx,
        Dataset::Counties,
        Dataset::CountiesDeforestation,
        Dataset::AverageRainfall,
    ];

    pub fn layer(self) -> Layer {
        match self {
            Dataset::AmazonFrontier
            | Dataset::InitialDeforestation
            | Dataset::Deter
            | Dataset::Prodes
            | Dataset::RawCounties
            | Dataset::RawRainfall => Layer::Raw,
            Dataset::Deforestation
            | Dataset::Frames
            | Dataset::FramesIdx
            | Dataset::Counties
            | Dataset::CountiesDeforestation
            | Dataset::AverageRainfall => Layer::Trusted,
        }
    }

    /// Identifier used on the command line and in listings. Unique within a layer.
    pub fn key(self) -> &'static str {
        match self {
            Dataset::AmazonFrontier => "amazon_frontier",
            Dataset::InitialDeforestation => "initial_deforestation",
            Dataset::Deter => "deter",
            Dataset::Prodes => "prodes",
            Dataset::RawCounties | Dataset::Counties => "counties",
            Dataset::RawRainfall | Dataset::AverageRainfall => "rainfall",
            Dataset::Deforestation => "deforestation",
            Dataset::Frames => "frames",
            Dataset::FramesIdx => "frames_idx",
            Dataset::CountiesDeforestation => "counties_deforestation",
        }
    }

    /// Literal path segment below the layer directory.
    pub fn segment(self) -> &'static str {
        match self {
            Dataset::AmazonFrontier => "brazilian_legal_amazon",
            Dataset::InitialDeforestation => "accumulated_deforestation_2007",
            Dataset::Deter => "deter-amz-public-2023set08",
            Dataset::Prodes => "yearly_deforestation",
            Dataset::RawCounties => "municipalities",
            Dataset::RawRainfall => "precipitation",
            Dataset::Deforestation => "deforestation.csv",
            Dataset::Frames => "frames_detail",
            Dataset::FramesIdx => "frames_idx.csv",
            Dataset::Counties => "counties.csv",
            Dataset::CountiesDeforestation => "counties_deforestation.csv",
            Dataset::AverageRainfall => "precipitation.csv",
        }
    }

    pub fn kind(self) -> DatasetKind {
        if Path::new(self.segment()).extension().is_some() {
            DatasetKind::File
        } else {
            DatasetKind::Directory
        }
    }

    /// Looks up a dataset by key within one layer.
    pub fn from_key(layer: Layer, key: &str) -> Result<Self> {
        let wanted = key.trim();
        layer
            .datasets()
            .find(|d| d.key() == wanted)
            .ok_or_else(|| RegistryError::UnknownDataset {
                layer,
                name: key.to_string(),
            })
    }

    /// Path of this dataset relative to the data root.
    pub fn relative_path(self) -> PathBuf {
        Path::new(self.layer().segment()).join(self.segment())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layer(), self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layer_parse() {
        assert_eq!("raw".parse::<Layer>().unwrap(), Layer::Raw);
        assert_eq!("Trusted".parse::<Layer>().unwrap(), Layer::Trusted);
        assert!(matches!(
            "refined".parse::<Layer>(),
            Err(RegistryError::UnknownLayer(name)) if name == "refined"
        ));
    }

    #[test]
    fn test_every_dataset_belongs_to_one_layer() {
        let raw: Vec<_> = Layer::Raw.datasets().collect();
        let trusted: Vec<_> = Layer::Trusted.datasets().collect();
        assert_eq!(raw.len(), 6);
        assert_eq!(trusted.len(), 6);
        assert_eq!(raw.len() + trusted.len(), Dataset::ALL.len());
    }

    #[test]
    fn test_keys_unique_per_layer() {
        for layer in Layer::ALL {
            let keys: HashSet<_> = layer.datasets().map(Dataset::key).collect();
            assert_eq!(keys.len(), layer.datasets().count(), "duplicate key in {layer}");
        }
    }

    #[test]
    fn test_relative_paths_distinct() {
        let rel: HashSet<_> = Dataset::ALL.iter().map(|d| d.relative_path()).collect();
        assert_eq!(rel.len(), Dataset::ALL.len());
    }

    #[test]
    fn test_from_key_is_layer_scoped() {
        assert_eq!(Dataset::from_key(Layer::Raw, "counties").unwrap(), Dataset::RawCounties);
        assert_eq!(Dataset::from_key(Layer::Trusted, "counties").unwrap(), Dataset::Counties);
        assert_eq!(Dataset::from_key(Layer::Raw, "deter").unwrap(), Dataset::Deter);

        let err = Dataset::from_key(Layer::Trusted, "deter").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownDataset { layer: Layer::Trusted, .. }));
        assert_eq!(err.to_string(), "unknown dataset 'deter' in trusted layer");
    }

    #[test]
    fn test_kind_follows_extension() {
        assert_eq!(Dataset::Deforestation.kind(), DatasetKind::File);
        assert_eq!(Dataset::FramesIdx.kind(), DatasetKind::File);
        assert_eq!(Dataset::Frames.kind(), DatasetKind::Directory);
        assert_eq!(Dataset::Deter.kind(), DatasetKind::Directory);
        assert!(Layer::Raw.datasets().all(|d| d.kind() == DatasetKind::Directory));
    }

    #[test]
    fn test_display() {
        assert_eq!(Dataset::FramesIdx.to_string(), "trusted/frames_idx");
        assert_eq!(Dataset::RawRainfall.to_string(), "raw/rainfall");
    }
}
