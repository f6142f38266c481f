//! Spatial tiling parameters for frame extraction.
//! A frame is a square of `box_side` degrees rendered at
//! `input_box_size` x `input_box_size` pixels.

use serde::Serialize;

use crate::error::{RegistryError, Result};

/// Box side unit in degrees (roughly 1.1 km at the equator)
pub const BASE_UNIT: f64 = 0.01;
pub const BOX_SCALE: f64 = 3.0;
/// Pixel side of a frame fed to the model
pub const INPUT_BOX_SIZE: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpatialParameters {
    box_side: f64,
    input_box_size: u32,
}

impl SpatialParameters {
    /// Builds parameters from a base unit and scale factor (`box_side = base_unit * scale`).
    pub fn new(base_unit: f64, scale: f64, input_box_size: u32) -> Result<Self> {
        for (name, value) in [("base_unit", base_unit), ("box_scale", scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RegistryError::InvalidSpatial { name, value });
            }
        }
        if input_box_size == 0 {
            return Err(RegistryError::InvalidSpatial {
                name: "input_box_size",
                value: 0.0,
            });
        }
        Ok(Self {
            box_side: base_unit * scale,
            input_box_size,
        })
    }

    pub fn box_side(&self) -> f64 {
        self.box_side
    }

    pub fn input_box_size(&self) -> u32 {
        self.input_box_size
    }

    pub fn as_tuple(&self) -> (f64, u32) {
        (self.box_side, self.input_box_size)
    }

    /// Ground resolution of one input pixel, in degrees.
    pub fn degrees_per_pixel(&self) -> f64 {
        self.box_side / f64::from(self.input_box_size)
    }

    /// Square frame of side `box_side` centered on (`lon`, `lat`).
    pub fn frame_around(&self, lon: f64, lat: f64) -> BoundingBox {
        let half = self.box_side / 2.0;
        BoundingBox {
            min_lon: lon - half,
            min_lat: lat - half,
            max_lon: lon + half,
            max_lat: lat + half,
        }
    }
}

impl Default for SpatialParameters {
    fn default() -> Self {
        Self {
            box_side: BASE_UNIT * BOX_SCALE,
            input_box_size: INPUT_BOX_SIZE,
        }
    }
}

/// Axis-aligned lon/lat box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = SpatialParameters::default();
        assert_eq!(params.box_side(), 0.03);
        assert_eq!(params.input_box_size(), 64);
        assert_eq!(params, SpatialParameters::new(0.01, 3.0, 64).unwrap());
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            SpatialParameters::new(0.0, 3.0, 64),
            Err(RegistryError::InvalidSpatial { name: "base_unit", .. })
        ));
        assert!(matches!(
            SpatialParameters::new(0.01, -1.0, 64),
            Err(RegistryError::InvalidSpatial { name: "box_scale", .. })
        ));
        assert!(matches!(
            SpatialParameters::new(0.01, f64::NAN, 64),
            Err(RegistryError::InvalidSpatial { .. })
        ));
        assert!(matches!(
            SpatialParameters::new(0.01, 3.0, 0),
            Err(RegistryError::InvalidSpatial { name: "input_box_size", .. })
        ));
    }

    #[test]
    fn test_frame_around_point() {
        let params = SpatialParameters::default();
        let frame = params.frame_around(-60.0, -3.0);
        assert!((frame.width() - 0.03).abs() < 1e-12);
        assert!((frame.height() - 0.03).abs() < 1e-12);
        assert!(frame.contains(-60.0, -3.0));
        assert!(!frame.contains(-59.9, -3.0));
        assert!((frame.min_lon + 60.015).abs() < 1e-12);
    }

    #[test]
    fn test_degrees_per_pixel() {
        let params = SpatialParameters::default();
        assert!((params.degrees_per_pixel() - 0.03 / 64.0).abs() < f64::EPSILON);
    }
}
