//! Construction and calibration of an elevation map.
//!
//! Turns an elevation source and an optional appearance source into two
//! independent artifacts built from the same samples: the [`HeightField`] used
//! for queries and the [`AppearanceDescriptor`] destined for the renderer.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::appearance::{AppearanceDescriptor, AppearanceImage};
use crate::config::ElevationMapConfig;
use crate::error::{ElevationMapError, Result};
use crate::handoff::{TerrainRenderHandoff, TerrainRenderable};
use crate::heightfield::{ElevationSamples, HeightField};
use crate::loader;
use crate::mesher::TerrainMeshBuilder;

/// Where elevations come from.
#[derive(Debug, Clone)]
pub enum ElevationSource {
    /// In-memory samples normalized to `[0, 1]`, rescaled to the configured range.
    Normalized(ElevationSamples),
    /// In-memory world-unit elevations, used as-is.
    WorldHeights(ElevationSamples),
    /// Grayscale image, normalized then rescaled to the configured range.
    Image(PathBuf),
    /// Text matrix of world-unit elevations.
    Matrix(PathBuf),
}

/// Where per-vertex colors come from.
#[derive(Debug, Clone)]
pub enum AppearanceSource {
    /// In-memory pixels in grid order.
    Pixels(AppearanceImage),
    /// Color image on disk.
    Image(PathBuf),
}

/// A calibrated height field paired with its appearance.
#[derive(Debug, Clone)]
pub struct ElevationMap {
    heightfield: HeightField,
    appearance: AppearanceDescriptor,
    z_order: i32,
}

impl ElevationMap {
    /// Builds the map from explicit sources.
    ///
    /// Scalars (`elevation_image_min_z`, `elevation_image_max_z`,
    /// `resolution`, `mesh_color`, `z_order`) come from `config`; its path
    /// fields are ignored.
    ///
    /// # Errors
    ///
    /// - [`ElevationMapError::MissingElevationSource`] if `source` is `None`.
    /// - [`ElevationMapError::DegenerateRange`] if a normalized source is
    ///   paired with `min_z == max_z`.
    /// - [`ElevationMapError::AppearanceSizeMismatch`] if the appearance image
    ///   is not exactly `cols × rows` pixels.
    /// - Any loader error, unchanged.
    pub fn build(
        source: Option<ElevationSource>,
        appearance: Option<AppearanceSource>,
        config: &ElevationMapConfig,
    ) -> Result<Self> {
        let source = source.ok_or(ElevationMapError::MissingElevationSource)?;
        let min_z = config.elevation_image_min_z;
        let max_z = config.elevation_image_max_z;

        let heightfield = match source {
            ElevationSource::Normalized(samples) => {
                HeightField::from_normalized(&samples, min_z, max_z, config.resolution)?
            }
            ElevationSource::Image(path) => {
                let samples = loader::load_elevation_image(&path)?;
                HeightField::from_normalized(&samples, min_z, max_z, config.resolution)?
            }
            ElevationSource::WorldHeights(samples) => {
                HeightField::from_world_heights(samples, config.resolution)?
            }
            ElevationSource::Matrix(path) => {
                let samples = loader::load_elevation_matrix(&path)?;
                HeightField::from_world_heights(samples, config.resolution)?
            }
        };

        let (cols, rows) = (heightfield.cols(), heightfield.rows());
        let appearance = match appearance {
            Some(AppearanceSource::Pixels(image)) => {
                AppearanceDescriptor::from_image(image, cols, rows)?
            }
            Some(AppearanceSource::Image(path)) => {
                let image = loader::load_appearance_image(&path)?;
                AppearanceDescriptor::from_image(image, cols, rows)?
            }
            None => AppearanceDescriptor::Constant(config.mesh_color_rgba()?),
        };

        info!(
            cols,
            rows,
            resolution = heightfield.resolution(),
            x_range = ?(heightfield.x_min(), heightfield.x_max()),
            y_range = ?(heightfield.y_min(), heightfield.y_max()),
            "elevation map built"
        );

        Ok(Self {
            heightfield,
            appearance,
            z_order: config.z_order,
        })
    }

    /// Builds the map from the sources named in `config`.
    ///
    /// `elevation_image` takes precedence over `elevation_matrix`;
    /// `texture_image` falls back to the constant `mesh_color`.
    pub fn from_config(config: &ElevationMapConfig) -> Result<Self> {
        let source = match (&config.elevation_image, &config.elevation_matrix) {
            (Some(image), _) => Some(ElevationSource::Image(image.clone())),
            (None, Some(matrix)) => Some(ElevationSource::Matrix(matrix.clone())),
            (None, None) => None,
        };
        let appearance = config.texture_image.clone().map(AppearanceSource::Image);
        Self::build(source, appearance, config)
    }

    /// Queryable terrain surface.
    pub fn heightfield(&self) -> &HeightField {
        &self.heightfield
    }

    /// Per-vertex colors of the terrain.
    pub fn appearance(&self) -> &AppearanceDescriptor {
        &self.appearance
    }

    /// Meshes the terrain and splits the map into the query resource and the
    /// one-shot renderer handoff.
    pub fn into_parts(self) -> (HeightField, TerrainRenderHandoff) {
        let mesh = TerrainMeshBuilder::new().build(&self.heightfield, &self.appearance);
        let handoff = TerrainRenderHandoff::new(TerrainRenderable {
            mesh,
            appearance: self.appearance,
            z_order: self.z_order,
        });
        (self.heightfield, handoff)
    }
}
