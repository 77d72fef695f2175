//! Elevation-map configuration.
//!
//! Mirrors the parameters a world description supplies for a terrain element.
//! Every field has a default, so an empty JSON object is a valid (if
//! source-less) configuration.
//!
//! ```json
//! {
//!     "elevation_image": "assets/terrain.png",
//!     "texture_image": "assets/terrain_color.png",
//!     "elevation_image_min_z": -2.0,
//!     "elevation_image_max_z": 8.0,
//!     "resolution": 0.5,
//!     "mesh_color": "#6b8e23"
//! }
//! ```

use std::path::{Path, PathBuf};

use bevy::color::ColorToPacked;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ElevationMapError, Result};

/// Parameters for building an [`ElevationMap`](crate::ElevationMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElevationMapConfig {
    /// Grayscale image whose normalized intensity becomes elevation.
    #[serde(default)]
    pub elevation_image: Option<PathBuf>,
    /// Text matrix of world-unit elevations. Used when no image is given.
    #[serde(default)]
    pub elevation_matrix: Option<PathBuf>,
    /// Color image with one pixel per grid vertex.
    #[serde(default)]
    pub texture_image: Option<PathBuf>,
    /// Elevation of a black pixel.
    #[serde(default = "default_min_z")]
    pub elevation_image_min_z: f64,
    /// Elevation of a white pixel.
    #[serde(default = "default_max_z")]
    pub elevation_image_max_z: f64,
    /// World units per grid cell edge.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Surface color when no texture image is given.
    #[serde(default = "default_mesh_color")]
    pub mesh_color: String,
    /// Draw order passed to the renderer.
    #[serde(default)]
    pub z_order: i32,
}

fn default_min_z() -> f64 {
    0.0
}

fn default_max_z() -> f64 {
    5.0
}

fn default_resolution() -> f64 {
    1.0
}

fn default_mesh_color() -> String {
    "#808080".to_string()
}

impl Default for ElevationMapConfig {
    fn default() -> Self {
        Self {
            elevation_image: None,
            elevation_matrix: None,
            texture_image: None,
            elevation_image_min_z: default_min_z(),
            elevation_image_max_z: default_max_z(),
            resolution: default_resolution(),
            mesh_color: default_mesh_color(),
            z_order: 0,
        }
    }
}

impl ElevationMapConfig {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file. Relative source paths inside it are
    /// resolved against the file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ElevationMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Makes relative source paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for p in [
            &mut self.elevation_image,
            &mut self.elevation_matrix,
            &mut self.texture_image,
        ]
        .into_iter()
        .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// `mesh_color` as sRGB bytes.
    pub fn mesh_color_rgba(&self) -> Result<[u8; 4]> {
        parse_hex_color(&self.mesh_color)
    }
}

/// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional) into sRGB bytes.
pub fn parse_hex_color(hex: &str) -> Result<[u8; 4]> {
    Srgba::hex(hex.trim())
        .map(|c| c.to_u8_array())
        .map_err(|_| ElevationMapError::InvalidColor(hex.to_string()))
}
