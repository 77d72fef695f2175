//! Height-field terrain for Bevy simulations.
//!
//! Builds an immutable [`HeightField`] from a grid of elevation samples and
//! keeps terrain-following bodies on its surface, one vertical projection per
//! simulation step. The world frame is Z-up: the grid lies in the XY plane,
//! centered on the origin.
//!
//! # Features
//!
//! - **Height queries**: [`HeightField::query`] interpolates barycentrically
//!   over the triangle containing a point, or reports it off-terrain.
//! - **Projection**: [`TerrainProjector`] and the [`project_terrain_followers`]
//!   system overwrite the `z` of bodies inside the grid.
//! - **Construction**: [`ElevationMap`] rescales normalized samples to a
//!   configured range and pairs them with an [`AppearanceDescriptor`].
//! - **Rendering handoff**: [`TerrainMeshBuilder`] meshes the terrain and
//!   [`TerrainRenderHandoff`] gives it to the scene exactly once.
//!
//! # Example
//!
//! ```ignore
//! use bevy_elevation_map::{
//!     ElevationMap, ElevationMapConfig, ElevationSamples, ElevationSource, TerrainProjector,
//! };
//!
//! let config = ElevationMapConfig {
//!     elevation_image_min_z: 0.0,
//!     elevation_image_max_z: 4.0,
//!     ..Default::default()
//! };
//! let samples = ElevationSamples::filled(4, 4, 0.5);
//! let map = ElevationMap::build(Some(ElevationSource::Normalized(samples)), None, &config)?;
//!
//! assert_eq!(map.heightfield().query(0.0, 0.0), Some(2.0));
//!
//! let mut body = Transform::from_xyz(0.2, -0.3, 10.0);
//! TerrainProjector::new(map.heightfield()).step([&mut body]);
//! assert_eq!(body.translation.z, 2.0);
//! ```

pub mod appearance;
pub mod config;
pub mod elevation_map;
pub mod error;
pub mod handoff;
pub mod heightfield;
pub mod loader;
pub mod mesher;
pub mod plugin;
pub mod projector;

pub use appearance::{AppearanceDescriptor, AppearanceImage};
pub use config::{ElevationMapConfig, parse_hex_color};
pub use elevation_map::{AppearanceSource, ElevationMap, ElevationSource};
pub use error::{ElevationMapError, Result};
pub use handoff::{
    BevySceneSink, SceneSink, TerrainRenderHandoff, TerrainRenderable, TerrainZOrder,
    attach_terrain_to_scene,
};
pub use heightfield::{ElevationSamples, HeightField, barycentric_height};
pub use mesher::TerrainMeshBuilder;
pub use plugin::ElevationMapPlugin;
pub use projector::{BodyPose, TerrainFollower, TerrainProjector, project_terrain_followers};
