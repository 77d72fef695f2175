//! Bevy plugin wiring the projector and the renderer handoff into an app.

use bevy::prelude::*;

use crate::handoff::{TerrainRenderHandoff, attach_terrain_to_scene};
use crate::heightfield::HeightField;
use crate::projector::project_terrain_followers;

/// Registers the terrain systems.
///
/// - [`project_terrain_followers`] in `FixedPreUpdate`, once per simulation
///   step and ahead of physics, while a [`HeightField`] resource exists.
/// - [`attach_terrain_to_scene`] in `Update` while a [`TerrainRenderHandoff`]
///   resource exists.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_elevation_map::{ElevationMap, ElevationMapConfig, ElevationMapPlugin};
///
/// let config = ElevationMapConfig::from_json_file("assets/terrain.json")?;
/// let (heightfield, handoff) = ElevationMap::from_config(&config)?.into_parts();
///
/// App::new()
///     .add_plugins((DefaultPlugins, ElevationMapPlugin))
///     .insert_resource(heightfield)
///     .insert_resource(handoff)
///     .run();
/// ```
pub struct ElevationMapPlugin;

impl Plugin for ElevationMapPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedPreUpdate,
            project_terrain_followers.run_if(resource_exists::<HeightField>),
        )
        .add_systems(
            Update,
            attach_terrain_to_scene.run_if(resource_exists::<TerrainRenderHandoff>),
        );
    }
}
