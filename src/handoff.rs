//! One-shot handoff of the terrain mesh to the renderer.
//!
//! The mesh built at construction time is inserted into the scene on the
//! first render request and never again. The guard lives in
//! [`TerrainRenderHandoff`] itself; once the renderable has been given away the
//! handoff is empty and every later call is a no-op. The [`HeightField`] keeps
//! its own copy of the elevations, independent of the renderer.
//!
//! [`HeightField`]: crate::HeightField

use bevy::prelude::*;

use crate::appearance::AppearanceDescriptor;

/// Everything the renderer receives: the mesh, the appearance it was colored
/// with, and a draw order.
#[derive(Debug, Clone)]
pub struct TerrainRenderable {
    /// Terrain surface built from the height field.
    pub mesh: Mesh,
    /// Colors the mesh was built with.
    pub appearance: AppearanceDescriptor,
    /// Draw order relative to other scene content.
    pub z_order: i32,
}

/// Destination for the terrain renderable.
pub trait SceneSink {
    /// Takes ownership of the renderable and draws it from now on.
    fn insert(&mut self, renderable: TerrainRenderable);
}

/// Draw order of a spawned terrain entity.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TerrainZOrder(pub i32);

/// Holds the renderable until it has been handed to a scene.
#[derive(Resource, Debug)]
pub struct TerrainRenderHandoff {
    pending: Option<TerrainRenderable>,
}

impl TerrainRenderHandoff {
    /// Wraps a renderable that has not yet been attached.
    pub fn new(renderable: TerrainRenderable) -> Self {
        Self {
            pending: Some(renderable),
        }
    }

    /// Whether [`attach_to`](Self::attach_to) has already run.
    pub fn is_attached(&self) -> bool {
        self.pending.is_none()
    }

    /// Inserts the renderable into `sink` on the first call and returns
    /// `true`. Every later call does nothing and returns `false`.
    pub fn attach_to<S: SceneSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        match self.pending.take() {
            Some(renderable) => {
                debug!(z_order = renderable.z_order, "inserting terrain mesh into scene");
                sink.insert(renderable);
                true
            }
            None => false,
        }
    }
}

/// [`SceneSink`] that spawns the terrain as a lit mesh entity.
///
/// Colors come from the mesh's vertex colors, so the material base color is
/// left white.
pub struct BevySceneSink<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl SceneSink for BevySceneSink<'_, '_, '_> {
    fn insert(&mut self, renderable: TerrainRenderable) {
        let TerrainRenderable { mesh, z_order, .. } = renderable;
        let mesh = self.meshes.add(mesh);
        let material = self.materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        });
        self.commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            TerrainZOrder(z_order),
            Name::new("Elevation map"),
        ));
    }
}

/// Bevy system that performs the handoff on its first run.
pub fn attach_terrain_to_scene(
    mut handoff: ResMut<TerrainRenderHandoff>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if handoff.is_attached() {
        return;
    }
    let mut sink = BevySceneSink {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    handoff.attach_to(&mut sink);
}
