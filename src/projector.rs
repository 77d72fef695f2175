//! Per-step projection of bodies onto the terrain surface.
//!
//! Once per simulation step, every terrain-following body inside the height
//! field's queryable region gets its `z` replaced by the terrain height at its
//! `(x, y)`. Bodies outside are left exactly as they were; being off-terrain
//! is an ordinary condition, not an error.

use bevy::prelude::*;

use crate::heightfield::HeightField;

/// A pose the projector can read `(x, y)` from and write `z` into.
pub trait BodyPose {
    /// Ground-plane position in world units.
    fn ground_position(&self) -> (f64, f64);

    /// Overwrites the vertical coordinate only.
    fn set_elevation(&mut self, z: f32);
}

impl BodyPose for Transform {
    fn ground_position(&self) -> (f64, f64) {
        (f64::from(self.translation.x), f64::from(self.translation.y))
    }

    fn set_elevation(&mut self, z: f32) {
        self.translation.z = z;
    }
}

/// Marker for entities whose `Transform` is snapped to the terrain each
/// fixed step by [`project_terrain_followers`].
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct TerrainFollower;

/// Writes terrain heights into body poses.
#[derive(Debug, Clone, Copy)]
pub struct TerrainProjector<'a> {
    heightfield: &'a HeightField,
}

impl<'a> TerrainProjector<'a> {
    /// Borrows the height field bodies are projected onto.
    pub fn new(heightfield: &'a HeightField) -> Self {
        Self { heightfield }
    }

    /// Terrain height under a body, or `None` when it is off-terrain.
    pub fn height_under<P: BodyPose + ?Sized>(&self, pose: &P) -> Option<f32> {
        let (x, y) = pose.ground_position();
        self.heightfield.query(x, y)
    }

    /// Projects one body. Returns `false`, leaving the pose untouched, when
    /// the body is off-terrain.
    pub fn project<P: BodyPose + ?Sized>(&self, pose: &mut P) -> bool {
        match self.height_under(pose) {
            Some(z) => {
                pose.set_elevation(z);
                true
            }
            None => false,
        }
    }

    /// Projects every body in order and returns how many were on-terrain.
    pub fn step<'b, P>(&self, bodies: impl IntoIterator<Item = &'b mut P>) -> usize
    where
        P: BodyPose + ?Sized + 'b,
    {
        bodies
            .into_iter()
            .map(|pose| self.project(pose))
            .filter(|&projected| projected)
            .count()
    }
}

/// Bevy system that snaps every [`TerrainFollower`] onto the [`HeightField`].
///
/// Registered in `FixedPreUpdate` by [`ElevationMapPlugin`](crate::ElevationMapPlugin)
/// so it runs once per simulation step before physics.
pub fn project_terrain_followers(
    heightfield: Res<HeightField>,
    mut bodies: Query<&mut Transform, With<TerrainFollower>>,
) {
    let projector = TerrainProjector::new(&heightfield);
    for mut transform in &mut bodies {
        // Deref through `Mut` only on a hit so off-terrain bodies are not
        // flagged as changed.
        if let Some(z) = projector.height_under(&*transform) {
            transform.set_elevation(z);
        }
    }
}
