//! Terrain mesh generation for the renderer.
//!
//! Converts a [`HeightField`] plus its [`AppearanceDescriptor`] into a Bevy
//! [`Mesh`] with:
//! - `TriangleList` topology, split along the same cell diagonal the height
//!   query uses, so the rendered surface is exactly the queried surface
//! - Smooth per-vertex normals (area-weighted average of adjacent face normals)
//! - UV coordinates spanning `[0, 1]²` over the whole grid
//! - Per-vertex colors taken from the appearance

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::appearance::AppearanceDescriptor;
use crate::heightfield::HeightField;

/// Converts a [`HeightField`] into a Bevy [`Mesh`].
///
/// The mesh covers the height field's world extent in the XY plane,
/// `[x_min, x_min + (cols-1)*res] × [y_min, y_min + (rows-1)*res]`, with
/// heights along +Z. Vertex `(col, row)` has index `row * cols + col`.
///
/// # UV Mapping
///
/// UVs stretch once over the grid: `u = col / (cols - 1)`,
/// `v = row / (rows - 1)`, so vertex `(0, 0)` maps to `(0, 0)` and the far
/// corner to `(1, 1)`.
///
/// # Example
///
/// ```ignore
/// use bevy_elevation_map::{AppearanceDescriptor, ElevationSamples, HeightField, TerrainMeshBuilder};
///
/// let samples = ElevationSamples::filled(64, 64, 0.5);
/// let field = HeightField::from_normalized(&samples, 0.0, 4.0, 1.0)?;
/// let mesh = TerrainMeshBuilder::new()
///     .build(&field, &AppearanceDescriptor::Constant([128, 128, 128, 255]));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TerrainMeshBuilder;

impl TerrainMeshBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the mesh.
    ///
    /// Produces a `TriangleList` mesh with positions, normals, UV_0 and
    /// vertex colors.
    ///
    /// # Panics
    ///
    /// Panics if a [`AppearanceDescriptor::VertexColors`] grid does not match
    /// the height field's dimensions or does not hold one color per vertex.
    pub fn build(&self, heightfield: &HeightField, appearance: &AppearanceDescriptor) -> Mesh {
        let w = heightfield.cols();
        let h = heightfield.rows();
        let s = heightfield.resolution() as f32;
        let x0 = heightfield.x_min() as f32;
        let y0 = heightfield.y_min() as f32;

        if let AppearanceDescriptor::VertexColors { cols, rows, colors } = appearance {
            assert!(
                *cols == w && *rows == h,
                "appearance is {cols}×{rows} but the height field is {w}×{h}"
            );
            assert!(
                colors.len() == w * h,
                "appearance holds {} colors for a {w}×{h} grid",
                colors.len()
            );
        }

        let vertex_count = w * h;
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
        let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

        let (u_span, v_span) = ((w - 1) as f32, (h - 1) as f32);
        for row in 0..h {
            for col in 0..w {
                let x = x0 + col as f32 * s;
                let y = y0 + row as f32 * s;
                positions.push([x, y, heightfield.sample(col, row)]);
                uvs.push([col as f32 / u_span, row as f32 / v_span]);
            }
        }

        // CCW seen from +Z. Each cell splits along p00→p11:
        //   p01──p11
        //   │  ╱ │     Upper: p00, p11, p01
        //   │ ╱  │     Lower: p00, p10, p11
        //   p00──p10
        let quad_count = (w - 1) * (h - 1);
        let mut indices: Vec<u32> = Vec::with_capacity(quad_count * 6);

        for row in 0..(h - 1) {
            for col in 0..(w - 1) {
                let p00 = (row * w + col) as u32;
                let p10 = (row * w + col + 1) as u32;
                let p01 = ((row + 1) * w + col) as u32;
                let p11 = ((row + 1) * w + col + 1) as u32;

                indices.extend_from_slice(&[p00, p10, p11]);
                indices.extend_from_slice(&[p00, p11, p01]);
            }
        }

        // Unnormalized face normals are proportional to triangle area, so
        // summing them per vertex gives area weighting for free.
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; vertex_count];

        for tri in indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(positions[i0]);
            let p1 = Vec3::from(positions[i1]);
            let p2 = Vec3::from(positions[i2]);
            let face_normal = (p1 - p0).cross(p2 - p0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        let normals: Vec<[f32; 3]> = normals
            .iter()
            .map(|n| {
                let len = n.length();
                if len > f32::EPSILON { (*n / len).into() } else { [0.0, 0.0, 1.0] }
            })
            .collect();

        let colors = appearance.linear_vertex_colors(w, h);

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh.insert_indices(Indices::U32(indices));
        mesh
    }
}
