//! Height-field storage and point queries.
//!
//! A [`HeightField`] is a regular grid of elevations centered on the world
//! origin in the XY plane, with heights along +Z. Each cell is split along the
//! diagonal from its lower-left to its upper-right corner, and heights inside a
//! cell are interpolated barycentrically over the triangle that contains the
//! query point.
//!
//! Grid convention, used by every module in this crate: samples are stored
//! row-major, the row index runs along +Y and the column index along +X. Sample
//! `(col, row)` sits at world `(x_min + col * resolution, y_min + row * resolution)`.

use bevy::math::{Vec2, Vec3};
use bevy::prelude::*;

use crate::error::{ElevationMapError, Result};

/// A `cols × rows` grid of raw `f32` samples, row-major with rows along +Y.
///
/// Used both for normalized image data (`[0, 1]`) and for world-unit
/// elevations; the consumer decides which.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationSamples {
    cols: usize,
    rows: usize,
    data: Vec<f32>,
}

impl ElevationSamples {
    /// Wraps a row-major buffer. Fails if `data.len() != cols * rows`.
    pub fn new(cols: usize, rows: usize, data: Vec<f32>) -> Result<Self> {
        let expected = cols * rows;
        if data.len() != expected {
            return Err(ElevationMapError::SampleCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { cols, rows, data })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(cols: usize, rows: usize, value: f32) -> Self {
        Self {
            cols,
            rows,
            data: vec![value; cols * rows],
        }
    }

    /// Builds a grid by evaluating `f(col, row)` for every sample.
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(col, row));
            }
        }
        Self { cols, rows, data }
    }

    /// Samples per row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Sample at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    pub fn get(&self, col: usize, row: usize) -> f32 {
        assert!(col < self.cols && row < self.rows, "sample ({col}, {row}) out of range");
        self.data[row * self.cols + col]
    }

    /// Row-major sample buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Immutable elevation grid answering interpolated height queries.
///
/// Built once from static terrain data and never mutated afterwards, so it
/// can be shared freely between readers. Inserted into the Bevy world as a
/// resource by [`ElevationMap::into_parts`](crate::ElevationMap::into_parts).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HeightField {
    cols: usize,
    rows: usize,
    resolution: f64,
    x_min: f64,
    y_min: f64,
    heights: Vec<f32>,
}

impl HeightField {
    /// Builds a height field from samples normalized to `[0, 1]`, rescaling
    /// each sample `s` to `min_z + s * (max_z - min_z)`.
    ///
    /// # Errors
    ///
    /// - [`ElevationMapError::DegenerateRange`] if `min_z == max_z` or either
    ///   bound is not finite.
    /// - [`ElevationMapError::InvalidResolution`] if `resolution` is not a
    ///   finite positive number.
    /// - [`ElevationMapError::GridTooSmall`] if the grid is smaller than 2×2.
    /// - [`ElevationMapError::NonFiniteElevation`] if any rescaled sample is
    ///   `NaN` or infinite.
    pub fn from_normalized(
        samples: &ElevationSamples,
        min_z: f64,
        max_z: f64,
        resolution: f64,
    ) -> Result<Self> {
        if min_z == max_z || !min_z.is_finite() || !max_z.is_finite() {
            return Err(ElevationMapError::DegenerateRange { min_z, max_z });
        }
        let span = max_z - min_z;
        let heights = samples
            .as_slice()
            .iter()
            .map(|&s| (min_z + f64::from(s) * span) as f32)
            .collect();
        Self::from_parts(samples.cols(), samples.rows(), heights, resolution)
    }

    /// Builds a height field from samples that are already world-unit
    /// elevations. No rescaling is applied; `NaN` and infinite samples are
    /// rejected with [`ElevationMapError::NonFiniteElevation`].
    pub fn from_world_heights(samples: ElevationSamples, resolution: f64) -> Result<Self> {
        let ElevationSamples { cols, rows, data } = samples;
        Self::from_parts(cols, rows, data, resolution)
    }

    fn from_parts(cols: usize, rows: usize, heights: Vec<f32>, resolution: f64) -> Result<Self> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ElevationMapError::InvalidResolution(resolution));
        }
        if cols < 2 || rows < 2 {
            return Err(ElevationMapError::GridTooSmall { cols, rows });
        }
        if let Some(idx) = heights.iter().position(|z| !z.is_finite()) {
            return Err(ElevationMapError::NonFiniteElevation {
                col: idx % cols,
                row: idx / cols,
            });
        }
        Ok(Self {
            cols,
            rows,
            resolution,
            x_min: -0.5 * cols as f64 * resolution,
            y_min: -0.5 * rows as f64 * resolution,
            heights,
        })
    }

    /// Grid vertices along X.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid vertices along Y.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// World units per cell edge.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// World X of column 0.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// World Y of row 0.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Upper X of the grid extent, `x_min + cols * resolution`.
    pub fn x_max(&self) -> f64 {
        -self.x_min
    }

    /// Upper Y of the grid extent, `y_min + rows * resolution`.
    pub fn y_max(&self) -> f64 {
        -self.y_min
    }

    /// Elevation stored at grid vertex `(col, row)`, in world units.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    pub fn sample(&self, col: usize, row: usize) -> f32 {
        assert!(col < self.cols && row < self.rows, "sample ({col}, {row}) out of range");
        self.heights[row * self.cols + col]
    }

    /// Row-major world-unit elevations.
    pub fn samples(&self) -> &[f32] {
        &self.heights
    }

    /// Whether `query(x, y)` would return a height.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.interior_cell(x, y).is_some()
    }

    /// Interpolated terrain height at world `(x, y)`.
    ///
    /// Returns `None` when the point lies outside the interpolatable region.
    /// The outermost ring of cells is never queryable: the containing cell
    /// `(cx, cy)` must satisfy `1 <= cx <= cols - 2` and `1 <= cy <= rows - 2`.
    ///
    /// # Panics
    ///
    /// Panics if the interpolation triangle is degenerate, which cannot happen
    /// for a height field built through the public constructors.
    pub fn query(&self, x: f64, y: f64) -> Option<f32> {
        let (cx, cy) = self.interior_cell(x, y)?;

        let z00 = self.sample(cx, cy);
        let z01 = self.sample(cx, cy + 1);
        let z10 = self.sample(cx + 1, cy);
        let z11 = self.sample(cx + 1, cy + 1);

        //   p01 ---- p11
        //    |     /  |
        //    |   /    |
        //   p00 ---- p10
        let res = self.resolution as f32;
        let p00 = Vec3::new(0.0, 0.0, z00);
        let p01 = Vec3::new(0.0, res, z01);
        let p10 = Vec3::new(res, 0.0, z10);
        let p11 = Vec3::new(res, res, z11);

        let lx = (x - (self.x_min + cx as f64 * self.resolution)) as f32;
        let ly = (y - (self.y_min + cy as f64 * self.resolution)) as f32;
        let local = Vec2::new(lx, ly);

        let z = if ly >= lx {
            barycentric_height(p00, p01, p11, local)
        } else {
            barycentric_height(p00, p10, p11, local)
        };
        Some(z)
    }

    fn interior_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let cx = ((x - self.x_min) / self.resolution).floor();
        let cy = ((y - self.y_min) / self.resolution).floor();
        if cx < 1.0 || cy < 1.0 || cx > (self.cols - 2) as f64 || cy > (self.rows - 2) as f64 {
            return None;
        }
        Some((cx as usize, cy as usize))
    }
}

/// Height at `q` on the plane through `p1`, `p2`, `p3`, by barycentric weights.
///
/// # Panics
///
/// Panics if the triangle's XY projection is degenerate (`det == 0`).
pub fn barycentric_height(p1: Vec3, p2: Vec3, p3: Vec3, q: Vec2) -> f32 {
    let det = (p2.x - p3.x) * (p1.y - p3.y) + (p3.y - p2.y) * (p1.x - p3.x);
    assert!(
        det != 0.0,
        "degenerate interpolation triangle {p1:?} {p2:?} {p3:?}"
    );

    let l1 = ((p2.x - p3.x) * (q.y - p3.y) + (p3.y - p2.y) * (q.x - p3.x)) / det;
    let l2 = ((p3.x - p1.x) * (q.y - p3.y) + (p1.y - p3.y) * (q.x - p3.x)) / det;
    let l3 = 1.0 - l1 - l2;

    l1 * p1.z + l2 * p2.z + l3 * p3.z
}
