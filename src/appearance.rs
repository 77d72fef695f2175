//! Static terrain appearance handed to the renderer alongside the mesh.
//!
//! An [`AppearanceDescriptor`] is either one sRGB color per grid vertex, taken
//! from an image whose pixel grid matches the elevation grid exactly, or a
//! single constant color for the whole surface. It plays no part in height
//! queries.

use bevy::color::ColorToComponents;
use bevy::prelude::*;

use crate::error::{ElevationMapError, Result};

/// An RGBA8 image in the crate's grid convention (row-major, rows along +Y).
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl AppearanceImage {
    /// Wraps a row-major pixel buffer. Fails if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(ElevationMapError::SampleCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA pixels, row-major with row 0 at the lowest Y.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }
}

/// Per-vertex appearance of the terrain mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum AppearanceDescriptor {
    /// One sRGB color per grid vertex, row-major with rows along +Y.
    VertexColors {
        /// Grid vertices along X.
        cols: usize,
        /// Grid vertices along Y.
        rows: usize,
        /// `cols * rows` colors; the mesher panics on any other length.
        colors: Vec<[u8; 4]>,
    },
    /// The same sRGB color on every vertex.
    Constant([u8; 4]),
}

impl AppearanceDescriptor {
    /// Pairs an appearance image with a `cols × rows` elevation grid.
    ///
    /// # Errors
    ///
    /// [`ElevationMapError::AppearanceSizeMismatch`] unless the image has
    /// exactly `cols × rows` pixels laid out as `cols` wide and `rows` high.
    /// The image is never cropped or stretched.
    pub fn from_image(image: AppearanceImage, cols: usize, rows: usize) -> Result<Self> {
        if image.width != cols || image.height != rows {
            return Err(ElevationMapError::AppearanceSizeMismatch {
                image_width: image.width,
                image_height: image.height,
                cols,
                rows,
            });
        }
        Ok(Self::VertexColors {
            cols,
            rows,
            colors: image.pixels,
        })
    }

    /// sRGB color of grid vertex `(col, row)`.
    pub fn color_at(&self, col: usize, row: usize) -> [u8; 4] {
        match self {
            Self::VertexColors { cols, colors, .. } => colors[row * cols + col],
            Self::Constant(color) => *color,
        }
    }

    /// Linear-space vertex colors for a `cols × rows` mesh, in vertex order.
    pub fn linear_vertex_colors(&self, cols: usize, rows: usize) -> Vec<[f32; 4]> {
        let mut out = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let [r, g, b, a] = self.color_at(col, row);
                out.push(Color::srgba_u8(r, g, b, a).to_linear().to_f32_array());
            }
        }
        out
    }
}
