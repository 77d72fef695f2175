//! Error types for elevation-map construction and loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building an elevation map.
///
/// Every variant is fatal at construction time: no [`HeightField`] is
/// produced. Points outside the queryable region are not errors; see
/// [`HeightField::query`].
///
/// [`HeightField`]: crate::HeightField
/// [`HeightField::query`]: crate::HeightField::query
#[derive(Debug, Error)]
pub enum ElevationMapError {
    /// `min_z == max_z` (or a non-finite bound) leaves the rescale undefined.
    #[error("degenerate elevation range: min_z={min_z}, max_z={max_z}")]
    DegenerateRange {
        /// Lower bound of the requested range.
        min_z: f64,
        /// Upper bound of the requested range.
        max_z: f64,
    },

    /// Neither an elevation image, a matrix, nor in-memory samples were given.
    #[error("no elevation source supplied")]
    MissingElevationSource,

    /// Appearance image does not have exactly one pixel per grid vertex.
    #[error(
        "appearance image is {image_width}x{image_height} but the elevation grid is {cols}x{rows}"
    )]
    AppearanceSizeMismatch {
        /// Appearance image width in pixels.
        image_width: usize,
        /// Appearance image height in pixels.
        image_height: usize,
        /// Elevation grid columns.
        cols: usize,
        /// Elevation grid rows.
        rows: usize,
    },

    /// Grid resolution must be finite and strictly positive.
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(f64),

    /// Interpolation needs at least a 2x2 neighborhood.
    #[error("elevation grid must be at least 2x2 (got {cols}x{rows})")]
    GridTooSmall {
        /// Grid columns.
        cols: usize,
        /// Grid rows.
        rows: usize,
    },

    /// An elevation is `NaN` or infinite.
    #[error("non-finite elevation at grid vertex ({col}, {row})")]
    NonFiniteElevation {
        /// Column of the first offending sample.
        col: usize,
        /// Row of the first offending sample.
        row: usize,
    },

    /// Sample buffer length disagrees with the declared dimensions.
    #[error("expected {expected} samples for the declared grid, got {actual}")]
    SampleCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Length of the buffer supplied.
        actual: usize,
    },

    /// Color string is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?} (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor(String),

    /// Configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Image file could not be read or decoded.
    #[error("cannot read image '{}': {source}", path.display())]
    ImageLoad {
        /// Offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Plain file read failure.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Text elevation matrix is malformed.
    #[error("elevation matrix '{}' line {line}: {message}", path.display())]
    MatrixParse {
        /// Offending file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Result type for elevation-map operations.
pub type Result<T> = std::result::Result<T, ElevationMapError>;
