//! Elevation and appearance sources read from disk.
//!
//! Images are decoded with the `image` crate. Image row 0 is the top of the
//! picture, so rows are flipped on load: the top of the image ends up at +Y,
//! which keeps a map upright when viewed from above along -Z.

use std::path::Path;

use crate::appearance::AppearanceImage;
use crate::error::{ElevationMapError, Result};
use crate::heightfield::ElevationSamples;

/// Loads a grayscale elevation image normalized to `[0, 1]`.
///
/// Color images are converted to luma first. 8- and 16-bit inputs both map
/// black to `0.0` and white to `1.0`.
pub fn load_elevation_image(path: impl AsRef<Path>) -> Result<ElevationSamples> {
    let path = path.as_ref();
    let gray = image::open(path)
        .map_err(|source| ElevationMapError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma16();

    let (width, height) = (gray.width(), gray.height());
    Ok(ElevationSamples::from_fn(
        width as usize,
        height as usize,
        |col, row| {
            let px = gray.get_pixel(col as u32, height - 1 - row as u32);
            f32::from(px.0[0]) / f32::from(u16::MAX)
        },
    ))
}

/// Loads an RGBA8 appearance image in grid order.
pub fn load_appearance_image(path: impl AsRef<Path>) -> Result<AppearanceImage> {
    let path = path.as_ref();
    let rgba = image::open(path)
        .map_err(|source| ElevationMapError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    let (width, height) = (rgba.width(), rgba.height());
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in (0..height).rev() {
        for x in 0..width {
            pixels.push(rgba.get_pixel(x, y).0);
        }
    }
    AppearanceImage::new(width as usize, height as usize, pixels)
}

/// Loads a text matrix of world-unit elevations.
///
/// One grid row per line, values separated by whitespace or commas. The first
/// data line is row 0 (lowest Y). Blank lines and lines starting with `#` or
/// `%` are skipped. `NaN` and infinities are rejected.
pub fn load_elevation_matrix(path: impl AsRef<Path>) -> Result<ElevationSamples> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ElevationMapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_elevation_matrix(&text).map_err(|(line, message)| ElevationMapError::MatrixParse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

fn parse_elevation_matrix(text: &str) -> std::result::Result<ElevationSamples, (usize, String)> {
    let mut cols = None;
    let mut rows = 0;
    let mut data = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }

        let before = data.len();
        for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let value: f32 = token
                .parse()
                .map_err(|_| (line_no, format!("not a number: {token:?}")))?;
            if !value.is_finite() {
                return Err((line_no, format!("non-finite value: {token:?}")));
            }
            data.push(value);
        }

        let width = data.len() - before;
        if width == 0 {
            return Err((line_no, "row has no values".to_string()));
        }
        match cols {
            None => cols = Some(width),
            Some(c) if c != width => {
                return Err((line_no, format!("expected {c} values, found {width}")));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.ok_or((1, "matrix has no values".to_string()))?;
    ElevationSamples::new(cols, rows, data).map_err(|e| (1, e.to_string()))
}
