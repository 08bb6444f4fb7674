use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::geom::Point;
use crate::image::RgbImageView;
use crate::line::bresenham;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-channel intensities along a sampled segment, stored as parallel
/// sequences indexed by distance from the starting endpoint.
///
/// `distance[i]` is always `i`; it is materialised so the table serialises
/// as the five-column shape downstream consumers expect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    pub distance: Vec<u32>,
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
    /// Arithmetic mean `(r + g + b) / 3.0` per sample, unrounded.
    pub average: Vec<f64>,
}

impl ProfileTable {
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// `(index, red, green, blue, average)` row at `i`.
    pub fn row(&self, i: usize) -> (u32, u8, u8, u8, f64) {
        (
            self.distance[i],
            self.red[i],
            self.green[i],
            self.blue[i],
            self.average[i],
        )
    }
}

/// Sample per-channel intensities along the rasterized segment `p1..=p2`.
///
/// Both endpoints are validated against the image extent before any pixel
/// is read; every coordinate Bresenham enumerates between two in-bounds
/// endpoints is itself in bounds, so a failed lookup past validation would
/// indicate a rasterizer bug rather than bad input.
///
/// Pure function of its inputs; the view is never mutated.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img), fields(width = img.width(), height = img.height()))
)]
pub fn sample_line(
    img: &RgbImageView<'_>,
    p1: Point,
    p2: Point,
) -> Result<ProfileTable, ProfileError> {
    for p in [p1, p2] {
        if !img.contains(p.x, p.y) {
            return Err(ProfileError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: img.width(),
                height: img.height(),
            });
        }
    }

    let path = bresenham(p1, p2);
    let n = path.len();
    let mut red = Vec::with_capacity(n);
    let mut green = Vec::with_capacity(n);
    let mut blue = Vec::with_capacity(n);
    let mut average = Vec::with_capacity(n);

    for p in path {
        let px = img.rgb_at(p.x, p.y)?;
        red.push(px.r);
        green.push(px.g);
        blue.push(px.b);
        average.push((px.r as f64 + px.g as f64 + px.b as f64) / 3.0);
    }

    log::debug!(
        "sampled {} points along ({}, {}) -> ({}, {})",
        red.len(),
        p1.x,
        p1.y,
        p2.x,
        p2.y
    );

    Ok(ProfileTable {
        distance: (0..red.len() as u32).collect(),
        red,
        green,
        blue,
        average,
    })
}
