//! Core types and sampling routines for line intensity profiles.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! depend on any concrete image codec or plotting backend: callers hand it
//! a borrowed view over an interleaved pixel buffer and get back a
//! [`ProfileTable`] of per-channel intensities along a rasterized segment.

mod error;
mod geom;
mod image;
mod line;
mod logger;
mod profile;

pub use error::ProfileError;
pub use geom::Point;
pub use image::{ChannelOrder, Rgb, RgbImageView};
pub use line::{bresenham, Bresenham};
pub use profile::{sample_line, ProfileTable};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
