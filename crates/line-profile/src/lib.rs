//! Line intensity profile analysis for images.
//!
//! Samples per-channel (red/green/blue) intensities along a straight pixel
//! segment of an image and materialises the results as a CSV table, two
//! multi-panel chart figures, and annotated copies of the image and its
//! channel decompositions.
//!
//! ## Quickstart
//!
//! ```no_run
//! use line_profile::{analyze, AnalyzeConfig};
//! use line_profile_core::Point;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = AnalyzeConfig::new(
//!     "Photos/UnknownThickness/DSL30001.TIF",
//!     Point::new(1454, 627),
//!     Point::new(1548, 772),
//! );
//! let report = analyze(&cfg)?;
//! println!("{} samples -> {}", report.samples, report.csv.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`line_profile_core`] (re-exported as [`core`]): the pure sampling
//!   routine and profile table.
//! - [`config`]: JSON-loadable run configuration.
//! - [`export`] / [`chart`] / [`annotate`]: the three table consumers.
//! - `display` (feature `display`): blocking preview windows.

pub use line_profile_core as core;

pub mod annotate;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;

#[cfg(feature = "display")]
pub mod display;

pub use config::AnalyzeConfig;
pub use error::{AnalyzeError, ConfigIoError};
pub use pipeline::{analyze, rgb_view, sample_profile, AnalyzeReport};
