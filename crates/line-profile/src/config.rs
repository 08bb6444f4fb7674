//! JSON configuration for a line-profile analysis run.

use std::fs;
use std::path::{Path, PathBuf};

use line_profile_core::Point;
use serde::{Deserialize, Serialize};

use crate::error::ConfigIoError;

fn default_output_root() -> PathBuf {
    PathBuf::from("Output")
}

fn default_histogram_bins() -> usize {
    128
}

fn default_line_thickness() -> u32 {
    2
}

fn default_overlay_shade() -> u8 {
    255
}

/// Configuration for [`crate::analyze`].
///
/// Output root, overlay thickness and shade, and histogram bin count are
/// explicit fields with documented defaults rather than call-site constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Path of the image to analyse.
    pub image_path: PathBuf,
    /// Starting endpoint of the sampled segment.
    pub p1: Point,
    /// Ending endpoint of the sampled segment.
    pub p2: Point,
    /// Overrides the name of the per-image output subdirectory.
    /// Defaults to the input file's stem.
    #[serde(default)]
    pub image_name: Option<String>,
    /// Directory under which `<image_name>/` is created.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Bin count for the per-channel histograms.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Overlay line thickness in pixels.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,
    /// Intensity of the line and marker overlays.
    #[serde(default = "default_overlay_shade")]
    pub overlay_shade: u8,
    /// Open interactive preview windows after the run.
    #[serde(default)]
    pub show: bool,
}

impl AnalyzeConfig {
    /// Build a config with defaults for everything but the segment.
    pub fn new(image_path: impl Into<PathBuf>, p1: Point, p2: Point) -> Self {
        Self {
            image_path: image_path.into(),
            p1,
            p2,
            image_name: None,
            output_root: default_output_root(),
            histogram_bins: default_histogram_bins(),
            line_thickness: default_line_thickness(),
            overlay_shade: default_overlay_shade(),
            show: false,
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the per-image output directory name.
    pub fn image_name(&self) -> String {
        if let Some(name) = &self.image_name {
            return name.clone();
        }
        self.image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_owned())
    }

    /// `<output_root>/<image_name>`.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(self.image_name())
    }
}
