//! End-to-end analysis pipeline: load, sample, export, render, annotate.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use line_profile_core::{sample_line, ChannelOrder, ProfileError, ProfileTable, RgbImageView};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::annotate::annotate;
use crate::chart::{render_histograms, render_line_plots};
use crate::config::AnalyzeConfig;
use crate::error::{AnalyzeError, ConfigIoError};
use crate::export::write_csv;

/// Wrap a decoded `image::RgbImage` in the core sampling view.
pub fn rgb_view(img: &RgbImage) -> Result<RgbImageView<'_>, ProfileError> {
    RgbImageView::new(
        img.width() as usize,
        img.height() as usize,
        ChannelOrder::Rgb,
        img.as_raw(),
    )
}

/// Summary of a completed analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeReport {
    pub image_path: PathBuf,
    pub image_name: String,
    pub width: u32,
    pub height: u32,
    pub samples: usize,
    pub csv: PathBuf,
    pub plots: PathBuf,
    pub histograms: PathBuf,
    pub annotated: Vec<PathBuf>,
}

impl AnalyzeReport {
    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn load_rgb(path: &Path) -> Result<RgbImage, AnalyzeError> {
    let img = image::open(path).map_err(|source| AnalyzeError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Run the full analysis described by `cfg`.
///
/// Sequential and blocking; the first failing step aborts the run. The
/// annotated copies are produced from the untouched decoded buffer after
/// sampling and export have completed, so the profile never observes
/// overlay pixels.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cfg), fields(image = %cfg.image_path.display()))
)]
pub fn analyze(cfg: &AnalyzeConfig) -> Result<AnalyzeReport, AnalyzeError> {
    let out_dir = cfg.output_dir();
    fs::create_dir_all(&out_dir).map_err(|source| AnalyzeError::OutputWrite {
        path: out_dir.clone(),
        source,
    })?;

    let img = load_rgb(&cfg.image_path)?;
    log::info!(
        "loaded {} ({}x{})",
        cfg.image_path.display(),
        img.width(),
        img.height()
    );

    let table = sample_profile(&img, cfg)?;

    let csv = out_dir.join("RGB_Channels.csv");
    write_csv(&table, &csv)?;
    log::info!("wrote {} samples to {}", table.len(), csv.display());

    let plots = out_dir.join("plots.png");
    render_line_plots(&table, &plots)?;

    let histograms = out_dir.join("histograms.png");
    render_histograms(&table, cfg.histogram_bins, &histograms)?;

    let annotated_images = annotate(&img, cfg.p1, cfg.p2, cfg.line_thickness, cfg.overlay_shade);
    let annotated = annotated_images.save(&out_dir)?;

    if cfg.show {
        show_previews(&annotated_images)?;
    }

    Ok(AnalyzeReport {
        image_path: cfg.image_path.clone(),
        image_name: cfg.image_name(),
        width: img.width(),
        height: img.height(),
        samples: table.len(),
        csv,
        plots,
        histograms,
        annotated,
    })
}

/// Sample the configured segment from a decoded image.
pub fn sample_profile(img: &RgbImage, cfg: &AnalyzeConfig) -> Result<ProfileTable, AnalyzeError> {
    let view = rgb_view(img)?;
    Ok(sample_line(&view, cfg.p1, cfg.p2)?)
}

#[cfg(feature = "display")]
fn show_previews(images: &crate::annotate::AnnotatedImages) -> Result<(), AnalyzeError> {
    crate::display::show_blocking(images)
}

#[cfg(not(feature = "display"))]
fn show_previews(_images: &crate::annotate::AnnotatedImages) -> Result<(), AnalyzeError> {
    log::warn!("show requested but this build has no `display` feature; skipping previews");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{rgb_view, sample_profile};
    use crate::config::AnalyzeConfig;
    use image::{Rgb, RgbImage};
    use line_profile_core::Point;

    #[test]
    fn view_matches_decoded_pixels() {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8, y as u8, 9]));
        let view = rgb_view(&img).unwrap();
        let px = view.rgb_at(2, 1).unwrap();
        assert_eq!((px.r, px.g, px.b), (2, 1, 9));
    }

    #[test]
    fn sampling_respects_config_endpoints() {
        let img = RgbImage::from_fn(8, 8, |x, _| Rgb([x as u8, 0, 0]));
        let cfg = AnalyzeConfig::new("unused.png", Point::new(1, 2), Point::new(6, 2));
        let table = sample_profile(&img, &cfg).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.red, vec![1, 2, 3, 4, 5, 6]);
    }
}
