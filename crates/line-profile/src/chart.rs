//! Chart rendering for profile tables.
//!
//! Both figures are 2x2 panel grids in the red/green/blue/average panel
//! order, drawn through the plotters bitmap backend into an in-memory RGB
//! buffer and encoded to PNG with the `image` crate. Axis titles are
//! stamped from the `font8x8` glyph set instead of going through plotters'
//! system-font text path, so rendering needs no fontconfig or installed
//! fonts.

use std::path::Path;

use font8x8::legacy::BASIC_LEGACY;
use line_profile_core::ProfileTable;
use plotters::prelude::*;

use crate::error::AnalyzeError;

const FIG_WIDTH: u32 = 900;
const FIG_HEIGHT: u32 = 650;

const PANEL_COLORS: [RGBColor; 4] = [RED, GREEN, BLUE, BLACK];

/// X-axis title shared by all four intensity-vs-distance panels.
pub const DISTANCE_LABEL: &str = "Distance [pixels]";
/// Y-axis title shared by all four histogram panels.
pub const COUNTS_LABEL: &str = "Counts";

/// Per-panel channel title, in the fixed red/green/blue/average panel order.
pub fn channel_label(panel: usize) -> &'static str {
    match panel {
        0 => "Red Channel Intensity",
        1 => "Green Channel Intensity",
        2 => "Blue Channel Intensity",
        _ => "Average RGB Intensity",
    }
}

/// `(x title, y title)` of a line-plot panel.
pub fn line_plot_labels(panel: usize) -> (&'static str, &'static str) {
    (DISTANCE_LABEL, channel_label(panel))
}

/// `(x title, y title)` of a histogram panel.
pub fn histogram_labels(panel: usize) -> (&'static str, &'static str) {
    (channel_label(panel), COUNTS_LABEL)
}

fn chart_err<E: std::fmt::Display>(path: &Path, e: E) -> AnalyzeError {
    AnalyzeError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn channel_values(table: &ProfileTable, panel: usize) -> Vec<f64> {
    match panel {
        0 => table.red.iter().map(|&v| v as f64).collect(),
        1 => table.green.iter().map(|&v| v as f64).collect(),
        2 => table.blue.iter().map(|&v| v as f64).collect(),
        _ => table.average.clone(),
    }
}

// Glyph cell height/width in framebuffer pixels.
const GLYPH_SCALE: u32 = 2;
const GLYPH_CELL: u32 = 8 * GLYPH_SCALE;

/// Stamp `text` into an RGB framebuffer at `(x, y)` (top-left corner).
///
/// Non-ASCII characters fall back to `?`. Pixels outside the buffer are
/// clipped.
fn stamp_text(buf: &mut [u8], text: &str, x: u32, y: u32) {
    for (ci, ch) in text.chars().enumerate() {
        let glyph = BASIC_LEGACY
            .get(ch as usize)
            .unwrap_or(&BASIC_LEGACY[b'?' as usize]);
        let gx = x + ci as u32 * GLYPH_CELL;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8u32 {
                if bits >> col & 1 == 0 {
                    continue;
                }
                for sy in 0..GLYPH_SCALE {
                    for sx in 0..GLYPH_SCALE {
                        let px = gx + col * GLYPH_SCALE + sx;
                        let py = y + row as u32 * GLYPH_SCALE + sy;
                        if px < FIG_WIDTH && py < FIG_HEIGHT {
                            let idx = ((py * FIG_WIDTH + px) * 3) as usize;
                            buf[idx..idx + 3].copy_from_slice(&[0, 0, 0]);
                        }
                    }
                }
            }
        }
    }
}

/// Stamp the x title (bottom centre) and y title (top left) of panel
/// `(row, col)` in the 2x2 grid.
fn stamp_panel_labels(buf: &mut [u8], row: u32, col: u32, x_title: &str, y_title: &str) {
    let pw = FIG_WIDTH / 2;
    let ph = FIG_HEIGHT / 2;
    let px0 = col * pw;
    let py0 = row * ph;

    let x_text_w = x_title.chars().count() as u32 * GLYPH_CELL;
    let x_pos = px0 + pw.saturating_sub(x_text_w) / 2;
    stamp_text(buf, x_title, x_pos, py0 + ph - GLYPH_CELL - 2);

    stamp_text(buf, y_title, px0 + 12, py0 + 4);
}

fn encode_png(buf: Vec<u8>, path: &Path) -> Result<(), AnalyzeError> {
    let img = image::RgbImage::from_raw(FIG_WIDTH, FIG_HEIGHT, buf)
        .ok_or_else(|| chart_err(path, "framebuffer length mismatch"))?;
    img.save(path).map_err(|e| chart_err(path, e))
}

/// Render the four intensity-vs-distance line plots to `path`.
pub fn render_line_plots(table: &ProfileTable, path: &Path) -> Result<(), AnalyzeError> {
    let mut buf = vec![0u8; (FIG_WIDTH * FIG_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (FIG_WIDTH, FIG_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_err(path, e))?;

        let x_max = (table.len().saturating_sub(1)).max(1) as f64;
        for (panel, area) in root.split_evenly((2, 2)).into_iter().enumerate() {
            let values = channel_values(table, panel);
            let y_max = values.iter().cloned().fold(1.0_f64, f64::max) * 1.05;

            let mut chart = ChartBuilder::on(&area)
                .margin(10)
                .margin_top(GLYPH_CELL + 8)
                .x_label_area_size(GLYPH_CELL + 6)
                .y_label_area_size(16)
                .build_cartesian_2d(0.0..x_max, 0.0..y_max)
                .map_err(|e| chart_err(path, e))?;

            chart
                .configure_mesh()
                .x_labels(0)
                .y_labels(0)
                .light_line_style(&WHITE.mix(0.0))
                .draw()
                .map_err(|e| chart_err(path, e))?;

            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                    &PANEL_COLORS[panel],
                ))
                .map_err(|e| chart_err(path, e))?;
        }

        root.present().map_err(|e| chart_err(path, e))?;
    }

    for panel in 0..4u32 {
        let (x_title, y_title) = line_plot_labels(panel as usize);
        stamp_panel_labels(&mut buf, panel / 2, panel % 2, x_title, y_title);
    }

    encode_png(buf, path)?;
    log::info!("wrote line plots to {}", path.display());
    Ok(())
}

/// Histogram bin counts of `values` over its own value range.
///
/// Degenerate ranges (all samples equal) collapse into the first bin.
fn bin_counts(values: &[f64], bins: usize) -> (f64, f64, Vec<usize>) {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if !lo.is_finite() {
        (0.0, 1.0)
    } else if hi <= lo {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    };

    let mut counts = vec![0usize; bins];
    let width = (hi - lo) / bins as f64;
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (lo, hi, counts)
}

/// Render the four per-channel value histograms to `path`.
pub fn render_histograms(
    table: &ProfileTable,
    bins: usize,
    path: &Path,
) -> Result<(), AnalyzeError> {
    let bins = bins.max(1);
    let mut buf = vec![0u8; (FIG_WIDTH * FIG_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (FIG_WIDTH, FIG_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_err(path, e))?;

        for (panel, area) in root.split_evenly((2, 2)).into_iter().enumerate() {
            let values = channel_values(table, panel);
            let (lo, hi, counts) = bin_counts(&values, bins);
            let y_max = counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.05;
            let bin_width = (hi - lo) / bins as f64;

            let mut chart = ChartBuilder::on(&area)
                .margin(10)
                .margin_top(GLYPH_CELL + 8)
                .x_label_area_size(GLYPH_CELL + 6)
                .y_label_area_size(16)
                .build_cartesian_2d(lo..hi, 0.0..y_max)
                .map_err(|e| chart_err(path, e))?;

            chart
                .configure_mesh()
                .x_labels(0)
                .y_labels(0)
                .light_line_style(&WHITE.mix(0.0))
                .draw()
                .map_err(|e| chart_err(path, e))?;

            chart
                .draw_series(counts.iter().enumerate().filter(|(_, &c)| c > 0).map(
                    |(i, &c)| {
                        let x0 = lo + i as f64 * bin_width;
                        Rectangle::new(
                            [(x0, 0.0), (x0 + bin_width, c as f64)],
                            PANEL_COLORS[panel].filled(),
                        )
                    },
                ))
                .map_err(|e| chart_err(path, e))?;
        }

        root.present().map_err(|e| chart_err(path, e))?;
    }

    for panel in 0..4u32 {
        let (x_title, y_title) = histogram_labels(panel as usize);
        stamp_panel_labels(&mut buf, panel / 2, panel % 2, x_title, y_title);
    }

    encode_png(buf, path)?;
    log::info!("wrote histograms to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        bin_counts, histogram_labels, line_plot_labels, render_histograms, render_line_plots,
        stamp_text, FIG_HEIGHT, FIG_WIDTH, GLYPH_CELL,
    };
    use line_profile_core::ProfileTable;

    fn ramp_table(n: usize) -> ProfileTable {
        let red: Vec<u8> = (0..n).map(|i| (i % 256) as u8).collect();
        let average = red.iter().map(|&r| r as f64).collect();
        ProfileTable {
            distance: (0..n as u32).collect(),
            green: red.clone(),
            blue: red.clone(),
            red,
            average,
        }
    }

    #[test]
    fn bin_counts_cover_every_sample() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let (lo, hi, counts) = bin_counts(&values, 10);
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 99.0);
        assert_eq!(counts.iter().sum::<usize>(), 100);
    }

    #[test]
    fn constant_values_collapse_into_one_bin() {
        let values = vec![7.0; 12];
        let (_, _, counts) = bin_counts(&values, 8);
        assert_eq!(counts[0], 12);
        assert_eq!(counts.iter().sum::<usize>(), 12);
    }

    #[test]
    fn panel_titles_match_the_figure_layout() {
        assert_eq!(line_plot_labels(0), ("Distance [pixels]", "Red Channel Intensity"));
        assert_eq!(line_plot_labels(1), ("Distance [pixels]", "Green Channel Intensity"));
        assert_eq!(line_plot_labels(2), ("Distance [pixels]", "Blue Channel Intensity"));
        assert_eq!(line_plot_labels(3), ("Distance [pixels]", "Average RGB Intensity"));

        assert_eq!(histogram_labels(0), ("Red Channel Intensity", "Counts"));
        assert_eq!(histogram_labels(3), ("Average RGB Intensity", "Counts"));
    }

    #[test]
    fn stamped_text_sets_black_pixels() {
        let mut buf = vec![255u8; (FIG_WIDTH * FIG_HEIGHT * 3) as usize];
        stamp_text(&mut buf, "A", 10, 10);
        let black = buf.chunks(3).filter(|c| *c == [0, 0, 0]).count();
        assert!(black > 0, "glyph left no pixels");

        // Clipping: stamping at the far corner must not panic.
        stamp_text(&mut buf, "edge", FIG_WIDTH - 4, FIG_HEIGHT - 4);
    }

    #[test]
    fn figures_render_to_png_with_axis_titles() {
        let dir = tempfile::tempdir().unwrap();
        let table = ramp_table(64);

        let plots = dir.path().join("plots.png");
        render_line_plots(&table, &plots).unwrap();
        let img = image::open(&plots).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (FIG_WIDTH, FIG_HEIGHT));

        // The x title of the top-left panel sits in the bottom strip of
        // that panel; the stamped glyphs must have left black pixels there.
        let strip_top = FIG_HEIGHT / 2 - GLYPH_CELL - 2;
        let labelled = (strip_top..FIG_HEIGHT / 2)
            .flat_map(|y| (0..FIG_WIDTH / 2).map(move |x| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y).0 == [0, 0, 0]);
        assert!(labelled, "no axis title pixels found in the label strip");

        let hist = dir.path().join("histograms.png");
        render_histograms(&table, 128, &hist).unwrap();
        assert!(hist.exists());

        // Single-sample tables must still produce valid figures.
        let tiny = ramp_table(1);
        render_line_plots(&tiny, &dir.path().join("tiny_plots.png")).unwrap();
        render_histograms(&tiny, 128, &dir.path().join("tiny_hist.png")).unwrap();
    }
}
