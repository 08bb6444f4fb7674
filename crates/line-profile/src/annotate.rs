//! Overlay annotation of the analysed image and its channel decompositions.
//!
//! Draws the queried segment plus a circular marker at its starting endpoint
//! onto the original image and the three single-channel grayscale
//! derivatives, then saves all four next to the tabular outputs.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut, Canvas};
use line_profile_core::Point;

use crate::error::AnalyzeError;

/// The three grayscale channel derivatives of an RGB image.
pub struct ChannelImages {
    pub blue: GrayImage,
    pub green: GrayImage,
    pub red: GrayImage,
}

/// Decompose `img` into independent per-channel grayscale grids.
pub fn split_channels(img: &RgbImage) -> ChannelImages {
    let (w, h) = img.dimensions();
    let mut red = GrayImage::new(w, h);
    let mut green = GrayImage::new(w, h);
    let mut blue = GrayImage::new(w, h);
    for (x, y, px) in img.enumerate_pixels() {
        red.put_pixel(x, y, Luma([px[0]]));
        green.put_pixel(x, y, Luma([px[1]]));
        blue.put_pixel(x, y, Luma([px[2]]));
    }
    ChannelImages { blue, green, red }
}

/// Draw the segment `p1..=p2` and a hollow circle at `p1` onto `canvas`.
///
/// Thickness is emulated by repeating the one-pixel primitives at offsets
/// centred on the ideal position: parallel shifts along the minor axis for
/// the line, growing radii for the circle.
pub fn draw_overlay<C: Canvas>(
    canvas: &mut C,
    p1: Point,
    p2: Point,
    thickness: u32,
    color: C::Pixel,
) {
    let thickness = thickness.max(1);
    let shift_y = (p2.x - p1.x).abs() >= (p2.y - p1.y).abs();
    let centre = (thickness - 1) as f32 / 2.0;

    for t in 0..thickness {
        let off = t as f32 - centre;
        let (ox, oy) = if shift_y { (0.0, off) } else { (off, 0.0) };
        draw_line_segment_mut(
            canvas,
            (p1.x as f32 + ox, p1.y as f32 + oy),
            (p2.x as f32 + ox, p2.y as f32 + oy),
            color,
        );
    }

    let base_radius = thickness as i32 + 5;
    for t in 0..thickness as i32 {
        draw_hollow_circle_mut(canvas, (p1.x, p1.y), base_radius + t, color);
    }
}

/// The original image and channel derivatives with overlays applied.
pub struct AnnotatedImages {
    pub original: RgbImage,
    pub channels: ChannelImages,
}

/// Annotate a copy of `img` and its channel splits with the sampled segment.
pub fn annotate(img: &RgbImage, p1: Point, p2: Point, thickness: u32, shade: u8) -> AnnotatedImages {
    let mut original = img.clone();
    let mut channels = split_channels(img);

    draw_overlay(&mut original, p1, p2, thickness, Rgb([shade, shade, shade]));
    draw_overlay(&mut channels.blue, p1, p2, thickness, Luma([shade]));
    draw_overlay(&mut channels.green, p1, p2, thickness, Luma([shade]));
    draw_overlay(&mut channels.red, p1, p2, thickness, Luma([shade]));

    AnnotatedImages { original, channels }
}

fn save_one<P>(img: &image::ImageBuffer<P, Vec<u8>>, path: PathBuf) -> Result<PathBuf, AnalyzeError>
where
    P: image::PixelWithColorType<Subpixel = u8>,
{
    img.save(&path).map_err(|source| AnalyzeError::ImageSave {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote annotated image to {}", path.display());
    Ok(path)
}

impl AnnotatedImages {
    /// Save the four annotated images into `dir` under their fixed names.
    pub fn save(&self, dir: &Path) -> Result<Vec<PathBuf>, AnalyzeError> {
        Ok(vec![
            save_one(&self.original, dir.join("originalImage.png"))?,
            save_one(&self.channels.blue, dir.join("blueChannel.png"))?,
            save_one(&self.channels.green, dir.join("greenChannel.png"))?,
            save_one(&self.channels.red, dir.join("redChannel.png"))?,
        ])
    }
}
