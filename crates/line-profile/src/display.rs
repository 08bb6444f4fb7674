//! Interactive preview windows for the annotated images.
//!
//! Compiled only with the `display` feature. Opens one resizable window per
//! image and blocks until a key is pressed in any of them (or every window
//! is closed), matching the one-shot inspection workflow.

use image::{GrayImage, RgbImage};
use minifb::{Window, WindowOptions};

use crate::annotate::AnnotatedImages;
use crate::error::AnalyzeError;

const WINDOW_WIDTH: usize = 600;
const WINDOW_HEIGHT: usize = 600;

fn rgb_framebuffer(img: &RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}

fn gray_framebuffer(img: &GrayImage) -> Vec<u32> {
    img.pixels()
        .map(|p| {
            let v = p[0] as u32;
            (v << 16) | (v << 8) | v
        })
        .collect()
}

fn open_window(title: &str) -> Result<Window, AnalyzeError> {
    Window::new(
        title,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| AnalyzeError::Display(e.to_string()))
}

/// Show the original and per-channel previews, blocking until a key press.
pub fn show_blocking(images: &AnnotatedImages) -> Result<(), AnalyzeError> {
    let (w, h) = images.original.dimensions();
    let (w, h) = (w as usize, h as usize);

    let panes = [
        ("Original", rgb_framebuffer(&images.original)),
        ("Blue", gray_framebuffer(&images.channels.blue)),
        ("Green", gray_framebuffer(&images.channels.green)),
        ("Red", gray_framebuffer(&images.channels.red)),
    ];

    let mut windows = Vec::with_capacity(panes.len());
    for (title, buffer) in panes {
        let window = open_window(title)?;
        windows.push((window, buffer));
    }

    log::info!("previews open, press any key to close");
    loop {
        let mut any_open = false;
        for (window, buffer) in &mut windows {
            if !window.is_open() {
                continue;
            }
            any_open = true;
            if !window.get_keys_pressed(minifb::KeyRepeat::No).is_empty() {
                return Ok(());
            }
            window
                .update_with_buffer(buffer, w, h)
                .map_err(|e| AnalyzeError::Display(e.to_string()))?;
        }
        if !any_open {
            return Ok(());
        }
    }
}
