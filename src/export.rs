use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::ColorImage;

/// Write a viewport screenshot to `path` as PNG.
pub fn save_png(image: &ColorImage, path: &Path) -> Result<()> {
    let [width, height] = image.size;
    let bytes: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();

    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .context("screenshot buffer does not match its size")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("Saved {width}x{height} chart to {}", path.display());
    Ok(())
}
