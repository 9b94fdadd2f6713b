//! I/O helpers for the tools: raster decode/encode and JSON reports.
//!
//! - `load_rgba_image`: read a PNG/JPEG into an owned RGBA buffer.
//! - `save_rgba_png`: write a rendered frame to disk.
//! - `save_depth_png`: write a depth buffer as an 8-bit grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The core never touches the filesystem; these sit at the edge for the
//! binaries and for callers that want an export path.
use super::{DepthBuffer, ImageView, PixelBuffer};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to RGBA8.
pub fn load_rgba_image(path: &Path) -> Result<PixelBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    Ok(PixelBuffer::from_rgba_image(img))
}

/// Save an RGBA buffer to a PNG (or any format implied by the extension).
pub fn save_rgba_png(buffer: &PixelBuffer, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = buffer
        .to_rgba_image()
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a depth buffer as a single-channel grayscale PNG.
pub fn save_depth_png(depth: &DepthBuffer, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(
        depth.width() as u32,
        depth.height() as u32,
        depth.data().to_vec(),
    )
    .ok_or_else(|| "Failed to create depth image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    #[test]
    fn png_round_trip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/frame.png");
        let img = synthetic::disk_on_background(32, 24, (16.0, 12.0), 6.0, [250, 200, 40], [20, 20, 25]);
        save_rgba_png(&img, &path).unwrap();
        let loaded = load_rgba_image(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn depth_png_is_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depth.png");
        let depth = DepthBuffer::from_raw(3, 1, vec![0, 128, 255]).unwrap();
        save_depth_png(&depth, &path).unwrap();
        let loaded = load_rgba_image(&path).unwrap();
        assert_eq!(DepthBuffer::from_rgba(&loaded), depth);
    }
}
