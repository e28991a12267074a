//! Bookmark icons and their PNG sidecar files
//!
//! Icons are never embedded in the bookmarks file. On save the largest
//! available raster is written as `icon{folder:02}_{row:02}_{width}.png`
//! next to it and the file path is recorded in the bookmark row instead.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A single decoded raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl IconImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Encode the raster as a PNG file at `path`.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create icon file: {:?}", path))?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .with_context(|| format!("Failed to write PNG header: {:?}", path))?;
        writer
            .write_image_data(&self.rgba)
            .with_context(|| format!("Failed to write PNG data: {:?}", path))?;
        Ok(())
    }
}

/// A bookmark icon: the same artwork at one or more raster sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Icon {
    images: Vec<IconImage>,
}

impl Icon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_image(image: IconImage) -> Self {
        Self {
            images: vec![image],
        }
    }

    pub fn push(&mut self, image: IconImage) {
        self.images.push(image);
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The raster with the greatest pixel width, which is the one persisted.
    pub fn largest(&self) -> Option<&IconImage> {
        self.images.iter().max_by_key(|image| image.width)
    }

    /// Decode a PNG sidecar file into a single-raster icon.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open icon file: {:?}", path))?;
        let mut decoder = png::Decoder::new(file);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .with_context(|| format!("Failed to read PNG header: {:?}", path))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .with_context(|| format!("Failed to decode PNG: {:?}", path))?;
        buf.truncate(info.buffer_size());
        let rgba = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => expand_channels(&buf, 3),
            png::ColorType::GrayscaleAlpha => expand_gray_alpha(&buf),
            png::ColorType::Grayscale => expand_channels(&buf, 1),
            png::ColorType::Indexed => bail!("indexed PNG was not normalized: {path:?}"),
        };
        Ok(Self::from_image(IconImage::new(info.width, info.height, rgba)))
    }
}

/// Deterministic sidecar file name for the icon saved at `(folder, row)`.
pub fn sidecar_file_name(folder: usize, row: usize, width: u32) -> String {
    format!("icon{folder:02}_{row:02}_{width}.png")
}

fn expand_channels(buf: &[u8], channels: usize) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(buf.len() / channels * 4);
    for pixel in buf.chunks_exact(channels) {
        match channels {
            1 => rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], 0xFF]),
            _ => rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 0xFF]),
        }
    }
    rgba
}

fn expand_gray_alpha(buf: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(buf.len() * 2);
    for pixel in buf.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, color: [u8; 4]) -> IconImage {
        let rgba = color
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        IconImage::new(width, height, rgba)
    }

    #[test]
    fn test_sidecar_file_name() {
        assert_eq!(sidecar_file_name(0, 0, 64), "icon00_00_64.png");
        assert_eq!(sidecar_file_name(1, 12, 128), "icon01_12_128.png");
    }

    #[test]
    fn test_largest_picks_widest_raster() {
        let mut icon = Icon::from_image(solid_image(16, 16, [1, 2, 3, 255]));
        icon.push(solid_image(64, 64, [4, 5, 6, 255]));
        icon.push(solid_image(32, 32, [7, 8, 9, 255]));
        assert_eq!(icon.largest().unwrap().width, 64);
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(sidecar_file_name(0, 0, 8));

        let image = solid_image(8, 8, [10, 20, 30, 255]);
        image.write_png(&path).unwrap();

        let loaded = Icon::load(&path).unwrap();
        assert_eq!(loaded.largest().unwrap(), &image);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(Icon::load(Path::new("/nonexistent/icon.png")).is_err());
    }
}
