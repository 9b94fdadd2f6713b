//! Owned RGBA8 pixel buffer, the crate's interchange format for colour
//! images (source photos and rendered frames alike).
use super::f32::ImageF32;
use crate::error::{ensure_non_empty, Error, Result};
use image::{imageops, imageops::FilterType, RgbaImage};

/// Row-major RGBA samples, four bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = vec![0u8; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA bytes; the length must be exactly `width * height * 4`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// RGB channels as floats on the 0–255 scale.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
        let i = self.offset(x, y);
        [
            self.data[i] as f32,
            self.data[i + 1] as f32,
            self.data[i + 2] as f32,
        ]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width * 4;
        &self.data[start..start + self.width * 4]
    }

    /// Mean-of-RGB luminance on the 0–255 scale.
    pub fn to_gray(&self) -> ImageF32 {
        let data = self
            .data
            .chunks_exact(4)
            .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0)
            .collect();
        ImageF32 {
            w: self.width,
            h: self.height,
            data,
        }
    }

    /// Resample to `width × height` with a triangle filter.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self> {
        ensure_non_empty(self.width, self.height)?;
        ensure_non_empty(width, height)?;
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let src = self.to_rgba_image().ok_or(Error::BufferSize {
            width: self.width,
            height: self.height,
            expected: self.width * self.height * 4,
            actual: self.data.len(),
        })?;
        let out = imageops::resize(&src, width as u32, height as u32, FilterType::Triangle);
        Ok(Self::from_rgba_image(out))
    }

    /// Downscale (preserving aspect ratio) so the pixel count stays within
    /// `max_pixels`. Smaller images are returned unchanged.
    pub fn fit_within(&self, max_pixels: usize) -> Result<Self> {
        ensure_non_empty(self.width, self.height)?;
        let count = self.pixel_count();
        if max_pixels == 0 || count <= max_pixels {
            return Ok(self.clone());
        }
        let scale = (max_pixels as f64 / count as f64).sqrt();
        let w = ((self.width as f64 * scale).floor() as usize).max(1);
        let h = ((self.height as f64 * scale).floor() as usize).max(1);
        self.resized(w, h)
    }
}
