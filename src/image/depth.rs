//! Single-channel depth buffer: 0 = far, 255 = near.
//!
//! One buffer belongs to exactly one source image at a fixed resolution. The
//! producer (`DepthEstimator`) clamps into range when converting from the
//! float working buffer; consumers still clamp on lookup because buffers may
//! also come from untrusted callers via [`DepthBuffer::from_raw`].
use super::f32::ImageF32;
use super::mask::SubjectMask;
use super::rgba::PixelBuffer;
use super::traits::ImageView;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthBuffer {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl DepthBuffer {
    pub fn filled(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self> {
        let expected = w * h;
        if data.len() != expected {
            return Err(Error::BufferSize {
                width: w,
                height: h,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Round and clamp a float depth field into the 8-bit range. NaN maps to 0.
    pub fn from_f32_clamped(src: &ImageF32) -> Self {
        let data = src
            .data
            .iter()
            .map(|&v| if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 })
            .collect();
        Self {
            w: src.w,
            h: src.h,
            data,
        }
    }

    /// Read back a depth image stored as the red channel of an RGBA buffer.
    pub fn from_rgba(img: &PixelBuffer) -> Self {
        let data = img.data().chunks_exact(4).map(|px| px[0]).collect();
        Self {
            w: img.width(),
            h: img.height(),
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    /// Depth in `[0, 1]`.
    #[inline]
    pub fn get_normalized(&self, x: usize, y: usize) -> f32 {
        self.get(x, y) as f32 / 255.0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.w + x] = v;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_f32(&self) -> ImageF32 {
        ImageF32 {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Grayscale, fully opaque RGBA rendition (all three channels equal).
    pub fn to_rgba(&self) -> PixelBuffer {
        PixelBuffer::from_fn(self.w, self.h, |x, y| {
            let d = self.get(x, y);
            [d, d, d, 255]
        })
    }

    pub fn min_max(&self) -> Option<(u8, u8)> {
        let lo = self.data.iter().copied().min()?;
        let hi = self.data.iter().copied().max()?;
        Some((lo, hi))
    }

    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().map(|&v| v as f64).sum::<f64>() as f32 / self.data.len() as f32
    }

    /// Mean depth over pixels where `mask == inside`; `None` if there are none.
    pub fn mean_where(&self, mask: &SubjectMask, inside: bool) -> Option<f32> {
        let mut sum = 0.0f64;
        let mut n = 0usize;
        for (&d, &m) in self.data.iter().zip(mask.data()) {
            if m == inside {
                sum += d as f64;
                n += 1;
            }
        }
        (n > 0).then(|| (sum / n as f64) as f32)
    }
}

impl ImageView for DepthBuffer {
    type Pixel = u8;

    fn width(&self) -> usize {
        self.w
    }
    fn height(&self) -> usize {
        self.h
    }
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_conversion_clamps_and_rounds() {
        let src = ImageF32 {
            w: 4,
            h: 1,
            data: vec![-12.0, 127.6, 300.0, f32::NAN],
        };
        let depth = DepthBuffer::from_f32_clamped(&src);
        assert_eq!(depth.data(), &[0, 128, 255, 0]);
    }

    #[test]
    fn rgba_round_trip_keeps_gray_levels() {
        let depth = DepthBuffer::from_raw(2, 1, vec![10, 200]).unwrap();
        let rgba = depth.to_rgba();
        assert_eq!(rgba.get(1, 0), [200, 200, 200, 255]);
        assert_eq!(DepthBuffer::from_rgba(&rgba), depth);
    }
}
