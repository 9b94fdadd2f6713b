//! Boolean subject mask produced by segmentation.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectMask {
    w: usize,
    h: usize,
    data: Vec<bool>,
}

impl SubjectMask {
    /// All-background mask.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = v;
    }
    #[inline]
    pub fn get_index(&self, idx: usize) -> bool {
        self.data[idx]
    }
    #[inline]
    pub fn set_index(&mut self, idx: usize, v: bool) {
        self.data[idx] = v;
    }

    /// Number of subject pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Share of subject pixels in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.count() as f32 / self.data.len() as f32
        }
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }
}

impl ImageView for SubjectMask {
    type Pixel = bool;

    fn width(&self) -> usize {
        self.w
    }
    fn height(&self) -> usize {
        self.h
    }
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    fn as_slice(&self) -> Option<&[bool]> {
        Some(&self.data)
    }
}

impl ImageViewMut for SubjectMask {
    fn row_mut(&mut self, y: usize) -> &mut [bool] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
    fn as_mut_slice(&mut self) -> Option<&mut [bool]> {
        Some(&mut self.data)
    }
}
