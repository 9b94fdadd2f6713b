//! Full-image cue maps shared by the scoring and smoothing stages.
use crate::edges::{sobel_gradients, Grad};
use crate::image::{ImageF32, PixelBuffer};
use crate::segmentation::cues::Centrality;

/// Grayscale, Sobel gradients and the centrality helper for one image.
#[derive(Clone, Debug)]
pub struct FeatureMaps {
    /// Mean-of-RGB grayscale on 0–255.
    pub gray: ImageF32,
    pub grad: Grad,
    pub centrality: Centrality,
}

impl FeatureMaps {
    pub fn compute(image: &PixelBuffer) -> Self {
        let gray = image.to_gray();
        let grad = sobel_gradients(&gray);
        Self {
            gray,
            grad,
            centrality: Centrality::new(image.width(), image.height()),
        }
    }

    /// Mean absolute grayscale difference to the 8 neighbours, borders clamped.
    pub fn local_contrast(&self, x: usize, y: usize) -> f32 {
        let (xi, yi) = (x as isize, y as isize);
        let center = self.gray.get(x, y);
        let mut acc = 0.0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                acc += (center - self.gray.get_clamped(xi + dx, yi + dy)).abs();
            }
        }
        acc / 8.0
    }
}

/// Copy the nearest interior value into the 1-pixel border. Images thinner
/// than 3 pixels on either axis have no interior and are left as is.
pub fn fill_border_from_interior(img: &mut ImageF32) {
    let (w, h) = (img.w, img.h);
    if w < 3 || h < 3 {
        return;
    }
    for y in 0..h {
        for x in 0..w {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                let v = img.get(x.clamp(1, w - 2), y.clamp(1, h - 2));
                img.set(x, y, v);
            }
        }
    }
}
