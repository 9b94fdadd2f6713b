//! Depth smoothing strategies and the boundary blending pass.
use super::features::FeatureMaps;
use crate::filters::{apply_adaptive, GaussianFilter};
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

pub trait SmoothingStrategy {
    fn name(&self) -> &'static str;
    fn smooth(&self, raw: &ImageF32, features: &FeatureMaps) -> ImageF32;
}

/// Fixed-sigma separable Gaussian, radius `ceil(3σ)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianSmoothing {
    pub sigma: f32,
}

impl Default for GaussianSmoothing {
    fn default() -> Self {
        Self { sigma: 2.2 }
    }
}

impl SmoothingStrategy for GaussianSmoothing {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn smooth(&self, raw: &ImageF32, _features: &FeatureMaps) -> ImageF32 {
        GaussianFilter::new(self.sigma).apply(raw)
    }
}

/// Edge-adaptive Gaussian: sigma falls linearly from `sigma_max` on flat
/// regions to `sigma_min` where the Sobel magnitude reaches `edge_norm`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSmoothing {
    pub sigma_min: f32,
    pub sigma_max: f32,
    pub edge_norm: f32,
}

impl Default for AdaptiveSmoothing {
    fn default() -> Self {
        Self {
            sigma_min: 0.8,
            sigma_max: 3.0,
            edge_norm: 160.0,
        }
    }
}

impl AdaptiveSmoothing {
    pub fn sigma_map(&self, features: &FeatureMaps) -> ImageF32 {
        let mag = &features.grad.mag;
        let norm = self.edge_norm.max(f32::EPSILON);
        let (lo, hi) = (self.sigma_min.min(self.sigma_max), self.sigma_max.max(self.sigma_min));
        ImageF32::from_fn(mag.w, mag.h, |x, y| {
            let t = (mag.get(x, y) / norm).clamp(0.0, 1.0);
            hi - (hi - lo) * t
        })
    }
}

impl SmoothingStrategy for AdaptiveSmoothing {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn smooth(&self, raw: &ImageF32, features: &FeatureMaps) -> ImageF32 {
        apply_adaptive(raw, &self.sigma_map(features))
    }
}

/// Re-average each interior pixel with its left and right neighbours where
/// `|d − d₋₁| + |d − d₊₁|` exceeds `threshold`. Reads the input only, so
/// the result does not depend on scan order. The outer rows and columns are
/// copied through.
pub fn blend_boundaries(src: &ImageF32, threshold: f32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut out = src.clone();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        let row = src.row(y);
        let dst = out.row_mut(y);
        for x in 1..w - 1 {
            let (l, c, r) = (row[x - 1], row[x], row[x + 1]);
            if (c - l).abs() + (c - r).abs() > threshold {
                dst[x] = (l + c + r) / 3.0;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    #[test]
    fn blend_softens_spikes_only() {
        let mut img = ImageF32::filled(7, 5, 100.0);
        img.set(3, 2, 160.0);
        img.set(1, 1, 105.0);
        let out = blend_boundaries(&img, 20.0);
        assert!((out.get(3, 2) - 120.0).abs() < 1e-4);
        assert_eq!(out.get(1, 1), 105.0);
        assert_eq!(out.get(3, 1), 100.0);
    }

    #[test]
    fn adaptive_sigma_is_sharper_on_edges() {
        let img = synthetic::disk_on_background(40, 40, (20.0, 20.0), 8.0, [255, 255, 255], [0, 0, 0]);
        let features = FeatureMaps::compute(&img);
        let sigma = AdaptiveSmoothing::default().sigma_map(&features);
        assert!((sigma.get(2, 2) - 3.0).abs() < 1e-6);
        assert!((sigma.get(20, 12) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn strategies_preserve_constant_maps() {
        let img = synthetic::uniform(16, 12, [10, 10, 10]);
        let features = FeatureMaps::compute(&img);
        let raw = ImageF32::filled(16, 12, 77.0);
        for s in [&GaussianSmoothing::default() as &dyn SmoothingStrategy, &AdaptiveSmoothing::default()] {
            let out = s.smooth(&raw, &features);
            assert!(out.data.iter().all(|v| (v - 77.0).abs() < 1e-3), "{}", s.name());
        }
    }
}
