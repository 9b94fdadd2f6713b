//! Edge-preserving bilateral filter.
//!
//! Each output pixel is the normalised sum of its `(2r+1)²` neighbours
//! weighted by `exp(-d²/2σs²) · exp(-Δ²/2σr²)`, where `d` is the spatial
//! distance and `Δ` the value difference to the centre pixel. Used on depth
//! maps (values 0–255) to soften stair-stepping without blurring across
//! depth discontinuities.
use crate::image::{ImageF32, ImageView};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Window radius in pixels.
    pub radius: usize,
    /// Spatial Gaussian sigma in pixels.
    pub spatial_sigma: f32,
    /// Range Gaussian sigma in value units.
    pub range_sigma: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            radius: 3,
            spatial_sigma: 2.0,
            range_sigma: 18.0,
        }
    }
}

pub fn bilateral(src: &ImageF32, params: BilateralParams) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || params.radius == 0 {
        return src.clone();
    }
    let r = params.radius as isize;
    let side = 2 * params.radius + 1;
    let s_denom = 2.0 * params.spatial_sigma.max(1e-3).powi(2);
    let r_denom = 2.0 * params.range_sigma.max(1e-3).powi(2);

    let mut spatial = Vec::with_capacity(side * side);
    for dy in -r..=r {
        for dx in -r..=r {
            spatial.push((-((dx * dx + dy * dy) as f32) / s_denom).exp());
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let centre = src.get(x, y);
            let mut acc = 0.0;
            let mut norm = 0.0;
            let mut k = 0;
            for dy in -r..=r {
                let row = src.row((y as isize + dy).clamp(0, h as isize - 1) as usize);
                for dx in -r..=r {
                    let v = row[(x as isize + dx).clamp(0, w as isize - 1) as usize];
                    let diff = v - centre;
                    let wgt = spatial[k] * (-(diff * diff) / r_denom).exp();
                    acc += v * wgt;
                    norm += wgt;
                    k += 1;
                }
            }
            out.set(x, y, if norm > 0.0 { acc / norm } else { centre });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_edge_survives_while_noise_is_smoothed() {
        let src = ImageF32::from_fn(16, 8, |x, y| {
            let base = if x < 8 { 60.0 } else { 220.0 };
            base + if (x + y) % 2 == 0 { 3.0 } else { -3.0 }
        });
        let out = bilateral(&src, BilateralParams::default());
        // depth step of 160 is far outside the range sigma
        assert!(out.get(7, 4) < 70.0);
        assert!(out.get(8, 4) > 210.0);
        // checkerboard noise shrinks
        let noisy = (src.get(3, 4) - src.get(4, 4)).abs();
        let smoothed = (out.get(3, 4) - out.get(4, 4)).abs();
        assert!(smoothed < noisy);
    }
}
