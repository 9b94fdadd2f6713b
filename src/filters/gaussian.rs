use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, with an odd length.
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Normalised Gaussian taps with radius `ceil(3σ)`.
///
/// Sigmas at or below zero collapse to the identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma.is_nan() || sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil() as i32;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Gaussian filter with precomputed taps.
#[derive(Clone, Debug)]
pub struct GaussianFilter {
    taps: Vec<f32>,
}

impl GaussianFilter {
    pub fn new(sigma: f32) -> Self {
        Self {
            taps: gaussian_kernel(sigma),
        }
    }

    /// Horizontal pass followed by a vertical pass.
    pub fn apply(&self, src: &ImageF32) -> ImageF32 {
        apply_separable(self, src)
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` along x and then along y, clamping at borders.
pub fn apply_separable(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let radius = filter.radius() as isize;
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.len() <= 1 {
        return src.clone();
    }

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        let out = tmp.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += row[sx] * t;
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let sy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
            let src_row = tmp.row(sy);
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += s * t;
            }
        }
    }
    out
}

/// Sigma quantisation step for the adaptive blur's kernel bank.
const SIGMA_STEP: f32 = 0.25;

/// Two-pass Gaussian whose sigma (and hence radius) varies per pixel.
///
/// `sigma_map` must match `src` in size. Sigmas are quantised to multiples of
/// 0.25 so kernels can be shared; a sigma of 0 leaves the pixel unchanged on
/// that pass.
pub fn apply_adaptive(src: &ImageF32, sigma_map: &ImageF32) -> ImageF32 {
    debug_assert!(src.same_size(sigma_map));
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 {
        return src.clone();
    }
    let bank = KernelBank::for_map(sigma_map);

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let taps = bank.taps_for(sigma_map.get(x, y));
            let radius = (taps.len() / 2) as isize;
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += row[sx] * t;
            }
            tmp.set(x, y, acc);
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let taps = bank.taps_for(sigma_map.get(x, y));
            let radius = (taps.len() / 2) as isize;
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
                acc += tmp.get(x, sy) * t;
            }
            out.set(x, y, acc);
        }
    }
    out
}

struct KernelBank {
    kernels: Vec<Vec<f32>>,
}

impl KernelBank {
    fn for_map(sigma_map: &ImageF32) -> Self {
        let max_sigma = sigma_map
            .data
            .iter()
            .copied()
            .filter(|s| s.is_finite())
            .fold(0.0f32, f32::max);
        let steps = (max_sigma / SIGMA_STEP).ceil() as usize;
        let kernels = (0..=steps)
            .map(|i| gaussian_kernel(i as f32 * SIGMA_STEP))
            .collect();
        Self { kernels }
    }

    #[inline]
    fn taps_for(&self, sigma: f32) -> &[f32] {
        let idx = if sigma.is_finite() && sigma > 0.0 {
            ((sigma / SIGMA_STEP).round() as usize).min(self.kernels.len() - 1)
        } else {
            0
        };
        &self.kernels[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_radius_and_normalisation() {
        let k = gaussian_kernel(2.2);
        assert_eq!(k.len(), 2 * 7 + 1);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(k[7] > k[6] && k[6] > k[0]);
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
    }

    #[test]
    fn blur_preserves_constant_and_spreads_impulse() {
        let flat = ImageF32::filled(9, 7, 42.0);
        let out = GaussianFilter::new(1.5).apply(&flat);
        assert!(out.data.iter().all(|v| (v - 42.0).abs() < 1e-3));

        let mut impulse = ImageF32::new(15, 15);
        impulse.set(7, 7, 100.0);
        let out = GaussianFilter::new(1.0).apply(&impulse);
        assert!(out.get(7, 7) < 100.0);
        assert!(out.get(8, 7) > 0.0);
        assert!((out.get(6, 7) - out.get(8, 7)).abs() < 1e-4);
        let total: f32 = out.data.iter().sum();
        assert!((total - 100.0).abs() < 1e-2);
    }

    #[test]
    fn adaptive_blur_keeps_sharp_pixels_where_sigma_is_zero() {
        let src = ImageF32::from_fn(12, 3, |x, _| if x < 6 { 0.0 } else { 100.0 });
        let mut sigma = ImageF32::filled(12, 3, 2.0);
        for y in 0..3 {
            sigma.set(5, y, 0.0);
            sigma.set(6, y, 0.0);
        }
        let out = apply_adaptive(&src, &sigma);
        assert_eq!(out.get(5, 1), 0.0);
        assert_eq!(out.get(6, 1), 100.0);
        assert!(out.get(4, 1) > 0.0);
    }
}
