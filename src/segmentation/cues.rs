//! Per-pixel subject cues: skin tone, vividness and centrality.
use crate::color::{logistic, Hsv, YCbCr};
use crate::image::PixelBuffer;

/// Distance-to-centre helper, normalised by the centre-to-corner distance.
#[derive(Clone, Copy, Debug)]
pub struct Centrality {
    cx: f32,
    cy: f32,
    max_dist: f32,
}

impl Centrality {
    pub fn new(width: usize, height: usize) -> Self {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        Self {
            cx,
            cy,
            max_dist: (cx * cx + cy * cy).sqrt().max(f32::EPSILON),
        }
    }

    /// `0` at the image centre, `1` at the corners.
    #[inline]
    pub fn distance_ratio(&self, x: usize, y: usize) -> f32 {
        let dx = x as f32 - self.cx;
        let dy = y as f32 - self.cy;
        (dx * dx + dy * dy).sqrt() / self.max_dist
    }

    /// `1 - distance_ratio`: 1 at the centre, 0 at the corners.
    #[inline]
    pub fn score(&self, x: usize, y: usize) -> f32 {
        1.0 - self.distance_ratio(x, y)
    }

    /// Logistic weight that is ~1 well inside `cutoff` and ~0 well outside.
    #[inline]
    pub fn weight(&self, x: usize, y: usize, steepness: f32, cutoff: f32) -> f32 {
        logistic(cutoff - self.distance_ratio(x, y), steepness, 0.0)
    }
}

/// HSV skin band: hue 10–40°, saturation 20–80 %, value 30–90 %.
pub fn is_skin_hsv(rgb: [f32; 3]) -> bool {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    if max <= 0.0 {
        return false;
    }
    let hsv = Hsv::from_rgb(rgb[0], rgb[1], rgb[2]);
    (10.0..=40.0).contains(&hsv.h) && (20.0..=80.0).contains(&hsv.s) && (30.0..=90.0).contains(&hsv.v)
}

/// Skin test with two acceptance paths, both gated on `R > G > B` with a
/// minimum `R − B` gap:
/// - chroma path: Cb in 77–127 and Cr in 133–173;
/// - hue path: hue ≤ 50°, saturation 15–70 %, value ≥ 35 % and `R > 1.1·G`.
pub fn is_skin_refined(rgb: [f32; 3], min_red_blue_gap: f32) -> bool {
    let [r, g, b] = rgb;
    let ordered = r > g && g > b && r - b >= min_red_blue_gap;
    if !ordered {
        return false;
    }
    let ycc = YCbCr::from_rgb(r, g, b);
    let chroma_path = (77.0..=127.0).contains(&ycc.cb) && (133.0..=173.0).contains(&ycc.cr);
    if chroma_path {
        return true;
    }
    let hsv = Hsv::from_rgb(r, g, b);
    hsv.h <= 50.0 && (15.0..=70.0).contains(&hsv.s) && hsv.v >= 35.0 && r > 1.1 * g
}

/// True when every RGB channel's standard deviation stays below `max_spread`,
/// i.e. the image carries no usable colour structure.
pub fn is_flat(image: &PixelBuffer, max_spread: f32) -> bool {
    let n = image.pixel_count();
    if n == 0 {
        return true;
    }
    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for px in image.data().chunks_exact(4) {
        for c in 0..3 {
            let v = px[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }
    let n = n as f64;
    (0..3).all(|c| {
        let mean = sum[c] / n;
        let var = (sum_sq[c] / n - mean * mean).max(0.0);
        (var.sqrt() as f32) < max_spread
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    const SKIN: [f32; 3] = [224.0, 172.0, 140.0];

    #[test]
    fn skin_tone_passes_both_tests() {
        assert!(is_skin_hsv(SKIN));
        assert!(is_skin_refined(SKIN, 15.0));
    }

    #[test]
    fn non_skin_colours_are_rejected() {
        for rgb in [[40.0, 90.0, 200.0], [128.0, 128.0, 128.0], [0.0, 0.0, 0.0], [30.0, 200.0, 60.0]] {
            assert!(!is_skin_hsv(rgb), "{rgb:?}");
            assert!(!is_skin_refined(rgb, 15.0), "{rgb:?}");
        }
        // warm but nearly gray: ordering holds, gap does not
        assert!(!is_skin_refined([150.0, 145.0, 140.0], 15.0));
    }

    #[test]
    fn centrality_is_one_at_centre_and_zero_at_corner() {
        let c = Centrality::new(100, 50);
        assert!((c.score(50, 25) - 1.0).abs() < 1e-6);
        assert!(c.score(0, 0).abs() < 1e-6);
        assert!(c.weight(50, 25, 10.0, 0.6) > 0.99);
        assert!(c.weight(0, 0, 10.0, 0.6) < 0.02);
    }

    #[test]
    fn flatness_gate() {
        assert!(is_flat(&synthetic::uniform(20, 10, [220, 30, 30]), 4.0));
        let disk = synthetic::disk_on_background(40, 40, (20.0, 20.0), 8.0, [250, 200, 40], [20, 20, 25]);
        assert!(!is_flat(&disk, 4.0));
    }
}
