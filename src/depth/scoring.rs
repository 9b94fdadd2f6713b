//! Per-pixel depth scoring: subject/background base values plus signed cue
//! adjustments, clamped to `[0, 255]`.
//!
//! Both scorers evaluate interior pixels and copy the nearest interior value
//! into the 1-pixel border.
use super::features::{fill_border_from_interior, FeatureMaps};
use crate::color::{luma_mean, Hsv};
use crate::filters::local_range;
use crate::image::{ImageF32, PixelBuffer, SubjectMask};
use serde::{Deserialize, Serialize};

/// Raw (unsmoothed) depth from the image, its subject mask and cue maps.
pub trait DepthScoring {
    fn name(&self) -> &'static str;
    fn score(&self, image: &PixelBuffer, mask: &SubjectMask, features: &FeatureMaps) -> ImageF32;
}

/// Single-pass cue formula.
///
/// Subject pixels start at `subject_base` and move nearer with brightness,
/// edge strength and local contrast. Background pixels start at
/// `background_base`, move further away with blue hues, and nearer towards
/// the centre and with local contrast. Strong edges push the two classes
/// apart by `boundary_offset`, and a global centrality term biases the
/// whole map towards the middle of the frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicScoringParams {
    pub subject_base: f32,
    pub background_base: f32,
    pub subject_brightness_gain: f32,
    pub subject_edge_gain: f32,
    pub subject_edge_cap: f32,
    pub subject_contrast_gain: f32,
    /// Applied to `hue − 180` for hues above 180°; subtracts depth.
    pub background_blue_gain: f32,
    pub background_brightness_gain: f32,
    pub background_centrality_gain: f32,
    pub background_contrast_gain: f32,
    /// Edge magnitude (central-difference units) above which a pixel is
    /// treated as a boundary.
    pub boundary_edge: f32,
    pub boundary_offset: f32,
    pub global_centrality_gain: f32,
    /// Converts 3×3 Sobel magnitude to central-difference units.
    pub edge_scale: f32,
}

impl Default for BasicScoringParams {
    fn default() -> Self {
        Self {
            subject_base: 210.0,
            background_base: 70.0,
            subject_brightness_gain: 0.18,
            subject_edge_gain: 0.18,
            subject_edge_cap: 40.0,
            subject_contrast_gain: 0.25,
            background_blue_gain: 0.08,
            background_brightness_gain: 0.08,
            background_centrality_gain: 18.0,
            background_contrast_gain: 0.12,
            boundary_edge: 30.0,
            boundary_offset: 10.0,
            global_centrality_gain: 8.0,
            edge_scale: 0.25,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BasicScoring {
    pub params: BasicScoringParams,
}

impl BasicScoring {
    pub fn new(params: BasicScoringParams) -> Self {
        Self { params }
    }

    fn pixel(&self, image: &PixelBuffer, mask: &SubjectMask, f: &FeatureMaps, x: usize, y: usize) -> f32 {
        let p = &self.params;
        let rgb = image.rgb(x, y);
        let brightness = luma_mean(rgb);
        let contrast = f.local_contrast(x, y);
        let edge = f.grad.mag.get(x, y) * p.edge_scale;
        let centrality = f.centrality.score(x, y);
        let subject = mask.get(x, y);

        let mut d = if subject {
            p.subject_base
                + (brightness - 128.0) * p.subject_brightness_gain
                + (edge * p.subject_edge_gain).min(p.subject_edge_cap)
                + contrast * p.subject_contrast_gain
        } else {
            let hue = Hsv::from_rgb(rgb[0], rgb[1], rgb[2]).h;
            let blue = (hue - 180.0).max(0.0);
            p.background_base - blue * p.background_blue_gain
                + (128.0 - brightness) * p.background_brightness_gain
                + centrality * p.background_centrality_gain
                + contrast * p.background_contrast_gain
        };
        if edge > p.boundary_edge {
            d += if subject { p.boundary_offset } else { -p.boundary_offset };
        }
        d += centrality * p.global_centrality_gain;
        d.clamp(0.0, 255.0)
    }
}

impl DepthScoring for BasicScoring {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn score(&self, image: &PixelBuffer, mask: &SubjectMask, features: &FeatureMaps) -> ImageF32 {
        score_interior(image.width(), image.height(), |x, y| {
            self.pixel(image, mask, features, x, y)
        })
    }
}

/// Map-driven scoring.
///
/// Three full-image maps are blended with class-specific weights:
/// - edge: Sobel magnitude normalised by `edge_norm`;
/// - texture: local max − min of grayscale over `range_radius`, normalised
///   by `range_norm` (a sharpness proxy, so in-focus detail reads nearer);
/// - focus: logistic centrality weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedScoringParams {
    pub subject_base: f32,
    pub background_base: f32,
    pub edge_norm: f32,
    pub range_radius: usize,
    pub range_norm: f32,
    pub focus_steepness: f32,
    pub focus_cutoff: f32,
    pub subject_edge_weight: f32,
    pub subject_texture_weight: f32,
    pub subject_focus_weight: f32,
    pub subject_brightness_gain: f32,
    pub background_edge_weight: f32,
    pub background_texture_weight: f32,
    /// Depth removed at `focus = 0`; scales with `1 − focus`.
    pub background_defocus_weight: f32,
    pub background_blue_gain: f32,
    pub background_brightness_gain: f32,
    /// Normalised edge strength above which the class split is emphasised.
    pub boundary_edge: f32,
    pub boundary_offset: f32,
}

impl Default for EnhancedScoringParams {
    fn default() -> Self {
        Self {
            subject_base: 205.0,
            background_base: 75.0,
            edge_norm: 160.0,
            range_radius: 2,
            range_norm: 96.0,
            focus_steepness: 8.0,
            focus_cutoff: 0.55,
            subject_edge_weight: 22.0,
            subject_texture_weight: 14.0,
            subject_focus_weight: 12.0,
            subject_brightness_gain: 0.1,
            background_edge_weight: 6.0,
            background_texture_weight: 10.0,
            background_defocus_weight: 14.0,
            background_blue_gain: 0.06,
            background_brightness_gain: 0.05,
            boundary_edge: 0.4,
            boundary_offset: 8.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnhancedScoring {
    pub params: EnhancedScoringParams,
}

impl EnhancedScoring {
    pub fn new(params: EnhancedScoringParams) -> Self {
        Self { params }
    }
}

impl DepthScoring for EnhancedScoring {
    fn name(&self) -> &'static str {
        "enhanced"
    }

    fn score(&self, image: &PixelBuffer, mask: &SubjectMask, features: &FeatureMaps) -> ImageF32 {
        let p = &self.params;
        let (w, h) = (image.width(), image.height());
        let edge_norm = p.edge_norm.max(f32::EPSILON);
        let range_norm = p.range_norm.max(f32::EPSILON);
        let texture = local_range(&features.gray, p.range_radius);
        let focus = ImageF32::from_fn(w, h, |x, y| {
            features.centrality.weight(x, y, p.focus_steepness, p.focus_cutoff)
        });

        score_interior(w, h, |x, y| {
            let rgb = image.rgb(x, y);
            let brightness = luma_mean(rgb);
            let edge_n = (features.grad.mag.get(x, y) / edge_norm).min(1.0);
            let texture_n = (texture.get(x, y) / range_norm).min(1.0);
            let focus_n = focus.get(x, y);
            let subject = mask.get(x, y);

            let mut d = if subject {
                p.subject_base
                    + edge_n * p.subject_edge_weight
                    + texture_n * p.subject_texture_weight
                    + focus_n * p.subject_focus_weight
                    + (brightness - 128.0) * p.subject_brightness_gain
            } else {
                let hue = Hsv::from_rgb(rgb[0], rgb[1], rgb[2]).h;
                let blue = (hue - 180.0).max(0.0);
                p.background_base + edge_n * p.background_edge_weight
                    + texture_n * p.background_texture_weight
                    - (1.0 - focus_n) * p.background_defocus_weight
                    - blue * p.background_blue_gain
                    + (128.0 - brightness) * p.background_brightness_gain
            };
            if edge_n > p.boundary_edge {
                let push = p.boundary_offset * edge_n;
                d += if subject { push } else { -push };
            }
            d.clamp(0.0, 255.0)
        })
    }
}

fn score_interior(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> ImageF32 {
    if w < 3 || h < 3 {
        return ImageF32::from_fn(w, h, f);
    }
    let mut out = ImageF32::new(w, h);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            out.set(x, y, f(x, y));
        }
    }
    fill_border_from_interior(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    fn span(img: &ImageF32) -> f32 {
        img.min_max().map(|(lo, hi)| hi - lo).unwrap_or(0.0)
    }

    #[test]
    fn uniform_image_varies_only_by_centrality() {
        let img = synthetic::uniform(60, 40, [90, 120, 150]);
        let mask = SubjectMask::new(60, 40);
        let f = FeatureMaps::compute(&img);
        let basic = BasicScoring::default().score(&img, &mask, &f);
        let enhanced = EnhancedScoring::default().score(&img, &mask, &f);
        assert!(span(&basic) < 26.0, "basic span {}", span(&basic));
        assert!(span(&enhanced) < 14.0, "enhanced span {}", span(&enhanced));
        assert!(basic.get(30, 20) > basic.get(1, 1));
    }

    #[test]
    fn subject_scores_nearer_than_background() {
        let img = synthetic::disk_on_background(60, 40, (30.0, 20.0), 10.0, [250, 200, 40], [20, 20, 25]);
        let mask = SubjectMask::from_fn(60, 40, |x, y| {
            let (dx, dy) = (x as f32 - 30.0, y as f32 - 20.0);
            dx * dx + dy * dy <= 100.0
        });
        let f = FeatureMaps::compute(&img);
        for scorer in [&BasicScoring::default() as &dyn DepthScoring, &EnhancedScoring::default()] {
            let raw = scorer.score(&img, &mask, &f);
            assert!(raw.get(30, 20) > raw.get(3, 3) + 100.0, "{}", scorer.name());
            assert!(raw.data.iter().all(|v| (0.0..=255.0).contains(v)));
        }
    }

    #[test]
    fn blue_background_is_pushed_away() {
        let blue = synthetic::uniform(20, 20, [40, 60, 220]);
        let warm = synthetic::uniform(20, 20, [220, 60, 40]);
        let mask = SubjectMask::new(20, 20);
        let s = BasicScoring::default();
        let db = s.score(&blue, &mask, &FeatureMaps::compute(&blue)).get(10, 10);
        let dw = s.score(&warm, &mask, &FeatureMaps::compute(&warm)).get(10, 10);
        assert!(db < dw);
    }
}
