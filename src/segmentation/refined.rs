//! Weighted multi-cue subject test with region growing and morphological
//! cleanup.
//!
//! Per pixel the score is
//! `skin·w_skin + vivid·central·w_vivid + central·w_central + edge·w_edge`
//! where `central` is a logistic centrality weight. Pixels scoring above
//! `accept_threshold` are subject. Accepted pixels whose skin or vivid cue
//! fired then seed region growing, which recovers low-contrast interiors.
use super::cues::{is_skin_refined, Centrality};
use super::morphology::{close, majority_smooth, open};
use super::region_grow::grow_regions;
use super::SegmentationStrategy;
use crate::color::Hsv;
use crate::edges::sobel_gradients;
use crate::image::{ImageView, PixelBuffer, SubjectMask};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinedSegmentationParams {
    pub skin_weight: f32,
    pub vivid_weight: f32,
    pub centrality_weight: f32,
    pub edge_weight: f32,
    pub accept_threshold: f32,
    pub centrality_steepness: f32,
    pub centrality_cutoff: f32,
    pub vivid_saturation: f32,
    pub vivid_value: f32,
    /// Sobel magnitude on 0–255 grayscale.
    pub edge_threshold: f32,
    pub min_red_blue_gap: f32,
    pub seed_stride: usize,
    pub grow_distance: f32,
    pub open_iterations: usize,
    pub close_iterations: usize,
    pub majority_on: usize,
    pub majority_off: usize,
}

impl Default for RefinedSegmentationParams {
    fn default() -> Self {
        Self {
            skin_weight: 0.7,
            vivid_weight: 0.5,
            centrality_weight: 0.6,
            edge_weight: 0.3,
            accept_threshold: 0.6,
            centrality_steepness: 10.0,
            centrality_cutoff: 0.6,
            vivid_saturation: 45.0,
            vivid_value: 20.0,
            edge_threshold: 40.0,
            min_red_blue_gap: 15.0,
            seed_stride: 5,
            grow_distance: 30.0,
            open_iterations: 2,
            close_iterations: 2,
            majority_on: 5,
            majority_off: 3,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RefinedSegmentation {
    pub params: RefinedSegmentationParams,
}

impl RefinedSegmentation {
    pub fn new(params: RefinedSegmentationParams) -> Self {
        Self { params }
    }
}

impl SegmentationStrategy for RefinedSegmentation {
    fn name(&self) -> &'static str {
        "refined"
    }

    fn segment(&self, image: &PixelBuffer) -> SubjectMask {
        let p = &self.params;
        let (w, h) = (image.width(), image.height());
        let centrality = Centrality::new(w, h);
        let grad = sobel_gradients(&image.to_gray());

        let mut mask = SubjectMask::new(w, h);
        let mut seeds = SubjectMask::new(w, h);
        for y in 0..h {
            let mag_row = grad.mag.row(y);
            for x in 0..w {
                let rgb = image.rgb(x, y);
                let hsv = Hsv::from_rgb(rgb[0], rgb[1], rgb[2]);
                let skin = is_skin_refined(rgb, p.min_red_blue_gap);
                let vivid = hsv.s > p.vivid_saturation && hsv.v > p.vivid_value;
                let edge = mag_row[x] > p.edge_threshold;
                let central = centrality.weight(x, y, p.centrality_steepness, p.centrality_cutoff);

                let mut score = central * p.centrality_weight;
                if skin {
                    score += p.skin_weight;
                }
                if vivid {
                    score += p.vivid_weight * central;
                }
                if edge {
                    score += p.edge_weight;
                }
                if score > p.accept_threshold {
                    mask.set(x, y, true);
                    if skin || vivid {
                        seeds.set(x, y, true);
                    }
                }
            }
        }

        let accepted = mask.count();
        let grown = grow_regions(&mut mask, image, &seeds, p.seed_stride, p.grow_distance);
        debug!("refined segmentation: accepted={} grown={}", accepted, grown);

        let mask = open(&mask, p.open_iterations);
        let mask = close(&mask, p.close_iterations);
        majority_smooth(&mask, p.majority_on, p.majority_off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    #[test]
    fn disk_interior_is_recovered() {
        let img = synthetic::disk_on_background(120, 90, (50.0, 40.0), 18.0, [250, 200, 40], [20, 20, 25]);
        let mask = RefinedSegmentation::default().segment(&img);
        for (x, y) in [(50, 40), (40, 40), (60, 45), (50, 28)] {
            assert!(mask.get(x, y), "({x},{y}) should be subject");
        }
        assert!(!mask.get(5, 5));
        assert!(!mask.get(110, 80));
    }

    #[test]
    fn centrality_alone_never_accepts() {
        let img = synthetic::uniform(40, 30, [120, 120, 120]);
        let mask = RefinedSegmentation::default().segment(&img);
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn off_centre_skin_patch_is_subject() {
        let img = synthetic::disk_on_background(120, 90, (20.0, 20.0), 12.0, [224, 172, 140], [30, 60, 200]);
        let mask = RefinedSegmentation::default().segment(&img);
        assert!(mask.get(20, 20));
    }
}
