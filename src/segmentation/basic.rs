//! Single-pass subject test: skin tone, or a vivid colour near the centre.
use super::cues::{is_skin_hsv, Centrality};
use super::morphology::close;
use super::SegmentationStrategy;
use crate::color::saturation_percent;
use crate::image::{PixelBuffer, SubjectMask};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicSegmentationParams {
    /// Saturation (percent) above which a pixel counts as vivid.
    pub vivid_saturation: f32,
    /// Centrality ratio below which a pixel counts as central.
    pub central_cutoff: f32,
    pub close_iterations: usize,
}

impl Default for BasicSegmentationParams {
    fn default() -> Self {
        Self {
            vivid_saturation: 50.0,
            central_cutoff: 0.6,
            close_iterations: 1,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BasicSegmentation {
    pub params: BasicSegmentationParams,
}

impl BasicSegmentation {
    pub fn new(params: BasicSegmentationParams) -> Self {
        Self { params }
    }
}

impl SegmentationStrategy for BasicSegmentation {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn segment(&self, image: &PixelBuffer) -> SubjectMask {
        let p = &self.params;
        let centrality = Centrality::new(image.width(), image.height());
        let raw = SubjectMask::from_fn(image.width(), image.height(), |x, y| {
            let rgb = image.rgb(x, y);
            if is_skin_hsv(rgb) {
                return true;
            }
            saturation_percent(rgb) > p.vivid_saturation
                && centrality.distance_ratio(x, y) < p.central_cutoff
        });
        close(&raw, p.close_iterations)
    }
}
