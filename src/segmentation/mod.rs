//! Subject segmentation: boolean foreground masks from colour, centrality
//! and edge cues.
//!
//! Two interchangeable strategies share one contract,
//! [`SegmentationStrategy::segment`]:
//! - [`BasicSegmentation`]: HSV skin or vivid-and-central, then closing.
//! - [`RefinedSegmentation`]: weighted cue sum, region growing, opening,
//!   closing and a majority-vote boundary smoother.
//!
//! [`detect_subject_regions`] wraps either one with the flat-image guard:
//! an image without colour structure has no subject.
pub mod basic;
pub mod cues;
pub mod morphology;
pub mod refined;
pub mod region_grow;

pub use basic::{BasicSegmentation, BasicSegmentationParams};
pub use refined::{RefinedSegmentation, RefinedSegmentationParams};

use crate::image::{PixelBuffer, SubjectMask};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A subject detector. Implementations must be deterministic and return a
/// mask with the image's dimensions.
pub trait SegmentationStrategy {
    fn name(&self) -> &'static str;
    fn segment(&self, image: &PixelBuffer) -> SubjectMask;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Per-channel standard deviation below which the image is treated as
    /// flat and segmentation is skipped.
    pub flat_spread: f32,
    pub basic: BasicSegmentationParams,
    pub refined: RefinedSegmentationParams,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            flat_spread: 4.0,
            basic: BasicSegmentationParams::default(),
            refined: RefinedSegmentationParams::default(),
        }
    }
}

/// Run `strategy` unless the image is flat, in which case the mask is empty.
pub fn detect_subject_regions(
    strategy: &dyn SegmentationStrategy,
    image: &PixelBuffer,
    flat_spread: f32,
) -> SubjectMask {
    let start = Instant::now();
    if cues::is_flat(image, flat_spread) {
        debug!(
            "segmentation[{}]: flat {}x{} image, no subject",
            strategy.name(),
            image.width(),
            image.height()
        );
        return SubjectMask::new(image.width(), image.height());
    }
    let mask = strategy.segment(image);
    debug!(
        "segmentation[{}]: {}x{} subject_fraction={:.3} elapsed_ms={:.3}",
        strategy.name(),
        image.width(),
        image.height(),
        mask.fraction(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    #[test]
    fn flat_vivid_image_has_no_subject() {
        let img = synthetic::uniform(50, 40, [250, 40, 40]);
        for strategy in [
            &BasicSegmentation::default() as &dyn SegmentationStrategy,
            &RefinedSegmentation::default(),
        ] {
            let mask = detect_subject_regions(strategy, &img, 4.0);
            assert_eq!(mask.count(), 0, "{}", strategy.name());
        }
    }

    #[test]
    fn params_deserialize_with_partial_json() {
        let params: SegmentationParams =
            serde_json::from_str(r#"{ "refined": { "grow_distance": 12.0 } }"#).unwrap();
        assert_eq!(params.flat_spread, 4.0);
        assert_eq!(params.refined.grow_distance, 12.0);
        assert_eq!(params.refined.seed_stride, 5);
        assert_eq!(params.basic, BasicSegmentationParams::default());
    }
}
