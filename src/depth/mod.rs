//! Heuristic monocular depth estimation.
//!
//! The [`DepthEstimator`] turns an RGBA image into an 8-bit depth map
//! (0 = far, 255 = near) in three stages:
//! 1. subject segmentation ([`crate::segmentation`]),
//! 2. per-pixel cue scoring ([`DepthScoring`]),
//! 3. smoothing ([`SmoothingStrategy`]) followed by a horizontal boundary
//!    blend.
//!
//! Two coherent tiers bundle one strategy per stage:
//! - [`Tier::Basic`]: basic segmentation, single-pass scoring, fixed Gaussian.
//! - [`Tier::Enhanced`]: refined segmentation, map-driven scoring,
//!   edge-adaptive Gaussian.
//!
//! [`Tier::Auto`] picks `Enhanced` up to `auto_enhanced_max_pixels` and
//! `Basic` above it. Any strategy combination can be run through
//! [`DepthEstimator::estimate_with`].
//!
//! ```no_run
//! use spatial_parallax::{DepthEstimator, DepthOptions};
//! use spatial_parallax::image::synthetic;
//!
//! # fn main() -> spatial_parallax::Result<()> {
//! let image = synthetic::sample_scene();
//! let estimate = DepthEstimator::new(DepthOptions::default()).estimate_with_diagnostics(&image)?;
//! println!("depth span: {}", estimate.report.depth.span());
//! # Ok(())
//! # }
//! ```
pub mod features;
pub mod scoring;
pub mod smoothing;

pub use features::FeatureMaps;
pub use scoring::{BasicScoring, BasicScoringParams, DepthScoring, EnhancedScoring, EnhancedScoringParams};
pub use smoothing::{blend_boundaries, AdaptiveSmoothing, GaussianSmoothing, SmoothingStrategy};

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DepthReport, DepthStats, InputDescriptor, StrategyNames, TimingBreakdown};
use crate::error::{ensure_non_empty, Result};
use crate::image::{DepthBuffer, PixelBuffer};
use crate::segmentation::{
    detect_subject_regions, BasicSegmentation, RefinedSegmentation, SegmentationParams,
    SegmentationStrategy,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    Enhanced,
    #[default]
    Auto,
}

impl Tier {
    /// Resolve `Auto` against the image size; other tiers pass through.
    pub fn resolve(self, pixels: usize, auto_enhanced_max_pixels: usize) -> Tier {
        match self {
            Tier::Auto if pixels <= auto_enhanced_max_pixels => Tier::Enhanced,
            Tier::Auto => Tier::Basic,
            other => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthOptions {
    pub tier: Tier,
    pub auto_enhanced_max_pixels: usize,
    pub segmentation: SegmentationParams,
    pub basic_scoring: BasicScoringParams,
    pub enhanced_scoring: EnhancedScoringParams,
    pub gaussian: GaussianSmoothing,
    pub adaptive: AdaptiveSmoothing,
    /// Horizontal discontinuity above which the boundary pass re-averages.
    pub boundary_threshold: f32,
}

impl Default for DepthOptions {
    fn default() -> Self {
        Self {
            tier: Tier::Auto,
            auto_enhanced_max_pixels: 1_000_000,
            segmentation: SegmentationParams::default(),
            basic_scoring: BasicScoringParams::default(),
            enhanced_scoring: EnhancedScoringParams::default(),
            gaussian: GaussianSmoothing::default(),
            adaptive: AdaptiveSmoothing::default(),
            boundary_threshold: 20.0,
        }
    }
}

impl DepthOptions {
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }
}

/// Depth map plus the report describing how it was produced.
#[derive(Clone, Debug)]
pub struct DepthEstimate {
    pub depth: DepthBuffer,
    pub report: DepthReport,
}

/// Stateless depth estimator; identical input yields identical output.
#[derive(Clone, Debug, Default)]
pub struct DepthEstimator {
    options: DepthOptions,
}

impl DepthEstimator {
    pub fn new(options: DepthOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DepthOptions {
        &self.options
    }

    /// Estimate depth with the configured tier.
    pub fn estimate(&self, image: &PixelBuffer) -> Result<DepthBuffer> {
        Ok(self.estimate_with_diagnostics(image)?.depth)
    }

    /// Estimate depth and return stage timings and depth statistics.
    pub fn estimate_with_diagnostics(&self, image: &PixelBuffer) -> Result<DepthEstimate> {
        let o = &self.options;
        let tier = o.tier.resolve(image.pixel_count(), o.auto_enhanced_max_pixels);
        let mut estimate = match tier {
            Tier::Basic | Tier::Auto => self.estimate_with(
                image,
                &BasicSegmentation::new(o.segmentation.basic.clone()),
                &BasicScoring::new(o.basic_scoring.clone()),
                &o.gaussian,
            )?,
            Tier::Enhanced => self.estimate_with(
                image,
                &RefinedSegmentation::new(o.segmentation.refined.clone()),
                &EnhancedScoring::new(o.enhanced_scoring.clone()),
                &o.adaptive,
            )?,
        };
        estimate.report.tier = Some(tier);
        Ok(estimate)
    }

    /// Run the pipeline with caller-chosen strategies.
    pub fn estimate_with(
        &self,
        image: &PixelBuffer,
        segmentation: &dyn SegmentationStrategy,
        scoring: &dyn DepthScoring,
        smoothing: &dyn SmoothingStrategy,
    ) -> Result<DepthEstimate> {
        let (width, height) = (image.width(), image.height());
        ensure_non_empty(width, height)?;
        debug!(
            "DepthEstimator::estimate start w={} h={} segmentation={} scoring={} smoothing={}",
            width,
            height,
            segmentation.name(),
            scoring.name(),
            smoothing.name()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let mask = detect_subject_regions(segmentation, image, self.options.segmentation.flat_spread);
        timings.push("segmentation", elapsed_ms(stage));

        let stage = Instant::now();
        let features = FeatureMaps::compute(image);
        timings.push("features", elapsed_ms(stage));

        let stage = Instant::now();
        let raw = scoring.score(image, &mask, &features);
        timings.push("scoring", elapsed_ms(stage));

        let stage = Instant::now();
        let smoothed = smoothing.smooth(&raw, &features);
        let blended = blend_boundaries(&smoothed, self.options.boundary_threshold);
        timings.push("smoothing", elapsed_ms(stage));

        let depth = DepthBuffer::from_f32_clamped(&blended);
        timings.total_ms = elapsed_ms(total_start);

        let stats = DepthStats::from_depth(&depth, &mask);
        debug!(
            "DepthEstimator::estimate done subject_fraction={:.3} depth=[{}, {}] mean={:.1} total_ms={:.2}",
            mask.fraction(),
            stats.min,
            stats.max,
            stats.mean,
            timings.total_ms
        );

        let report = DepthReport {
            input: InputDescriptor { width, height },
            tier: None,
            strategies: StrategyNames {
                segmentation: segmentation.name().to_string(),
                scoring: scoring.name().to_string(),
                smoothing: smoothing.name().to_string(),
            },
            subject_fraction: mask.fraction(),
            depth: stats,
            timings,
        };
        Ok(DepthEstimate { depth, report })
    }
}
