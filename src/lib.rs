#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod depth;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod parallax;
pub mod session;
pub mod types;

// Building blocks shared by the stages; public for tools and experiments.
pub mod color;
pub mod config;
pub mod edges;
pub mod filters;
pub mod segmentation;

// --- High-level re-exports -------------------------------------------------

pub use crate::depth::{DepthEstimate, DepthEstimator, DepthOptions, Tier};
pub use crate::error::{Error, Result};
pub use crate::image::{DepthBuffer, PixelBuffer, SubjectMask};
pub use crate::parallax::{ParallaxRenderer, RenderOptions, RenderOutput};
pub use crate::session::{SessionState, ViewerSession};
pub use crate::types::{IntensityWarning, RenderSettings, TiltVector};

pub use crate::diagnostics::{DepthReport, FrameReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use spatial_parallax::prelude::*;
///
/// # fn main() -> spatial_parallax::Result<()> {
/// let image = spatial_parallax::image::synthetic::sample_scene();
/// let depth = DepthEstimator::new(DepthOptions::default()).estimate(&image)?;
///
/// let mut renderer = ParallaxRenderer::new(RenderOptions::default());
/// let settings = RenderSettings::new(TiltVector::new(0.0, 20.0), 40.0);
/// let out = renderer.render(&image, &depth, settings, (image.width(), image.height()))?;
/// println!("rendered in {:.2} ms", out.elapsed_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{DepthBuffer, PixelBuffer};
    pub use crate::{
        DepthEstimator, DepthOptions, ParallaxRenderer, RenderOptions, RenderSettings, TiltVector,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Strategy traits and implementations.
    pub use crate::depth::{
        AdaptiveSmoothing, BasicScoring, DepthScoring, EnhancedScoring, FeatureMaps,
        GaussianSmoothing, SmoothingStrategy,
    };
    pub use crate::segmentation::{
        detect_subject_regions, BasicSegmentation, RefinedSegmentation, SegmentationStrategy,
    };

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        DepthStats, InputDescriptor, StageTiming, StrategyNames, TimingBreakdown,
    };
}
