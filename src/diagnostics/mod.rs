//! Serializable reports produced by the depth estimator, the renderer and
//! the tools.
//!
//! [`DepthReport`] is returned by
//! [`DepthEstimator::estimate_with_diagnostics`](crate::DepthEstimator) and
//! [`FrameReport`] summarises one rendered frame. Both carry a
//! [`TimingBreakdown`] or elapsed time so tools can dump them as JSON.

pub mod depth;
pub mod render;
pub mod timing;

pub use depth::{DepthReport, DepthStats, InputDescriptor, StrategyNames};
pub use render::FrameReport;
pub use timing::{StageTiming, TimingBreakdown};
