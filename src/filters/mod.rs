//! Smoothing kernels used by depth estimation and the renderer's depth
//! prefilter.
//!
//! - [`gaussian`]: separable Gaussian (fixed sigma) and the spatially
//!   adaptive variant driven by a per-pixel sigma map.
//! - [`bilateral`]: edge-preserving smoothing (spatial × range Gaussian).
//! - [`local_range`]: separable min/max filters; their difference is a cheap
//!   local sharpness proxy.
//!
//! All filters operate on [`ImageF32`](crate::image::ImageF32) and clamp at the
//! borders (replicate).

pub mod bilateral;
pub mod gaussian;
pub mod local_range;

pub use bilateral::{bilateral, BilateralParams};
pub use gaussian::{
    apply_adaptive, apply_separable, gaussian_kernel, GaussianFilter, SeparableFilter,
};
pub use local_range::{local_min_max, local_range};
