//! Edge processing utilities: 3×3 Sobel gradients on float images.
//!
//! Borders clamp (replicate). Magnitudes are in raw Sobel units of the input
//! scale, so a luminance step of `Δ` (0–255) yields a magnitude of `4Δ`.

pub mod grad;

pub use grad::{sobel_gradients, Grad};
