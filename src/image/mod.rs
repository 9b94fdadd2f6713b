//! Owned raster buffers used across the pipeline.
//!
//! - [`PixelBuffer`]: RGBA8 colour image (sources and rendered frames).
//! - [`DepthBuffer`]: 8-bit depth, 0 = far, 255 = near.
//! - [`SubjectMask`]: boolean foreground mask from segmentation.
//! - [`ImageF32`]: float working buffer for intermediate scalar fields.
pub mod depth;
pub mod f32;
pub mod io;
pub mod mask;
pub mod rgba;
pub mod synthetic;
pub mod traits;

pub use self::depth::DepthBuffer;
pub use self::f32::ImageF32;
pub use self::mask::SubjectMask;
pub use self::rgba::PixelBuffer;
pub use self::traits::{ImageView, ImageViewMut, Rows};
