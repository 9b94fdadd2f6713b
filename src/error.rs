use thiserror::Error;

/// Errors raised by the depth estimator, the parallax renderer and the
/// viewer session.
///
/// Degenerate images (flat colour, no detectable subject) are not errors;
/// only caller-side precondition violations end up here.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The image has a zero width or height.
    #[error("image has zero size ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// A raw buffer does not hold exactly `width * height * channels` samples.
    #[error("buffer of {actual} samples does not match {width}x{height} (expected {expected})")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// The depth buffer and the source image disagree on their dimensions.
    #[error("depth map is {depth_w}x{depth_h} but source image is {source_w}x{source_h}")]
    DimensionMismatch {
        source_w: usize,
        source_h: usize,
        depth_w: usize,
        depth_h: usize,
    },

    /// A parallax frame was requested before depth estimation ran.
    #[error("depth map has not been estimated for the current image")]
    DepthNotReady,

    /// The session has no image loaded.
    #[error("no image loaded")]
    NoImage,
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn ensure_non_empty(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        Err(Error::EmptyImage { width, height })
    } else {
        Ok(())
    }
}
