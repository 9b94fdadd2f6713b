//! Viewer session: one image, its cached depth map and the interactive
//! controls that drive the renderer.
//!
//! States:
//! - `Idle`: no image.
//! - `ImageLoaded`: an image is present, no depth (spatial mode off, or a
//!   new image replaced the previous one while spatial mode was off).
//! - `DepthReady`: the depth map for the current image is cached; every
//!   tilt or intensity change re-renders from it without re-estimating.
//!
//! Loading a new image always invalidates the cached depth; switching
//! spatial mode off drops it. Frames in spatial mode come from the
//! renderer, otherwise the plain image is shown.
pub mod throttle;
pub mod tilt;

pub use throttle::RenderThrottle;
pub use tilt::{
    DragParams, DragTilt, OrientationParams, OrientationSample, OrientationTilt, ScreenOrientation,
    TiltSmoother,
};

use crate::depth::{DepthEstimator, DepthOptions};
use crate::diagnostics::DepthReport;
use crate::error::{ensure_non_empty, Error, Result};
use crate::image::{DepthBuffer, ImageView, PixelBuffer};
use crate::parallax::{ParallaxRenderer, RenderOptions, RenderOutput};
use crate::types::{RenderSettings, TiltVector};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    ImageLoaded,
    DepthReady,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub depth: DepthOptions,
    pub render: RenderOptions,
    pub tilt_smoothing: f32,
    pub throttle_ms: u64,
    /// UI intensity on the `0..=100` scale at session start.
    pub initial_intensity: f32,
    pub drag: DragParams,
    pub orientation: OrientationParams,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            depth: DepthOptions::default(),
            render: RenderOptions::default(),
            tilt_smoothing: 0.7,
            throttle_ms: 50,
            initial_intensity: 30.0,
            drag: DragParams::default(),
            orientation: OrientationParams::default(),
        }
    }
}

/// What the display surface should show.
#[derive(Debug)]
pub enum Frame<'a> {
    /// Spatial mode is off: draw the image directly.
    Plain(&'a PixelBuffer),
    Parallax(RenderOutput),
}

pub struct ViewerSession {
    estimator: DepthEstimator,
    renderer: ParallaxRenderer,
    image: Option<PixelBuffer>,
    depth: Option<DepthBuffer>,
    depth_report: Option<DepthReport>,
    spatial: bool,
    tilt: TiltVector,
    intensity: f32,
    smoother: TiltSmoother,
    drag: DragTilt,
    orientation: OrientationTilt,
    throttle: RenderThrottle,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl ViewerSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            estimator: DepthEstimator::new(options.depth),
            renderer: ParallaxRenderer::new(options.render),
            image: None,
            depth: None,
            depth_report: None,
            spatial: false,
            tilt: TiltVector::ZERO,
            intensity: options.initial_intensity.clamp(0.0, 100.0),
            smoother: TiltSmoother::new(options.tilt_smoothing),
            drag: DragTilt::new(options.drag),
            orientation: OrientationTilt::new(options.orientation),
            throttle: RenderThrottle::new(Duration::from_millis(options.throttle_ms)),
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.image, &self.depth) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::ImageLoaded,
            (Some(_), Some(_)) => SessionState::DepthReady,
        }
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    pub fn depth(&self) -> Option<&DepthBuffer> {
        self.depth.as_ref()
    }

    pub fn depth_report(&self) -> Option<&DepthReport> {
        self.depth_report.as_ref()
    }

    pub fn is_spatial(&self) -> bool {
        self.spatial
    }

    pub fn tilt(&self) -> TiltVector {
        self.tilt
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn settings(&self) -> RenderSettings {
        RenderSettings::new(self.tilt, self.intensity)
    }

    /// Replace the current image. Cached depth is discarded and, in spatial
    /// mode, re-estimated for the new image.
    pub fn load_image(&mut self, image: PixelBuffer) -> Result<SessionState> {
        ensure_non_empty(image.width(), image.height())?;
        debug!("ViewerSession::load_image {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.clear_depth();
        if self.spatial {
            self.estimate_depth()?;
        }
        Ok(self.state())
    }

    /// Toggle spatial mode. Enabling estimates depth if an image is loaded;
    /// disabling drops the cached depth.
    pub fn set_spatial_mode(&mut self, enabled: bool) -> Result<SessionState> {
        self.spatial = enabled;
        if enabled {
            if self.image.is_some() && self.depth.is_none() {
                self.estimate_depth()?;
            }
        } else {
            self.clear_depth();
        }
        Ok(self.state())
    }

    /// Install a depth map computed elsewhere (e.g. on a worker thread).
    pub fn set_depth(&mut self, depth: DepthBuffer) -> Result<SessionState> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        if depth.width() != image.width() || depth.height() != image.height() {
            return Err(Error::DimensionMismatch {
                source_w: image.width(),
                source_h: image.height(),
                depth_w: depth.width(),
                depth_h: depth.height(),
            });
        }
        self.depth = Some(depth);
        self.depth_report = None;
        Ok(self.state())
    }

    fn estimate_depth(&mut self) -> Result<()> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        let estimate = self.estimator.estimate_with_diagnostics(image)?;
        self.depth = Some(estimate.depth);
        self.depth_report = Some(estimate.report);
        Ok(())
    }

    fn clear_depth(&mut self) {
        self.depth = None;
        self.depth_report = None;
        self.renderer.clear_cache();
    }

    /// Feed a raw tilt sample through the smoother.
    pub fn set_tilt(&mut self, raw: TiltVector) -> TiltVector {
        let max_tilt = self.renderer.options().max_tilt;
        self.tilt = self.smoother.update(raw.clamped(max_tilt));
        self.tilt
    }

    pub fn set_intensity(&mut self, intensity: f32) -> f32 {
        self.intensity = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 100.0) };
        self.intensity
    }

    pub fn reset_tilt(&mut self) {
        self.tilt = TiltVector::ZERO;
        self.smoother.reset();
        self.drag.reset();
        self.orientation.reset();
    }

    pub fn drag_begin(&mut self, x: f32, y: f32) {
        if self.spatial {
            self.drag.begin_at(x, y, self.tilt);
        }
    }

    pub fn drag_move(&mut self, x: f32, y: f32) -> Option<TiltVector> {
        if !self.spatial {
            return None;
        }
        let raw = self.drag.move_to(x, y)?;
        Some(self.set_tilt(raw))
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    pub fn orientation_changed(
        &mut self,
        sample: OrientationSample,
        screen: ScreenOrientation,
    ) -> Option<TiltVector> {
        if !self.spatial {
            return None;
        }
        let raw = self.orientation.update(sample, screen)?;
        Some(self.set_tilt(raw))
    }

    /// Render a parallax frame from the cached depth.
    pub fn render_parallax(&mut self, out_size: (usize, usize)) -> Result<RenderOutput> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        let depth = self.depth.as_ref().ok_or(Error::DepthNotReady)?;
        let settings = RenderSettings::new(self.tilt, self.intensity);
        self.renderer.render(image, depth, settings, out_size)
    }

    /// The frame to display: the plain image when spatial mode is off,
    /// otherwise a parallax render.
    pub fn frame(&mut self, out_size: (usize, usize)) -> Result<Frame<'_>> {
        if self.image.is_none() {
            return Err(Error::NoImage);
        }
        if !self.spatial {
            return self.image.as_ref().map(Frame::Plain).ok_or(Error::NoImage);
        }
        self.render_parallax(out_size).map(Frame::Parallax)
    }

    /// [`frame`](Self::frame) gated by the render throttle; `Ok(None)` means
    /// the request came too soon after the previous frame.
    pub fn frame_throttled(&mut self, now: Instant, out_size: (usize, usize)) -> Result<Option<Frame<'_>>> {
        if !self.throttle.admit(now) {
            return Ok(None);
        }
        self.frame(out_size).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::synthetic;

    fn image() -> PixelBuffer {
        synthetic::disk_on_background(40, 30, (20.0, 15.0), 7.0, [250, 200, 40], [20, 20, 25])
    }

    #[test]
    fn state_machine_follows_image_and_mode() {
        let mut s = ViewerSession::default();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.load_image(image()).unwrap(), SessionState::ImageLoaded);
        assert_eq!(s.set_spatial_mode(true).unwrap(), SessionState::DepthReady);
        assert_eq!(s.load_image(image()).unwrap(), SessionState::DepthReady);
        assert_eq!(s.set_spatial_mode(false).unwrap(), SessionState::ImageLoaded);
        assert!(s.depth().is_none());
    }

    #[test]
    fn parallax_without_depth_is_an_error() {
        let mut s = ViewerSession::default();
        assert_eq!(s.render_parallax((40, 30)).unwrap_err(), Error::NoImage);
        s.load_image(image()).unwrap();
        assert_eq!(s.render_parallax((40, 30)).unwrap_err(), Error::DepthNotReady);
        assert!(matches!(s.frame((40, 30)).unwrap(), Frame::Plain(_)));
    }

    #[test]
    fn intensity_is_clamped_to_ui_range() {
        let mut s = ViewerSession::default();
        assert_eq!(s.set_intensity(150.0), 100.0);
        assert_eq!(s.set_intensity(-3.0), 0.0);
    }

    #[test]
    fn set_depth_validates_dimensions() {
        let mut s = ViewerSession::default();
        assert_eq!(s.set_depth(DepthBuffer::filled(40, 30, 0)).unwrap_err(), Error::NoImage);
        s.load_image(image()).unwrap();
        assert!(matches!(
            s.set_depth(DepthBuffer::filled(4, 3, 0)),
            Err(Error::DimensionMismatch { .. })
        ));
        assert_eq!(s.set_depth(DepthBuffer::filled(40, 30, 0)).unwrap(), SessionState::DepthReady);
    }

    #[test]
    fn input_is_ignored_outside_spatial_mode() {
        let mut s = ViewerSession::default();
        s.load_image(image()).unwrap();
        s.drag_begin(0.0, 0.0);
        assert_eq!(s.drag_move(10.0, 10.0), None);
        s.set_spatial_mode(true).unwrap();
        s.drag_begin(0.0, 0.0);
        let t = s.drag_move(10.0, 0.0).unwrap();
        assert!((t.y - 3.0).abs() < 1e-5);
        s.reset_tilt();
        assert_eq!(s.tilt(), TiltVector::ZERO);
    }

    #[test]
    fn drag_continues_from_the_current_tilt() {
        let mut s = ViewerSession::default();
        s.load_image(image()).unwrap();
        s.set_spatial_mode(true).unwrap();
        let before = s.set_tilt(TiltVector::new(20.0, 0.0));
        s.drag_begin(0.0, 0.0);
        let after = s.drag_move(0.0, 1.0).unwrap();
        assert!((after.x - before.x).abs() < 1.0, "{before:?} -> {after:?}");
        assert!(after.x > before.x);
    }
}
