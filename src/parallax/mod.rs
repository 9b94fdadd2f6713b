//! Parallax rendering by inverse (destination-to-source) mapping.
//!
//! Every output pixel computes the source location it shows, so the frame is
//! always fully covered. Per pixel:
//! 1. map to source space and look up the (optionally prefiltered) depth;
//! 2. ease the depth and displace with perspective, parallax and diagonal
//!    terms ([`mapping`]);
//! 3. clamp into the source and sample ([`sampling`]);
//! 4. apply depth shading and directional lighting ([`shading`]);
//! 5. write opaque RGB.
//!
//! Intensity is clamped to `max_intensity`; requests above
//! `recommended_intensity` still render but come back with an
//! [`IntensityWarning`]. With zero tilt and zero intensity the renderer takes
//! a fast path that copies the sampled source without shading.
pub mod cache;
pub mod mapping;
pub mod options;
pub mod sampling;
pub mod shading;

pub use cache::{DepthFingerprint, PrefilterCache};
pub use mapping::{eased_depth, FrameGeometry};
pub use options::{EdgeStrategy, LightingOptions, Prefilter, RenderOptions, Sampling};

use crate::diagnostics::timing::elapsed_ms;
use crate::error::{ensure_non_empty, Error, Result};
use crate::image::{DepthBuffer, ImageView, PixelBuffer};
use crate::types::{IntensityWarning, RenderSettings};
use log::{debug, warn};
use nalgebra::Vector2;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One rendered frame.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub frame: PixelBuffer,
    pub warning: Option<IntensityWarning>,
    /// Intensity actually applied after clamping.
    pub effective_intensity: f32,
    /// Whether the bilateral prefilter was used for this frame.
    pub prefiltered: bool,
    pub elapsed_ms: f64,
}

/// Renders parallax frames from a source image and its depth map.
///
/// The only state is the prefiltered-depth cache; output depends on the
/// inputs alone.
#[derive(Debug, Default)]
pub struct ParallaxRenderer {
    options: RenderOptions,
    cache: PrefilterCache,
}

impl ParallaxRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            cache: PrefilterCache::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn cache(&self) -> &PrefilterCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Requested intensity clamped to `[0, max_intensity]`; NaN renders as 0.
    pub fn effective_intensity(&self, requested: f32) -> f32 {
        if requested.is_nan() {
            0.0
        } else {
            requested.clamp(0.0, self.options.max_intensity.max(0.0))
        }
    }

    pub fn intensity_warning(&self, requested: f32) -> Option<IntensityWarning> {
        (requested > self.options.recommended_intensity).then(|| IntensityWarning {
            requested,
            recommended: self.options.recommended_intensity,
            applied: self.effective_intensity(requested),
        })
    }

    /// Unclamped source coordinate sampled by output pixel `out_xy`.
    ///
    /// `depth` stands in for the source dimensions and is used as is, without
    /// the prefilter.
    pub fn source_coordinate(
        &self,
        depth: &DepthBuffer,
        settings: RenderSettings,
        out_size: (usize, usize),
        out_xy: (usize, usize),
    ) -> Vector2<f32> {
        let geo = self.geometry((depth.width(), depth.height()), out_size, settings);
        let n = geo.base_coordinate(out_xy.0, out_xy.1);
        if depth.is_empty() {
            return n;
        }
        geo.displace(n, lookup_eased(depth, &geo, n, &self.options))
    }

    /// Render a frame of `out_size` pixels.
    pub fn render(
        &mut self,
        source: &PixelBuffer,
        depth: &DepthBuffer,
        settings: RenderSettings,
        out_size: (usize, usize),
    ) -> Result<RenderOutput> {
        let start = Instant::now();
        let (src_w, src_h) = (source.width(), source.height());
        ensure_non_empty(src_w, src_h)?;
        ensure_non_empty(out_size.0, out_size.1)?;
        if depth.width() != src_w || depth.height() != src_h {
            return Err(Error::DimensionMismatch {
                source_w: src_w,
                source_h: src_h,
                depth_w: depth.width(),
                depth_h: depth.height(),
            });
        }

        let warning = self.intensity_warning(settings.intensity);
        if let Some(w) = &warning {
            warn!("ParallaxRenderer::render {}", w);
        }
        let geo = self.geometry((src_w, src_h), out_size, settings);
        let identity = geo.tilt.is_zero() && geo.intensity == 0.0;

        let large = source.pixel_count() > self.options.large_image_pixels;
        let (depth_map, prefiltered) = match self.options.prefilter {
            Prefilter::Bilateral(params) if !identity && !large => {
                (self.cache.get_or_filter(depth, params), true)
            }
            _ => (depth, false),
        };
        if large && matches!(self.options.prefilter, Prefilter::Bilateral(_)) {
            debug!(
                "ParallaxRenderer::render skipping prefilter for large image {}x{}",
                src_w, src_h
            );
        }

        let mut frame = PixelBuffer::new(out_size.0, out_size.1);
        let ctx = RowContext {
            source,
            depth: depth_map,
            geo,
            options: &self.options,
            identity,
        };
        let row_len = out_size.0 * 4;

        #[cfg(feature = "parallel")]
        frame
            .data_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| ctx.render_row(y, row));
        #[cfg(not(feature = "parallel"))]
        frame
            .data_mut()
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| ctx.render_row(y, row));

        let elapsed = elapsed_ms(start);
        debug!(
            "ParallaxRenderer::render {}x{} -> {}x{} tilt=({:.2}, {:.2}) intensity={:.1} identity={} prefiltered={} elapsed_ms={:.2}",
            src_w,
            src_h,
            out_size.0,
            out_size.1,
            geo.tilt.x,
            geo.tilt.y,
            geo.intensity,
            identity,
            prefiltered,
            elapsed
        );
        Ok(RenderOutput {
            frame,
            warning,
            effective_intensity: geo.intensity,
            prefiltered,
            elapsed_ms: elapsed,
        })
    }

    fn geometry(&self, src: (usize, usize), out: (usize, usize), settings: RenderSettings) -> FrameGeometry {
        let tilt = settings.tilt.clamped(self.options.max_tilt);
        let intensity = self.effective_intensity(settings.intensity);
        FrameGeometry::new(src, out, tilt, intensity, &self.options)
    }
}

fn lookup_eased(depth: &DepthBuffer, geo: &FrameGeometry, n: Vector2<f32>, options: &RenderOptions) -> f32 {
    let c = geo.clamp_to_source(n);
    let x = (c.x.round() as usize).min(depth.width().saturating_sub(1));
    let y = (c.y.round() as usize).min(depth.height().saturating_sub(1));
    eased_depth(depth.get_normalized(x, y), options.sigmoid_steepness, options.smoothstep_mix)
}

struct RowContext<'a> {
    source: &'a PixelBuffer,
    depth: &'a DepthBuffer,
    geo: FrameGeometry,
    options: &'a RenderOptions,
    identity: bool,
}

impl RowContext<'_> {
    fn render_row(&self, y: usize, row: &mut [u8]) {
        let o = self.options;
        let strength = if o.recommended_intensity > 0.0 {
            (self.geo.intensity / o.recommended_intensity).min(1.0)
        } else {
            1.0
        };
        let max_tilt = o.max_tilt.abs().max(f32::EPSILON);
        let tilt_dir = Vector2::new(self.geo.tilt.y, self.geo.tilt.x) / max_tilt;

        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let n = self.geo.base_coordinate(x, y);
            let rgb = if self.identity {
                let s = self.geo.clamp_to_source(n);
                sampling::sample_rgb(self.source, s, o.sampling)
            } else {
                let nd = lookup_eased(self.depth, &self.geo, n, o);
                let s = self.geo.clamp_to_source(self.geo.displace(n, nd));
                let rgb = sampling::sample_rgb(self.source, s, o.sampling);
                let (sx, sy) = sampling::nearest_index(self.source, s);
                let shadow = shading::shadow_factor(
                    self.depth.get_normalized(sx, sy),
                    o.shadow_intensity,
                    strength,
                );
                let light = shading::lighting_factor(self.depth, sx, sy, tilt_dir, strength, &o.lighting);
                let k = shadow * light;
                [rgb[0] * k, rgb[1] * k, rgb[2] * k]
            };
            px[0] = to_u8(rgb[0]);
            px[1] = to_u8(rgb[1]);
            px[2] = to_u8(rgb[2]);
            px[3] = 255;
        }
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
