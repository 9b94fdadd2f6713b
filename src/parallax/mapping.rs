//! Destination-to-source coordinate mapping.
//!
//! For an output pixel `o` the source coordinate is
//!
//! ```text
//! n     = o · (src / out)                    scaled into source space
//! n     = c + (n − c) / (1 + margin)         ScaleMargin only
//! persp = 1 + nd · I · k
//! p     = clamp(nd · I · g · tilt / max_tilt, ±max_shift)   per axis
//! s     = c + ((n − p) − c) / persp + diag
//! ```
//!
//! where `nd ∈ [-1, 1]` is the eased depth at `n` and `I` the effective
//! intensity. Tilt `y` drives the horizontal axis and tilt `x` the vertical.
use super::options::{EdgeStrategy, RenderOptions};
use crate::color::{logistic, smoothstep};
use crate::types::TiltVector;
use nalgebra::Vector2;

/// Map a 0..1 depth through the sigmoid (optionally mixed with smoothstep)
/// and recentre to `[-1, 1]`.
pub fn eased_depth(depth: f32, steepness: f32, smoothstep_mix: f32) -> f32 {
    let s = logistic(depth.clamp(0.0, 1.0), steepness, 0.5);
    let mix = smoothstep_mix.clamp(0.0, 1.0);
    let eased = s * (1.0 - mix) + smoothstep(s) * mix;
    (eased - 0.5) * 2.0
}

/// Per-frame constants of the mapping.
#[derive(Clone, Copy, Debug)]
pub struct FrameGeometry {
    pub src_size: Vector2<f32>,
    pub center: Vector2<f32>,
    /// Output-to-source scale per axis.
    pub scale: Vector2<f32>,
    pub max_shift: Vector2<f32>,
    pub zoom: f32,
    pub tilt: TiltVector,
    pub intensity: f32,
    // tilt / max_tilt with the axes swapped: x ← tilt.y, y ← tilt.x
    tilt_axes: Vector2<f32>,
    parallax_gain: Vector2<f32>,
    perspective_k: f32,
    diagonal_gain: f32,
    diagonal_strength: f32,
}

impl FrameGeometry {
    /// `tilt` must already be clamped to `±max_tilt` and `intensity` to the
    /// renderer's safe range.
    pub fn new(
        src: (usize, usize),
        out: (usize, usize),
        tilt: TiltVector,
        intensity: f32,
        options: &RenderOptions,
    ) -> Self {
        let src_size = Vector2::new(src.0 as f32, src.1 as f32);
        let out_size = Vector2::new(out.0.max(1) as f32, out.1.max(1) as f32);
        let max_tilt = options.max_tilt.abs().max(f32::EPSILON);
        let zoom = match options.edge_strategy {
            EdgeStrategy::Clamp => 1.0,
            EdgeStrategy::ScaleMargin { margin } => 1.0 + margin.max(0.0),
        };
        let gate_deg = options.diagonal_gate_deg.max(f32::EPSILON);
        let diagonal_gate = smoothstep(tilt.x.abs().min(tilt.y.abs()) / gate_deg);
        Self {
            src_size,
            center: src_size / 2.0,
            scale: src_size.component_div(&out_size),
            max_shift: src_size * options.max_shift_fraction.max(0.0),
            zoom,
            tilt,
            intensity,
            tilt_axes: Vector2::new(tilt.y, tilt.x) / max_tilt,
            parallax_gain: Vector2::new(options.parallax_gain_x, options.parallax_gain_y),
            perspective_k: options.perspective_k,
            diagonal_gain: options.diagonal_gain,
            diagonal_strength: tilt.magnitude() / max_tilt * diagonal_gate,
        }
    }

    /// Where output pixel `(x, y)` lands in source space before any
    /// displacement.
    pub fn base_coordinate(&self, x: usize, y: usize) -> Vector2<f32> {
        let n = Vector2::new(x as f32, y as f32).component_mul(&self.scale);
        if self.zoom == 1.0 {
            n
        } else {
            self.center + (n - self.center) / self.zoom
        }
    }

    /// Displaced, unclamped source coordinate for base coordinate `n` with
    /// eased depth `nd`.
    pub fn displace(&self, n: Vector2<f32>, nd: f32) -> Vector2<f32> {
        let i = self.intensity;
        let persp = (1.0 + nd * i * self.perspective_k).max(0.05);
        let raw_shift = self.parallax_gain.component_mul(&self.tilt_axes) * (nd * i);
        let shift = clamp_vec(raw_shift, self.max_shift);

        let extra = (nd * self.diagonal_strength * i * self.diagonal_gain)
            .clamp(-self.max_shift.x, self.max_shift.x);
        let diag = Vector2::new(extra * self.tilt_axes.x * 0.5, extra * self.tilt_axes.y * 0.3);

        self.center + ((n - shift) - self.center) / persp + diag
    }

    /// Clamp into `[0, w−1] × [0, h−1]`.
    pub fn clamp_to_source(&self, s: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(
            finite_or(s.x, self.center.x).clamp(0.0, (self.src_size.x - 1.0).max(0.0)),
            finite_or(s.y, self.center.y).clamp(0.0, (self.src_size.y - 1.0).max(0.0)),
        )
    }
}

fn clamp_vec(v: Vector2<f32>, limit: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(v.x.clamp(-limit.x, limit.x), v.y.clamp(-limit.y, limit.y))
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(tilt: TiltVector, intensity: f32) -> FrameGeometry {
        FrameGeometry::new((400, 300), (400, 300), tilt, intensity, &RenderOptions::default())
    }

    #[test]
    fn easing_is_odd_about_mid_depth() {
        assert!(eased_depth(0.5, 6.0, 0.0).abs() < 1e-6);
        let near = eased_depth(1.0, 6.0, 0.0);
        let far = eased_depth(0.0, 6.0, 0.0);
        assert!((near + far).abs() < 1e-5);
        assert!(near > 0.9 && near < 1.0);
        assert!(eased_depth(1.0, 6.0, 1.0) > near);
    }

    #[test]
    fn zero_intensity_is_identity() {
        let g = geometry(TiltVector::new(30.0, -20.0), 0.0);
        let n = g.base_coordinate(17, 230);
        assert_eq!(g.displace(n, 0.8), n);
    }

    #[test]
    fn horizontal_shift_follows_tilt_y_and_is_capped() {
        let g = geometry(TiltVector::new(0.0, 45.0), 60.0);
        let n = Vector2::new(200.0, 150.0);
        let s = g.displace(n, 1.0);
        // at the centre only the shift survives the perspective division
        let expected = -(1.0f32 * 60.0 * 0.18).min(20.0) / (1.0 + 60.0 * 0.008);
        assert!((s.x - 200.0 - expected).abs() < 1e-3, "{}", s.x);
        assert!((s.y - 150.0).abs() < 1e-4);
    }

    #[test]
    fn diagonal_term_needs_both_axes() {
        let n = Vector2::new(200.0, 150.0);
        let single = geometry(TiltVector::new(0.0, 30.0), 40.0);
        assert_eq!(single.diagonal_strength, 0.0);
        let both = geometry(TiltVector::new(30.0, 30.0), 40.0);
        assert!(both.diagonal_strength > 0.9);
        assert!(both.displace(n, 1.0) != n);
    }

    #[test]
    fn scale_margin_zooms_about_centre() {
        let options = RenderOptions {
            edge_strategy: EdgeStrategy::ScaleMargin { margin: 0.15 },
            ..RenderOptions::default()
        };
        let g = FrameGeometry::new((400, 300), (400, 300), TiltVector::ZERO, 0.0, &options);
        let corner = g.base_coordinate(0, 0);
        assert!((corner.x - (200.0 - 200.0 / 1.15)).abs() < 1e-3);
        assert_eq!(g.base_coordinate(200, 150), Vector2::new(200.0, 150.0));
    }

    #[test]
    fn clamping_handles_extremes_and_nan() {
        let g = geometry(TiltVector::ZERO, 0.0);
        let c = g.clamp_to_source(Vector2::new(-1e9, f32::NAN));
        assert_eq!(c, Vector2::new(0.0, 150.0));
        let c = g.clamp_to_source(Vector2::new(1e9, 1e9));
        assert_eq!(c, Vector2::new(399.0, 299.0));
    }
}
