//! Renderer parameters.
//!
//! All constants are tunable; the defaults reproduce the viewer's look.
//! Intensities are on the UI scale `0..=100`, tilts in degrees.
use crate::filters::BilateralParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Nearest,
    #[default]
    Bilinear,
}

/// How displaced samples near the image edges are kept inside the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EdgeStrategy {
    /// Clamp sample coordinates to the source bounds (edge stretch).
    #[default]
    Clamp,
    /// Zoom the view in by `1 + margin` about the centre so shifts stay
    /// inside the image, then clamp.
    ScaleMargin { margin: f32 },
}

/// Optional edge-preserving filter applied to the depth map before mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prefilter {
    #[default]
    None,
    Bilateral(BilateralParams),
}

/// Directional highlight from the local depth slope along the tilt direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingOptions {
    pub enabled: bool,
    pub gain: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            gain: 1.5,
            min: 0.9,
            max: 1.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Hard ceiling; requests above it render as if at the ceiling.
    pub max_intensity: f32,
    /// Requests above this raise an [`IntensityWarning`](crate::IntensityWarning).
    pub recommended_intensity: f32,
    /// Tilt (degrees) mapped to full displacement.
    pub max_tilt: f32,
    pub perspective_k: f32,
    /// Horizontal shift gain, driven by tilt `y`.
    pub parallax_gain_x: f32,
    /// Vertical shift gain, driven by tilt `x`.
    pub parallax_gain_y: f32,
    pub diagonal_gain: f32,
    /// The diagonal term fades in as the smaller tilt axis reaches this angle.
    pub diagonal_gate_deg: f32,
    /// Per-axis displacement cap as a fraction of the source dimension.
    pub max_shift_fraction: f32,
    pub sigmoid_steepness: f32,
    /// Blend between the plain sigmoid (0) and sigmoid-then-smoothstep (1).
    pub smoothstep_mix: f32,
    /// Darkening of the farthest depth at full strength.
    pub shadow_intensity: f32,
    pub lighting: LightingOptions,
    pub sampling: Sampling,
    pub edge_strategy: EdgeStrategy,
    pub prefilter: Prefilter,
    /// Source size above which the depth prefilter is skipped.
    pub large_image_pixels: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_intensity: 60.0,
            recommended_intensity: 40.0,
            max_tilt: 45.0,
            perspective_k: 0.008,
            parallax_gain_x: 0.18,
            parallax_gain_y: 0.13,
            diagonal_gain: 0.05,
            diagonal_gate_deg: 15.0,
            max_shift_fraction: 0.05,
            sigmoid_steepness: 6.0,
            smoothstep_mix: 1.0,
            shadow_intensity: 0.13,
            lighting: LightingOptions::default(),
            sampling: Sampling::Bilinear,
            edge_strategy: EdgeStrategy::Clamp,
            prefilter: Prefilter::None,
            large_image_pixels: 2_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_enums_deserialize() {
        let o: RenderOptions = serde_json::from_str(
            r#"{
                "sampling": "nearest",
                "edge_strategy": { "mode": "scale_margin", "margin": 0.15 },
                "prefilter": { "kind": "bilateral", "radius": 2 }
            }"#,
        )
        .unwrap();
        assert_eq!(o.sampling, Sampling::Nearest);
        assert_eq!(o.edge_strategy, EdgeStrategy::ScaleMargin { margin: 0.15 });
        match o.prefilter {
            Prefilter::Bilateral(p) => assert_eq!(p.radius, 2),
            Prefilter::None => panic!("expected bilateral prefilter"),
        }
        assert_eq!(o.max_intensity, 60.0);
    }

    #[test]
    fn default_easing_applies_smoothstep_after_sigmoid() {
        let o = RenderOptions::default();
        assert_eq!(o.smoothstep_mix, 1.0);
        let s = crate::color::logistic(0.8, o.sigmoid_steepness, 0.5);
        let expected = (s * s * (3.0 - 2.0 * s) - 0.5) * 2.0;
        let eased = crate::parallax::eased_depth(0.8, o.sigmoid_steepness, o.smoothstep_mix);
        assert!((eased - expected).abs() < 1e-5);
    }
}
