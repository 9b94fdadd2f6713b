//! Depth-based shading and directional lighting multipliers.
use super::options::LightingOptions;
use crate::image::{DepthBuffer, ImageView};
use nalgebra::Vector2;

/// `1 − (1 − depth) · shadow_intensity · strength`: far content darkens.
#[inline]
pub fn shadow_factor(depth: f32, shadow_intensity: f32, strength: f32) -> f32 {
    1.0 - (1.0 - depth.clamp(0.0, 1.0)) * shadow_intensity * strength
}

/// Brightness multiplier from the depth slope at `(x, y)` projected on the
/// (normalised) tilt direction, clamped to `[min, max]`.
pub fn lighting_factor(
    depth: &DepthBuffer,
    x: usize,
    y: usize,
    tilt_dir: Vector2<f32>,
    strength: f32,
    options: &LightingOptions,
) -> f32 {
    if !options.enabled || strength == 0.0 {
        return 1.0;
    }
    let slope = depth_slope(depth, x, y);
    let v = 1.0 + options.gain * strength * slope.dot(&tilt_dir);
    v.clamp(options.min.min(options.max), options.max.max(options.min))
}

/// Central-difference depth gradient in normalised units.
fn depth_slope(depth: &DepthBuffer, x: usize, y: usize) -> Vector2<f32> {
    let max_x = depth.width().saturating_sub(1);
    let max_y = depth.height().saturating_sub(1);
    let left = depth.get_normalized(x.saturating_sub(1), y);
    let right = depth.get_normalized((x + 1).min(max_x), y);
    let up = depth.get_normalized(x, y.saturating_sub(1));
    let down = depth.get_normalized(x, (y + 1).min(max_y));
    Vector2::new(right - left, down - up) * 0.5
}
