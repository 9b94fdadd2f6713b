//! Source sampling at clamped, fractional coordinates.
use super::options::Sampling;
use crate::image::PixelBuffer;
use nalgebra::Vector2;

/// Sample RGB at `s`, which must already lie inside the source bounds.
#[inline]
pub fn sample_rgb(src: &PixelBuffer, s: Vector2<f32>, mode: Sampling) -> [f32; 3] {
    match mode {
        Sampling::Nearest => {
            let (x, y) = nearest_index(src, s);
            src.rgb(x, y)
        }
        Sampling::Bilinear => bilinear(src, s),
    }
}

/// Rounded pixel index of `s`, clamped to the buffer.
#[inline]
pub fn nearest_index(src: &PixelBuffer, s: Vector2<f32>) -> (usize, usize) {
    let x = (s.x.round().max(0.0) as usize).min(src.width().saturating_sub(1));
    let y = (s.y.round().max(0.0) as usize).min(src.height().saturating_sub(1));
    (x, y)
}

fn bilinear(src: &PixelBuffer, s: Vector2<f32>) -> [f32; 3] {
    let max_x = src.width().saturating_sub(1);
    let max_y = src.height().saturating_sub(1);
    let x0 = (s.x.floor().max(0.0) as usize).min(max_x);
    let y0 = (s.y.floor().max(0.0) as usize).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = (s.x - x0 as f32).clamp(0.0, 1.0);
    let fy = (s.y - y0 as f32).clamp(0.0, 1.0);

    let p00 = src.rgb(x0, y0);
    let p10 = src.rgb(x1, y0);
    let p01 = src.rgb(x0, y1);
    let p11 = src.rgb(x1, y1);
    let mut out = [0.0; 3];
    for c in 0..3 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = top + (bottom - top) * fy;
    }
    out
}
