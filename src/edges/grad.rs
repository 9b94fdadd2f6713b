//! Image gradients (Sobel) with magnitude.
//!
//! - Convolves a 3×3 kernel pair (`X` and `Y`) with border clamping.
//! - Outputs per‑pixel `gx`, `gy`, `mag = sqrt(gx^2+gy^2)`.
//!
//! Complexity: O(W·H) per pass; memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

impl Grad {
    /// Largest magnitude in the map (0 for empty or flat input).
    pub fn max_magnitude(&self) -> f32 {
        self.mag.min_max().map(|(_, hi)| hi).unwrap_or(0.0)
    }
}

#[inline]
fn correlate3(rows: &[&[f32]; 3], cols: [usize; 3], kernel: &Kernel3) -> f32 {
    rows.iter()
        .zip(kernel)
        .map(|(row, k)| row[cols[0]] * k[0] + row[cols[1]] * k[1] + row[cols[2]] * k[2])
        .sum()
}

/// Compute Sobel gradients on a single‑channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let (w, h) = (l.w, l.h);
    let mut grad = Grad {
        gx: ImageF32::new(w, h),
        gy: ImageF32::new(w, h),
        mag: ImageF32::new(w, h),
    };
    if l.is_empty() {
        return grad;
    }

    for y in 0..h {
        let rows = [l.row(y.saturating_sub(1)), l.row(y), l.row((y + 1).min(h - 1))];
        for x in 0..w {
            let cols = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let gx = correlate3(&rows, cols, &SOBEL_KERNEL_X);
            let gy = correlate3(&rows, cols, &SOBEL_KERNEL_Y);
            grad.gx.row_mut(y)[x] = gx;
            grad.gy.row_mut(y)[x] = gy;
            grad.mag.row_mut(y)[x] = gx.hypot(gy);
        }
    }
    grad
}
