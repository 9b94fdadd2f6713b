//! Seeded region growing over colour similarity.
//!
//! Seeds are sampled on a sparse grid; each seed floods 4-connected
//! neighbours whose RGB distance to the *seed* colour stays below a
//! threshold. The fill uses an explicit FIFO worklist and a shared visited
//! set, so every pixel is claimed at most once.
use crate::color::rgb_distance;
use crate::image::{ImageView, PixelBuffer, SubjectMask};
use std::collections::VecDeque;

/// Grow `mask` in place from the grid points of `seeds` (every `stride`
/// pixels in x and y) and return the number of newly marked pixels.
pub fn grow_regions(
    mask: &mut SubjectMask,
    image: &PixelBuffer,
    seeds: &SubjectMask,
    stride: usize,
    max_distance: f32,
) -> usize {
    let (w, h) = (seeds.width(), seeds.height());
    let stride = stride.max(1);
    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::new();
    let mut added = 0usize;

    for sy in (0..h).step_by(stride) {
        for sx in (0..w).step_by(stride) {
            let seed_idx = sy * w + sx;
            if !seeds.get(sx, sy) || visited[seed_idx] {
                continue;
            }
            let seed_rgb = image.rgb(sx, sy);
            visited[seed_idx] = true;
            queue.push_back(seed_idx);

            while let Some(idx) = queue.pop_front() {
                if !mask.get_index(idx) {
                    mask.set_index(idx, true);
                    added += 1;
                }
                let (x, y) = (idx % w, idx / w);
                let neighbors = [
                    (x > 0).then(|| idx - 1),
                    (x + 1 < w).then(|| idx + 1),
                    (y > 0).then(|| idx - w),
                    (y + 1 < h).then(|| idx + w),
                ];
                for n in neighbors.into_iter().flatten() {
                    if visited[n] {
                        continue;
                    }
                    let rgb = image.rgb(n % w, n / w);
                    if rgb_distance(rgb, seed_rgb) < max_distance {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
    }
    added
}
