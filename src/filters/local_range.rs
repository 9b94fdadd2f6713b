//! Separable min/max filters over a square window.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Per-pixel minimum and maximum over the `(2r+1)²` window, borders clamped.
pub fn local_min_max(src: &ImageF32, radius: usize) -> (ImageF32, ImageF32) {
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || radius == 0 {
        return (src.clone(), src.clone());
    }
    let r = radius as isize;

    let mut hmin = ImageF32::new(w, h);
    let mut hmax = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for dx in -r..=r {
                let v = row[(x as isize + dx).clamp(0, w as isize - 1) as usize];
                lo = lo.min(v);
                hi = hi.max(v);
            }
            hmin.set(x, y, lo);
            hmax.set(x, y, hi);
        }
    }

    let mut vmin = ImageF32::new(w, h);
    let mut vmax = ImageF32::new(w, h);
    for y in 0..h {
        for dy in -r..=r {
            let sy = (y as isize + dy).clamp(0, h as isize - 1) as usize;
            let (src_lo, src_hi) = (hmin.row(sy), hmax.row(sy));
            let dst_lo = vmin.row_mut(y);
            for (d, &s) in dst_lo.iter_mut().zip(src_lo) {
                *d = if dy == -r { s } else { d.min(s) };
            }
            let dst_hi = vmax.row_mut(y);
            for (d, &s) in dst_hi.iter_mut().zip(src_hi) {
                *d = if dy == -r { s } else { d.max(s) };
            }
        }
    }
    (vmin, vmax)
}

/// `max − min` over the window: high on texture and edges, zero on flat areas.
pub fn local_range(src: &ImageF32, radius: usize) -> ImageF32 {
    let (lo, hi) = local_min_max(src, radius);
    let data = hi.data.iter().zip(&lo.data).map(|(a, b)| a - b).collect();
    ImageF32 {
        w: src.w,
        h: src.h,
        data,
    }
}
