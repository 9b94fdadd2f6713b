//! Binary morphology on subject masks with a 4-neighbour cross element.
//!
//! The outermost 1-pixel border is never processed: dilation and erosion
//! leave it background, the majority filter leaves it unchanged.
use crate::image::{ImageView, SubjectMask};

pub fn dilate(mask: &SubjectMask) -> SubjectMask {
    cross_filter(mask, |c, l, r, u, d| c || l || r || u || d)
}

pub fn erode(mask: &SubjectMask) -> SubjectMask {
    cross_filter(mask, |c, l, r, u, d| c && l && r && u && d)
}

/// `iterations` erosions followed by as many dilations; removes speckle.
pub fn open(mask: &SubjectMask, iterations: usize) -> SubjectMask {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out);
    }
    for _ in 0..iterations {
        out = dilate(&out);
    }
    out
}

/// `iterations` dilations followed by as many erosions; fills small holes.
pub fn close(mask: &SubjectMask, iterations: usize) -> SubjectMask {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out);
    }
    for _ in 0..iterations {
        out = erode(&out);
    }
    out
}

/// 3×3 majority vote: a pixel becomes subject when at least `on` of the nine
/// cells (itself included) are subject, background when at most `off` are,
/// and keeps its state otherwise.
pub fn majority_smooth(mask: &SubjectMask, on: usize, off: usize) -> SubjectMask {
    let (w, h) = (mask.width(), mask.height());
    let mut out = mask.clone();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut count = 0;
            for yy in y - 1..=y + 1 {
                let row = mask.row(yy);
                count += row[x - 1..=x + 1].iter().filter(|&&v| v).count();
            }
            if count >= on {
                out.set(x, y, true);
            } else if count <= off {
                out.set(x, y, false);
            }
        }
    }
    out
}

fn cross_filter(mask: &SubjectMask, op: impl Fn(bool, bool, bool, bool, bool) -> bool) -> SubjectMask {
    let (w, h) = (mask.width(), mask.height());
    let mut out = SubjectMask::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let v = op(
                mask.get(x, y),
                mask.get(x - 1, y),
                mask.get(x + 1, y),
                mask.get(x, y - 1),
                mask.get(x, y + 1),
            );
            out.set(x, y, v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(w: usize, h: usize, x0: usize, y0: usize, side: usize) -> SubjectMask {
        SubjectMask::from_fn(w, h, |x, y| x >= x0 && x < x0 + side && y >= y0 && y < y0 + side)
    }

    #[test]
    fn opening_removes_isolated_speckle() {
        let mut mask = square(20, 20, 5, 5, 8);
        mask.set(16, 16, true);
        let opened = open(&mask, 2);
        assert!(!opened.get(16, 16));
        assert!(opened.get(9, 9));
    }

    #[test]
    fn closing_fills_pinhole() {
        let mut mask = square(20, 20, 4, 4, 10);
        mask.set(9, 9, false);
        let closed = close(&mask, 2);
        assert!(closed.get(9, 9));
    }

    #[test]
    fn border_stays_background() {
        let mask = SubjectMask::from_fn(6, 6, |_, _| true);
        let d = dilate(&mask);
        assert!(!d.get(0, 3) && !d.get(5, 0));
        assert!(d.get(2, 2));
    }

    #[test]
    fn majority_vote_thresholds() {
        // 4 of 9 set around (2,2): stays as it was
        let mut mask = SubjectMask::new(5, 5);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2)] {
            mask.set(x, y, true);
        }
        assert!(!majority_smooth(&mask, 5, 3).get(2, 2));
        mask.set(3, 2, true);
        assert!(majority_smooth(&mask, 5, 3).get(2, 2));
    }
}
