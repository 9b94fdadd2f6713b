//! Colour-space conversions and scalar curves shared by segmentation,
//! depth scoring and the renderer's easing.
//!
//! Inputs are RGB on the 0–255 scale as `f32`.

/// Hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Hexcone conversion. Hue is 0 for achromatic input and saturation is 0
    /// for black.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let mut h = 0.0;
        if delta > 0.0 {
            h = if max == r {
                ((g - b) / delta).rem_euclid(6.0)
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            h *= 60.0;
            if h < 0.0 {
                h += 360.0;
            }
        }
        let s = if max > 0.0 { delta / max * 100.0 } else { 0.0 };
        let v = max / 255.0 * 100.0;
        Self { h, s, v }
    }
}

/// Full-range BT.601 luma/chroma.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YCbCr {
    pub y: f32,
    pub cb: f32,
    pub cr: f32,
}

impl YCbCr {
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            y: 0.299 * r + 0.587 * g + 0.114 * b,
            cb: 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b,
            cr: 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b,
        }
    }
}

/// Mean of the three channels (0–255).
#[inline]
pub fn luma_mean(rgb: [f32; 3]) -> f32 {
    (rgb[0] + rgb[1] + rgb[2]) / 3.0
}

/// HSV saturation in percent.
#[inline]
pub fn saturation_percent(rgb: [f32; 3]) -> f32 {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    if max > 0.0 {
        (max - min) / max * 100.0
    } else {
        0.0
    }
}

/// Euclidean distance between two RGB triples.
#[inline]
pub fn rgb_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Logistic curve `1 / (1 + e^{-k (x - x0)})`.
#[inline]
pub fn logistic(x: f32, steepness: f32, midpoint: f32) -> f32 {
    1.0 / (1.0 + (-steepness * (x - midpoint)).exp())
}

/// Cubic smoothstep on `t` clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn hsv_primaries() {
        let red = Hsv::from_rgb(255.0, 0.0, 0.0);
        assert!(close(red.h, 0.0) && close(red.s, 100.0) && close(red.v, 100.0));
        let green = Hsv::from_rgb(0.0, 255.0, 0.0);
        assert!(close(green.h, 120.0));
        let blue = Hsv::from_rgb(0.0, 0.0, 255.0);
        assert!(close(blue.h, 240.0));
        let magenta_ish = Hsv::from_rgb(255.0, 0.0, 128.0);
        assert!(magenta_ish.h > 300.0 && magenta_ish.h < 360.0);
    }

    #[test]
    fn hsv_achromatic_has_no_hue_or_saturation() {
        let gray = Hsv::from_rgb(90.0, 90.0, 90.0);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_eq!(Hsv::from_rgb(0.0, 0.0, 0.0).s, 0.0);
    }

    #[test]
    fn ycbcr_neutral_gray_has_centred_chroma() {
        let c = YCbCr::from_rgb(128.0, 128.0, 128.0);
        assert!(close(c.y, 128.0));
        assert!(close(c.cb, 128.0));
        assert!(close(c.cr, 128.0));
    }

    #[test]
    fn curves_are_bounded_and_centred() {
        assert!(close(logistic(0.5, 6.0, 0.5), 0.5));
        assert!(logistic(10.0, 6.0, 0.5) < 1.0 + 1e-6);
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
        assert!(close(smoothstep(0.5), 0.5));
    }
}
