//! Deterministic synthetic images for demos and tests.
use super::PixelBuffer;

/// Flat colour image.
pub fn uniform(width: usize, height: usize, rgb: [u8; 3]) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| [rgb[0], rgb[1], rgb[2], 255])
}

/// A filled disk of colour `fg` centred at `center` over a flat `bg`.
pub fn disk_on_background(
    width: usize,
    height: usize,
    center: (f32, f32),
    radius: f32,
    fg: [u8; 3],
    bg: [u8; 3],
) -> PixelBuffer {
    let r2 = radius * radius;
    PixelBuffer::from_fn(width, height, |x, y| {
        let dx = x as f32 - center.0;
        let dy = y as f32 - center.1;
        let c = if dx * dx + dy * dy <= r2 { fg } else { bg };
        [c[0], c[1], c[2], 255]
    })
}

/// The viewer's built-in 400×300 sample: a diagonal three-stop gradient with
/// a white disk, an orange square and a cyan triangle.
pub fn sample_scene() -> PixelBuffer {
    const W: usize = 400;
    const H: usize = 300;
    const STOPS: [(f32, [f32; 3]); 3] = [
        (0.0, [255.0, 107.0, 107.0]),
        (0.5, [78.0, 205.0, 196.0]),
        (1.0, [69.0, 183.0, 209.0]),
    ];
    let (wf, hf) = (W as f32, H as f32);
    let diag2 = wf * wf + hf * hf;
    let disk = ((wf * 0.3, hf * 0.3), 50.0f32);
    let square = (wf * 0.6, hf * 0.2, 80.0f32);
    let tri = [
        (wf * 0.2, hf * 0.8),
        (wf * 0.5, hf * 0.6),
        (wf * 0.35, hf * 0.9),
    ];

    PixelBuffer::from_fn(W, H, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let dx = px - disk.0 .0;
        let dy = py - disk.0 .1;
        if dx * dx + dy * dy <= disk.1 * disk.1 {
            return [255, 255, 255, 255];
        }
        if px >= square.0 && px < square.0 + square.2 && py >= square.1 && py < square.1 + square.2 {
            return [255, 159, 67, 255];
        }
        if in_triangle((px, py), tri) {
            return [0, 210, 211, 255];
        }
        let t = ((px * wf + py * hf) / diag2).clamp(0.0, 1.0);
        let rgb = gradient_at(&STOPS, t);
        [rgb[0], rgb[1], rgb[2], 255]
    })
}

fn gradient_at(stops: &[(f32, [f32; 3])], t: f32) -> [u8; 3] {
    let mut out = stops[stops.len() - 1].1;
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            out = [
                c0[0] + (c1[0] - c0[0]) * f,
                c0[1] + (c1[1] - c0[1]) * f,
                c0[2] + (c1[2] - c0[2]) * f,
            ];
            break;
        }
    }
    out.map(|c| c.round().clamp(0.0, 255.0) as u8)
}

fn in_triangle(p: (f32, f32), t: [(f32, f32); 3]) -> bool {
    let sign = |a: (f32, f32), b: (f32, f32), c: (f32, f32)| {
        (a.0 - c.0) * (b.1 - c.1) - (b.0 - c.0) * (a.1 - c.1)
    };
    let d1 = sign(p, t[0], t[1]);
    let d2 = sign(p, t[1], t[2]);
    let d3 = sign(p, t[2], t[0]);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
