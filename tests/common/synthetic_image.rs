use spatial_parallax::image::synthetic::disk_on_background;
use spatial_parallax::PixelBuffer;

pub const DISK_FG: [u8; 3] = [250, 200, 40];
pub const DISK_BG: [u8; 3] = [20, 20, 25];

/// 400×300 bright disk of radius 50 at (120, 90) over a dark, flat background.
pub fn bright_disk_scene() -> PixelBuffer {
    disk_on_background(400, 300, (120.0, 90.0), 50.0, DISK_FG, DISK_BG)
}

/// Smaller variant centred in the frame.
pub fn centred_disk(width: usize, height: usize, radius: f32) -> PixelBuffer {
    disk_on_background(
        width,
        height,
        (width as f32 / 2.0, height as f32 / 2.0),
        radius,
        DISK_FG,
        DISK_BG,
    )
}

/// Whether a rendered pixel still reads as the disk colour after shading.
pub fn is_disk_pixel(px: [u8; 4]) -> bool {
    px[0] > 150 && px[2] < 120
}

/// Centroid of the disk-coloured pixels, or `None` if there are none.
pub fn disk_centroid(frame: &PixelBuffer) -> Option<(f32, f32)> {
    let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            if is_disk_pixel(frame.get(x, y)) {
                sx += x as f64;
                sy += y as f64;
                n += 1;
            }
        }
    }
    (n > 0).then(|| ((sx / n as f64) as f32, (sy / n as f64) as f32))
}
