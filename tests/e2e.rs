mod common;

use common::synthetic_image::{bright_disk_scene, disk_centroid};
use spatial_parallax::{DepthEstimator, DepthOptions, ParallaxRenderer, RenderOptions, RenderSettings, TiltVector};

#[test]
fn bright_disk_reads_near_and_shifts_under_tilt() {
    common::init_logging();
    let image = bright_disk_scene();
    let (w, h) = (image.width(), image.height());

    let depth = DepthEstimator::new(DepthOptions::default())
        .estimate(&image)
        .expect("depth estimation succeeds");
    assert_eq!((depth.width(), depth.height()), (w, h));

    let near = depth.get(120, 90) as i32;
    let far = depth.get(10, 10) as i32;
    assert!(near >= far + 50, "disk centre depth {near} vs corner {far}");

    let options = RenderOptions::default();
    let mut renderer = ParallaxRenderer::new(options.clone());
    let baseline = renderer
        .render(&image, &depth, RenderSettings::new(TiltVector::ZERO, 0.0), (w, h))
        .expect("baseline render");
    let tilted = renderer
        .render(&image, &depth, RenderSettings::new(TiltVector::new(30.0, 0.0), 40.0), (w, h))
        .expect("tilted render");
    assert!(tilted.warning.is_none());

    let (bx, by) = disk_centroid(&baseline.frame).expect("disk visible at rest");
    let (tx, ty) = disk_centroid(&tilted.frame).expect("disk visible when tilted");
    assert!((bx - 120.0).abs() < 1.0 && (by - 90.0).abs() < 1.0, "baseline centroid ({bx}, {by})");

    // The disk sits left of centre, so perspective magnification pulls its
    // centroid left. Bound by the largest perspective factor and the
    // vertical parallax clamp.
    let center = (w as f32 / 2.0, h as f32 / 2.0);
    let persp_max = 1.0 + 40.0 * options.perspective_k;
    let max_dx = (center.0 - 120.0) * (persp_max - 1.0) + 4.0;
    let max_dy = (center.1 - 90.0) * (persp_max - 1.0) + h as f32 * options.max_shift_fraction + 4.0;
    let dx = tx - bx;
    let dy = ty - by;
    assert!(dx < -0.5, "expected a leftward shift, got dx={dx}");
    assert!(dx.abs() <= max_dx, "dx={dx} exceeds bound {max_dx}");
    assert!(dy.abs() <= max_dy, "dy={dy} exceeds bound {max_dy}");
}
