mod common;

use common::synthetic_image::centred_disk;
use spatial_parallax::depth::{BasicScoring, EnhancedScoring, GaussianSmoothing};
use spatial_parallax::image::synthetic::{disk_on_background, uniform};
use spatial_parallax::segmentation::BasicSegmentation;
use spatial_parallax::{DepthEstimator, DepthOptions, Tier};

fn estimator(tier: Tier) -> DepthEstimator {
    DepthEstimator::new(DepthOptions::default().with_tier(tier))
}

#[test]
fn depth_matches_image_dimensions() {
    common::init_logging();
    for tier in [Tier::Basic, Tier::Enhanced] {
        let image = centred_disk(123, 77, 20.0);
        let depth = estimator(tier).estimate(&image).unwrap();
        assert_eq!((depth.width(), depth.height()), (123, 77));
        assert_eq!(depth.data().len(), 123 * 77);
    }
}

#[test]
fn estimation_is_deterministic() {
    let image = centred_disk(96, 72, 18.0);
    for tier in [Tier::Basic, Tier::Enhanced] {
        let est = estimator(tier);
        assert_eq!(est.estimate(&image).unwrap(), est.estimate(&image).unwrap());
    }
}

#[test]
fn uniform_image_gives_nearly_flat_depth() {
    let image = uniform(120, 90, [90, 140, 200]);
    for tier in [Tier::Basic, Tier::Enhanced] {
        let depth = estimator(tier).estimate(&image).unwrap();
        let (lo, hi) = depth.min_max().unwrap();
        assert!(hi - lo < 30, "{tier:?} span {lo}..{hi}");
    }
}

#[test]
fn disk_interior_is_nearer_than_background() {
    let image = centred_disk(160, 120, 30.0);
    for tier in [Tier::Basic, Tier::Enhanced] {
        let est = estimator(tier).estimate_with_diagnostics(&image).unwrap();
        let depth = &est.depth;
        let (mut inside, mut n_in, mut outside, mut n_out) = (0u64, 0u64, 0u64, 0u64);
        for y in 0..120 {
            for x in 0..160 {
                let (dx, dy) = (x as f32 - 80.0, y as f32 - 60.0);
                let r = (dx * dx + dy * dy).sqrt();
                if r < 25.0 {
                    inside += depth.get(x, y) as u64;
                    n_in += 1;
                } else if r > 35.0 {
                    outside += depth.get(x, y) as u64;
                    n_out += 1;
                }
            }
        }
        let mean_in = inside as f64 / n_in as f64;
        let mean_out = outside as f64 / n_out as f64;
        assert!(mean_in > mean_out + 50.0, "{tier:?}: inside {mean_in:.1} outside {mean_out:.1}");
        assert!(est.report.subject_fraction > 0.0);
    }
}

#[test]
fn strategies_can_be_mixed_by_the_caller() {
    let image = centred_disk(80, 60, 15.0);
    let est = DepthEstimator::default()
        .estimate_with(
            &image,
            &BasicSegmentation::default(),
            &EnhancedScoring::default(),
            &GaussianSmoothing::default(),
        )
        .unwrap();
    assert_eq!(est.report.tier, None);
    assert_eq!(est.report.strategies.segmentation, "basic");
    assert_eq!(est.report.strategies.scoring, "enhanced");
    assert_eq!(est.report.strategies.smoothing, "gaussian");
    assert!(est.depth.get(40, 30) > est.depth.get(2, 2));

    let basic = DepthEstimator::default()
        .estimate_with(&image, &BasicSegmentation::default(), &BasicScoring::default(), &GaussianSmoothing::default())
        .unwrap();
    assert_eq!(basic.report.strategies.scoring, "basic");
}

#[test]
fn achromatic_disk_gets_no_subject_boost() {
    // Subject detection keys on skin and vivid colour; a neutral grey disk
    // only picks up the small brightness and centrality terms.
    let image = disk_on_background(400, 300, (120.0, 90.0), 50.0, [240, 240, 240], [20, 20, 25]);
    for tier in [Tier::Basic, Tier::Enhanced] {
        let depth = estimator(tier).estimate(&image).unwrap();
        let near = depth.get(120, 90) as i32;
        let far = depth.get(10, 10) as i32;
        assert!(near < far + 25, "{tier:?}: disk {near} vs corner {far}");
    }
}
