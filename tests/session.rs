mod common;

use common::synthetic_image::centred_disk;
use spatial_parallax::session::{Frame, OrientationSample, ScreenOrientation, SessionOptions};
use spatial_parallax::{SessionState, TiltVector, ViewerSession};
use std::time::{Duration, Instant};

fn spatial_session() -> ViewerSession {
    common::init_logging();
    let mut session = ViewerSession::new(SessionOptions::default());
    session.load_image(centred_disk(80, 60, 14.0)).unwrap();
    assert_eq!(session.set_spatial_mode(true).unwrap(), SessionState::DepthReady);
    session
}

#[test]
fn depth_is_reused_across_renders() {
    let mut session = spatial_session();
    let depth = session.depth().cloned().unwrap();
    for t in [0.0, 10.0, 20.0] {
        session.set_tilt(TiltVector::new(t, -t));
        match session.frame((80, 60)).unwrap() {
            Frame::Parallax(out) => assert_eq!((out.frame.width(), out.frame.height()), (80, 60)),
            Frame::Plain(_) => panic!("expected a parallax frame"),
        }
    }
    assert_eq!(session.depth(), Some(&depth));
    assert!(session.depth_report().is_some());
}

#[test]
fn new_image_replaces_cached_depth() {
    let mut session = spatial_session();
    let before = session.depth().cloned().unwrap();
    session.load_image(centred_disk(60, 60, 20.0)).unwrap();
    let after = session.depth().unwrap();
    assert_eq!((after.width(), after.height()), (60, 60));
    assert_ne!(after, &before);
}

#[test]
fn spatial_mode_off_shows_the_plain_image() {
    let mut session = spatial_session();
    session.set_spatial_mode(false).unwrap();
    match session.frame((80, 60)).unwrap() {
        Frame::Plain(img) => assert_eq!(img.width(), 80),
        Frame::Parallax(_) => panic!("expected the plain image"),
    }
}

#[test]
fn orientation_drives_smoothed_tilt() {
    let mut session = spatial_session();
    let portrait = ScreenOrientation::Portrait;
    assert_eq!(
        session.orientation_changed(OrientationSample { beta: 30.0, gamma: 0.0 }, portrait),
        None
    );
    let first = session
        .orientation_changed(OrientationSample { beta: 40.0, gamma: 0.0 }, portrait)
        .unwrap();
    assert!((first.x - 7.0).abs() < 1e-4);
    let second = session
        .orientation_changed(OrientationSample { beta: 50.0, gamma: 0.0 }, portrait)
        .unwrap();
    // 7·0.3 + 14·0.7
    assert!((second.x - 11.9).abs() < 1e-4, "{second:?}");
    assert_eq!(session.tilt(), second);
}

#[test]
fn throttle_limits_frame_rate() {
    let mut session = spatial_session();
    let t0 = Instant::now();
    assert!(session.frame_throttled(t0, (40, 30)).unwrap().is_some());
    assert!(session.frame_throttled(t0 + Duration::from_millis(10), (40, 30)).unwrap().is_none());
    assert!(session.frame_throttled(t0 + Duration::from_millis(60), (40, 30)).unwrap().is_some());
}
