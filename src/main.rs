use spatial_parallax::image::io::{save_depth_png, save_rgba_png};
use spatial_parallax::image::synthetic;
use spatial_parallax::session::{Frame, SessionOptions, ViewerSession};
use spatial_parallax::TiltVector;
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

// Demo: estimate depth for the built-in sample scene and render a short
// tilt sweep. Pass a directory to also save the depth map and frames.
fn run() -> Result<(), String> {
    let out_dir = env::args().nth(1).map(PathBuf::from);
    let image = synthetic::sample_scene();
    let size = (image.width(), image.height());

    let mut session = ViewerSession::new(SessionOptions::default());
    session.load_image(image).map_err(|e| e.to_string())?;
    session.set_spatial_mode(true).map_err(|e| e.to_string())?;
    session.set_intensity(40.0);

    if let Some(report) = session.depth_report() {
        println!(
            "depth {}x{}: range {}..{} mean {:.1} subject {:.1}% in {:.1} ms",
            report.input.width,
            report.input.height,
            report.depth.min,
            report.depth.max,
            report.depth.mean,
            report.subject_fraction * 100.0,
            report.timings.total_ms
        );
    }
    if let (Some(dir), Some(depth)) = (&out_dir, session.depth()) {
        save_depth_png(depth, &dir.join("depth.png"))?;
    }

    for (idx, tilt_y) in [-30.0f32, 0.0, 30.0].into_iter().enumerate() {
        session.reset_tilt();
        session.set_tilt(TiltVector::new(0.0, tilt_y));
        let frame = session.frame(size).map_err(|e| e.to_string())?;
        if let Frame::Parallax(output) = frame {
            println!(
                "frame {idx}: tilt_y={tilt_y:+.0} intensity={:.0} {:.2} ms",
                output.effective_intensity, output.elapsed_ms
            );
            if let Some(dir) = &out_dir {
                save_rgba_png(&output.frame, &dir.join(format!("frame_{idx}.png")))?;
            }
        }
    }
    Ok(())
}
