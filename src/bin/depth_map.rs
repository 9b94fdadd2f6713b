use spatial_parallax::config::depth_map;
use spatial_parallax::image::io::{load_rgba_image, save_depth_png, write_json_file};
use spatial_parallax::DepthEstimator;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = depth_map::load_config(Path::new(&config_path))?;

    let mut image = load_rgba_image(&config.input)?;
    if let Some(max_pixels) = config.max_pixels {
        image = image.fit_within(max_pixels).map_err(|e| e.to_string())?;
    }

    let estimator = DepthEstimator::new(config.depth.clone());
    let estimate = estimator
        .estimate_with_diagnostics(&image)
        .map_err(|e| format!("Depth estimation failed: {e}"))?;

    save_depth_png(&estimate.depth, &config.output.depth_image)?;
    println!(
        "Saved {}x{} depth map to {} (depth {}..{}, subject {:.1}%, {:.1} ms)",
        image.width(),
        image.height(),
        config.output.depth_image.display(),
        estimate.report.depth.min,
        estimate.report.depth.max,
        estimate.report.subject_fraction * 100.0,
        estimate.report.timings.total_ms
    );

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &estimate.report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: depth_map <config.json>".to_string()
}
