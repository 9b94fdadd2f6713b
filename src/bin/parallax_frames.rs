use serde::Serialize;
use spatial_parallax::config::parallax_frames;
use spatial_parallax::diagnostics::{DepthReport, FrameReport};
use spatial_parallax::image::io::{load_rgba_image, save_depth_png, save_rgba_png, write_json_file};
use spatial_parallax::{DepthEstimator, ParallaxRenderer, RenderSettings};
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
    let config = parallax_frames::load_config(Path::new(&config_path))?;

    let mut image = load_rgba_image(&config.input)?;
    if let Some(max_pixels) = config.max_pixels {
        image = image.fit_within(max_pixels).map_err(|e| e.to_string())?;
    }
    let out_size = config.output_size.unwrap_or((image.width(), image.height()));

    let estimate = DepthEstimator::new(config.depth.clone())
        .estimate_with_diagnostics(&image)
        .map_err(|e| format!("Depth estimation failed: {e}"))?;
    if let Some(path) = &config.output.depth_image {
        save_depth_png(&estimate.depth, path)?;
    }

    let mut renderer = ParallaxRenderer::new(config.render.clone());
    let mut frames = Vec::with_capacity(config.frames.len());
    for (idx, frame) in config.frames.iter().enumerate() {
        let settings = RenderSettings::new(frame.tilt, frame.intensity);
        let output = renderer
            .render(&image, &estimate.depth, settings, out_size)
            .map_err(|e| format!("Rendering frame {idx} failed: {e}"))?;
        if let Some(warning) = &output.warning {
            println!("frame {idx}: {warning}");
        }
        let path = config.output.dir.join(format!("frame_{idx:03}.png"));
        save_rgba_png(&output.frame, &path)?;
        let mut report = FrameReport::new(settings, &output);
        report.output_path = Some(path.display().to_string());
        frames.push(report);
    }
    println!(
        "Rendered {} frames to {}",
        frames.len(),
        config.output.dir.display()
    );

    if let Some(path) = &config.output.summary_json {
        let summary = FramesSummary {
            depth: estimate.report,
            frames,
        };
        write_json_file(path, &summary)?;
        println!("Saved summary to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: parallax_frames <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FramesSummary {
    depth: DepthReport,
    frames: Vec<FrameReport>,
}
