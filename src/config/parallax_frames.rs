use crate::depth::DepthOptions;
use crate::parallax::RenderOptions;
use crate::types::TiltVector;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ParallaxFramesConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub max_pixels: Option<usize>,
    /// Output size; defaults to the (possibly downscaled) input size.
    #[serde(default)]
    pub output_size: Option<(usize, usize)>,
    #[serde(default)]
    pub depth: DepthOptions,
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default = "default_frames")]
    pub frames: Vec<FrameSpec>,
    pub output: FramesOutputConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FrameSpec {
    pub tilt: TiltVector,
    pub intensity: f32,
}

#[derive(Debug, Deserialize)]
pub struct FramesOutputConfig {
    /// Frames are written as `<dir>/frame_NNN.png`.
    pub dir: PathBuf,
    #[serde(default)]
    pub depth_image: Option<PathBuf>,
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

/// A left-right sweep plus one diagonal at the recommended intensity.
fn default_frames() -> Vec<FrameSpec> {
    [-30.0, -15.0, 0.0, 15.0, 30.0]
        .into_iter()
        .map(|y| FrameSpec {
            tilt: TiltVector::new(0.0, y),
            intensity: 40.0,
        })
        .chain(std::iter::once(FrameSpec {
            tilt: TiltVector::new(20.0, 20.0),
            intensity: 40.0,
        }))
        .collect()
}

pub fn load_config(path: &Path) -> Result<ParallaxFramesConfig, String> {
    super::load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn frames_default_to_a_sweep() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "input": "a.jpg", "output": {{ "dir": "frames" }} }}"#).unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.frames.len(), 6);
        assert_eq!(cfg.frames[0].tilt, TiltVector::new(0.0, -30.0));
        assert_eq!(cfg.render.max_intensity, 60.0);
    }

    #[test]
    fn explicit_frames_and_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "input": "a.jpg", "output_size": [200, 150],
                 "frames": [{{ "tilt": {{ "x": 5, "y": -5 }}, "intensity": 70 }}],
                 "output": {{ "dir": "frames" }} }}"#
        )
        .unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.output_size, Some((200, 150)));
        assert_eq!(cfg.frames[0].intensity, 70.0);
    }
}
