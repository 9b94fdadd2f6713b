use crate::depth::DepthOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DepthMapToolConfig {
    pub input: PathBuf,
    /// Downscale inputs above this many pixels before estimation.
    #[serde(default)]
    pub max_pixels: Option<usize>,
    #[serde(default)]
    pub depth: DepthOptions,
    pub output: DepthMapOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DepthMapOutputConfig {
    pub depth_image: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DepthMapToolConfig, String> {
    super::load_json(path)
}
