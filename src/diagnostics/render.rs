use crate::parallax::RenderOutput;
use crate::types::{IntensityWarning, RenderSettings, TiltVector};
use serde::Serialize;

/// Summary of one rendered frame, as written by the frame tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub width: usize,
    pub height: usize,
    pub tilt: TiltVector,
    pub requested_intensity: f32,
    pub effective_intensity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<IntensityWarning>,
    pub prefiltered: bool,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl FrameReport {
    pub fn new(settings: RenderSettings, output: &RenderOutput) -> Self {
        Self {
            width: output.frame.width(),
            height: output.frame.height(),
            tilt: settings.tilt,
            requested_intensity: settings.intensity,
            effective_intensity: output.effective_intensity,
            warning: output.warning,
            prefiltered: output.prefiltered,
            elapsed_ms: output.elapsed_ms,
            output_path: None,
        }
    }
}
