use crate::depth::Tier;
use crate::diagnostics::TimingBreakdown;
use crate::image::{DepthBuffer, SubjectMask};
use serde::Serialize;

/// Result statistics and stage timings of one depth estimation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthReport {
    pub input: InputDescriptor,
    /// Tier actually run (never `Auto`); `None` for custom strategy sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub strategies: StrategyNames,
    pub subject_fraction: f32,
    pub depth: DepthStats,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyNames {
    pub segmentation: String,
    pub scoring: String,
    pub smoothing: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthStats {
    pub min: u8,
    pub max: u8,
    pub mean: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_mean: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_mean: Option<f32>,
}

impl DepthStats {
    pub fn from_depth(depth: &DepthBuffer, mask: &SubjectMask) -> Self {
        let (min, max) = depth.min_max().unwrap_or((0, 0));
        Self {
            min,
            max,
            mean: depth.mean(),
            subject_mean: depth.mean_where(mask, true),
            background_mean: depth.mean_where(mask, false),
        }
    }

    pub fn span(&self) -> u8 {
        self.max - self.min
    }
}
