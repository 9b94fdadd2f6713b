use serde::{Deserialize, Serialize};

/// Simulated viewpoint offset from neutral, in degrees.
///
/// `x` follows the pitch axis (forward/back tilt, drives vertical parallax)
/// and `y` the roll axis (left/right tilt, drives horizontal parallax).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltVector {
    pub x: f32,
    pub y: f32,
}

impl TiltVector {
    pub const ZERO: TiltVector = TiltVector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp each axis independently to `[-limit, limit]`.
    pub fn clamped(self, limit: f32) -> Self {
        let limit = limit.abs();
        Self {
            x: clamp_finite(self.x, limit),
            y: clamp_finite(self.y, limit),
        }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

fn clamp_finite(v: f32, limit: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-limit, limit)
    }
}

/// Per-frame render inputs: the (already smoothed) tilt and the UI intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub tilt: TiltVector,
    /// Requested intensity on the UI scale `0..=100`.
    pub intensity: f32,
}

impl RenderSettings {
    pub fn new(tilt: TiltVector, intensity: f32) -> Self {
        Self { tilt, intensity }
    }
}

/// Soft warning raised when the requested intensity exceeds the recommended
/// level. Rendering still completes with the clamped intensity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityWarning {
    pub requested: f32,
    pub recommended: f32,
    pub applied: f32,
}

impl std::fmt::Display for IntensityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "intensity {:.0} exceeds the recommended {:.0}; the view may look distorted (rendered at {:.0})",
            self.requested, self.recommended, self.applied
        )
    }
}
