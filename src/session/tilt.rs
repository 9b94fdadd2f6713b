//! Raw input to tilt conversion: pointer drags, device orientation and the
//! exponential smoothing applied to both.
use crate::types::TiltVector;
use serde::{Deserialize, Serialize};

/// Exponential moving average over incoming tilt samples:
/// `next = previous·(1 − factor) + raw·factor`.
#[derive(Clone, Copy, Debug)]
pub struct TiltSmoother {
    previous: Option<TiltVector>,
    factor: f32,
}

impl Default for TiltSmoother {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl TiltSmoother {
    /// `factor` is clamped to `[0, 1]`; 1 disables smoothing.
    pub fn new(factor: f32) -> Self {
        Self {
            previous: None,
            factor: if factor.is_nan() { 1.0 } else { factor.clamp(0.0, 1.0) },
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Blend `raw` into the running value. The first sample passes through.
    pub fn update(&mut self, raw: TiltVector) -> TiltVector {
        let next = match self.previous {
            None => raw,
            Some(prev) => {
                let f = self.factor;
                TiltVector::new(prev.x * (1.0 - f) + raw.x * f, prev.y * (1.0 - f) + raw.y * f)
            }
        };
        self.previous = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragParams {
    /// Degrees of tilt per pixel of pointer travel.
    pub sensitivity: f32,
    pub limit: f32,
}

impl Default for DragParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.3,
            limit: 45.0,
        }
    }
}

/// Pointer drag accumulator. Vertical motion tilts about `x`, horizontal
/// motion about `y`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTilt {
    params: DragParams,
    tilt: TiltVector,
    last: Option<(f32, f32)>,
}

impl DragTilt {
    pub fn new(params: DragParams) -> Self {
        Self {
            params,
            tilt: TiltVector::ZERO,
            last: None,
        }
    }

    pub fn tilt(&self) -> TiltVector {
        self.tilt
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
    }

    /// Start a drag that continues from `tilt` instead of the accumulated
    /// drag value.
    pub fn begin_at(&mut self, x: f32, y: f32, tilt: TiltVector) {
        self.tilt = tilt.clamped(self.params.limit);
        self.begin(x, y);
    }

    /// Accumulate the motion since the previous pointer position. Returns
    /// `None` when no drag is in progress.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<TiltVector> {
        let (lx, ly) = self.last?;
        self.last = Some((x, y));
        Some(self.apply_delta(x - lx, y - ly))
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn apply_delta(&mut self, dx: f32, dy: f32) -> TiltVector {
        let s = self.params.sensitivity;
        self.tilt = TiltVector::new(self.tilt.x + dy * s, self.tilt.y + dx * s).clamped(self.params.limit);
        self.tilt
    }

    pub fn reset(&mut self) {
        self.tilt = TiltVector::ZERO;
        self.last = None;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// One device-orientation reading in degrees: `beta` is the front-back
/// rotation, `gamma` the left-right rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub beta: f32,
    pub gamma: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationParams {
    /// Deltas below this many degrees are treated as sensor noise.
    pub dead_zone: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub limit: f32,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            dead_zone: 0.5,
            scale_x: 0.7,
            scale_y: 1.1,
            limit: 30.0,
        }
    }
}

/// Device orientation relative to the pose held when tracking started.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrientationTilt {
    params: OrientationParams,
    base: Option<OrientationSample>,
}

impl OrientationTilt {
    pub fn new(params: OrientationParams) -> Self {
        Self { params, base: None }
    }

    /// Convert a reading to tilt. The first reading after construction or
    /// [`reset`](Self::reset) becomes the neutral pose and yields `None`.
    pub fn update(&mut self, sample: OrientationSample, screen: ScreenOrientation) -> Option<TiltVector> {
        let sample = match screen {
            ScreenOrientation::Portrait => sample,
            ScreenOrientation::Landscape => OrientationSample {
                beta: sample.gamma,
                gamma: sample.beta,
            },
        };
        let base = match self.base {
            Some(base) => base,
            None => {
                self.base = Some(sample);
                return None;
            }
        };
        let p = &self.params;
        let dx = dead_zone(sample.beta - base.beta, p.dead_zone);
        let dy = dead_zone(sample.gamma - base.gamma, p.dead_zone);
        Some(TiltVector::new(dx * p.scale_x, dy * p.scale_y).clamped(p.limit))
    }

    pub fn reset(&mut self) {
        self.base = None;
    }
}

fn dead_zone(v: f32, zone: f32) -> f32 {
    if v.abs() < zone {
        0.0
    } else {
        v
    }
}
