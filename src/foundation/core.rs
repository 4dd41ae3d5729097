use crate::foundation::error::{PlotvidError, PlotvidResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Frame counts within this many frames of an integer are snapped to it when sizing a grid.
const FRAME_SNAP_EPS: f64 = 1e-9;

/// Absolute 0-based frame index in video timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> PlotvidResult<Self> {
        if den == 0 {
            return Err(PlotvidError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PlotvidError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole frames per second, e.g. `Fps::whole(30)`.
    pub fn whole(num: u32) -> PlotvidResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Video time of frame `frames`, i.e. `frames / fps`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64 * f64::from(self.den)) / f64::from(self.num)
    }

    /// Number of grid ticks `0, 1/fps, 2/fps, ...` strictly below `secs`.
    pub fn frames_below(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        let exact = secs * self.as_f64();
        let nearest = exact.round();
        let snapped = if (exact - nearest).abs() < FRAME_SNAP_EPS {
            nearest
        } else {
            exact
        };
        snapped.ceil().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated, non-empty canvas.
    pub fn new(width: u32, height: u32) -> PlotvidResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlotvidError::configuration(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque colour from straight RGB.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiply a straight-alpha colour.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
