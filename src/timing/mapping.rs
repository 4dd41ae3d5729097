//! Scene-time to index-time mapping policies.
//!
//! Every policy maps `[0, sduration]` onto the caller's index-time axis. Outside that interval
//! the policy formula is applied as-is, so linear policies extrapolate linearly and the
//! logarithmic policy extrapolates geometrically.

use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::foundation::math::lerp_log10;

/// Mapping from scene time (playback seconds into one scene) to index time.
pub trait TimeMapping: std::fmt::Debug {
    /// Total scene duration in playback seconds. Fixed for the lifetime of the mapping.
    fn sduration(&self) -> f64;

    /// Index time displayed at scene time `stime`.
    fn stime_to_time(&self, stime: f64) -> f64;
}

impl<M: TimeMapping + ?Sized> TimeMapping for Box<M> {
    fn sduration(&self) -> f64 {
        (**self).sduration()
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        (**self).stime_to_time(stime)
    }
}

/// Linear playback given a range of index times and a playback speed (index time per second).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearPlaybackDefinedSpeed {
    start_time: f64,
    end_time: f64,
    playback_speed: f64,
    sduration: f64,
}

impl LinearPlaybackDefinedSpeed {
    /// `sduration = (end_time - start_time) / playback_speed`, which must come out positive.
    pub fn new(start_time: f64, end_time: f64, playback_speed: f64) -> PlotvidResult<Self> {
        require_finite("start_time", start_time)?;
        require_finite("end_time", end_time)?;
        require_finite("playback_speed", playback_speed)?;
        if playback_speed == 0.0 {
            return Err(PlotvidError::configuration(
                "playback_speed must be non-zero",
            ));
        }
        let sduration = (end_time - start_time) / playback_speed;
        require_positive_duration(sduration)?;
        Ok(Self {
            start_time,
            end_time,
            playback_speed,
            sduration,
        })
    }

    /// First index time shown.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last index time shown.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Index time advanced per playback second.
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }
}

impl TimeMapping for LinearPlaybackDefinedSpeed {
    fn sduration(&self) -> f64 {
        self.sduration
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        // Same line as `start + stime * speed`, written so both endpoints are hit exactly.
        lerp(self.start_time, self.end_time, stime / self.sduration)
    }
}

/// Linear playback given a range of index times and the total scene duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearPlaybackDefinedDuration {
    start_time: f64,
    end_time: f64,
    sduration: f64,
}

impl LinearPlaybackDefinedDuration {
    /// Create a policy that shows `[start_time, end_time]` over `sduration` seconds.
    pub fn new(start_time: f64, end_time: f64, sduration: f64) -> PlotvidResult<Self> {
        require_finite("start_time", start_time)?;
        require_finite("end_time", end_time)?;
        require_positive_duration(sduration)?;
        Ok(Self {
            start_time,
            end_time,
            sduration,
        })
    }

    /// First index time shown.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last index time shown.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }
}

impl TimeMapping for LinearPlaybackDefinedDuration {
    fn sduration(&self) -> f64 {
        self.sduration
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        lerp(self.start_time, self.end_time, stime / self.sduration)
    }
}

/// Linear playback given a start index time, a playback speed and the scene duration.
///
/// The end index time is `start_time + sduration * playback_speed`, so the playback rate of
/// this policy equals `playback_speed` just like [`LinearPlaybackDefinedSpeed`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearPlaybackDefinedSpeedAndDuration {
    start_time: f64,
    end_time: f64,
    playback_speed: f64,
    sduration: f64,
}

impl LinearPlaybackDefinedSpeedAndDuration {
    /// Create a policy that starts at `start_time` and runs at `playback_speed` for `sduration`.
    pub fn new(start_time: f64, playback_speed: f64, sduration: f64) -> PlotvidResult<Self> {
        require_finite("start_time", start_time)?;
        require_finite("playback_speed", playback_speed)?;
        require_positive_duration(sduration)?;
        let end_time = start_time + sduration * playback_speed;
        require_finite("derived end_time", end_time)?;
        Ok(Self {
            start_time,
            end_time,
            playback_speed,
            sduration,
        })
    }

    /// First index time shown.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Derived last index time.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Index time advanced per playback second.
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }
}

impl TimeMapping for LinearPlaybackDefinedSpeedAndDuration {
    fn sduration(&self) -> f64 {
        self.sduration
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        lerp(self.start_time, self.end_time, stime / self.sduration)
    }
}

/// Logarithmic playback: equal playback time per decade of index time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogarithmicPlaybackDefinedDuration {
    start_time: f64,
    end_time: f64,
    sduration: f64,
}

impl LogarithmicPlaybackDefinedDuration {
    /// Both `start_time` and `end_time` must be positive. `end_time < start_time` plays the
    /// range in reverse.
    pub fn new(start_time: f64, end_time: f64, sduration: f64) -> PlotvidResult<Self> {
        require_finite("start_time", start_time)?;
        require_finite("end_time", end_time)?;
        if start_time <= 0.0 || end_time <= 0.0 {
            return Err(PlotvidError::configuration(format!(
                "logarithmic playback needs positive bounds, got start_time={start_time} end_time={end_time}"
            )));
        }
        require_positive_duration(sduration)?;
        Ok(Self {
            start_time,
            end_time,
            sduration,
        })
    }

    /// First index time shown.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last index time shown.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }
}

impl TimeMapping for LogarithmicPlaybackDefinedDuration {
    fn sduration(&self) -> f64 {
        self.sduration
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        lerp_log10(self.start_time, self.end_time, stime / self.sduration)
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

pub(crate) fn require_finite(name: &str, v: f64) -> PlotvidResult<()> {
    if !v.is_finite() {
        return Err(PlotvidError::configuration(format!(
            "{name} must be finite, got {v}"
        )));
    }
    Ok(())
}

pub(crate) fn require_positive_duration(sduration: f64) -> PlotvidResult<()> {
    if !sduration.is_finite() || sduration <= 0.0 {
        return Err(PlotvidError::configuration(format!(
            "scene duration must be positive and finite, got {sduration}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timing/mapping.rs"]
mod tests;
