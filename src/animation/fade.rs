//! Faders: blend values in `[0, 1]` driven by a scene's timing.
//!
//! Every fader is exactly 0 strictly before its window, ramps monotonically inside it, and is
//! exactly 1 at and after the window end. Windows anchored on scene time but specified with an
//! index time are built in two steps: describe the fade, then [`bind`](StartIndexFade::bind) it
//! to the scene's [`Timing`] once, which performs the inverse lookup and freezes the window.

use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::timing::live::{Timing, TimingSnapshot};

/// A blend value computed from the timing state of the frame being drawn.
pub trait Fader {
    /// Blend value in `[0, 1]` for `snapshot`.
    fn value(&self, snapshot: &TimingSnapshot) -> f64;

    /// Blend value for the timing's current state; 0 before the timing was first updated.
    fn value_for(&self, timing: &Timing) -> f64 {
        timing.current().map_or(0.0, |s| self.value(&s))
    }
}

/// Interpolation used inside an index-time window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeScale {
    /// Proportional to index time.
    #[default]
    Linear,
    /// Proportional to `log(index time)`.
    Log,
}

/// Fade between two index times.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexWindowFade {
    start_indextime: f64,
    end_indextime: f64,
    scale: FadeScale,
}

impl IndexWindowFade {
    /// Linear fade from `start_indextime` to `end_indextime`.
    pub fn new(start_indextime: f64, end_indextime: f64) -> PlotvidResult<Self> {
        Self::with_scale(start_indextime, end_indextime, FadeScale::Linear)
    }

    /// Fade with an explicit interpolation scale. `FadeScale::Log` needs positive bounds.
    pub fn with_scale(
        start_indextime: f64,
        end_indextime: f64,
        scale: FadeScale,
    ) -> PlotvidResult<Self> {
        if !start_indextime.is_finite()
            || !end_indextime.is_finite()
            || start_indextime >= end_indextime
        {
            return Err(PlotvidError::configuration(format!(
                "fade window needs finite start < end, got [{start_indextime}, {end_indextime}]"
            )));
        }
        if scale == FadeScale::Log && start_indextime <= 0.0 {
            return Err(PlotvidError::configuration(
                "logarithmic fade needs a positive start index time",
            ));
        }
        Ok(Self {
            start_indextime,
            end_indextime,
            scale,
        })
    }
}

impl Fader for IndexWindowFade {
    fn value(&self, snapshot: &TimingSnapshot) -> f64 {
        let ix = snapshot.indextime;
        if ix < self.start_indextime {
            return 0.0;
        }
        if ix >= self.end_indextime {
            return 1.0;
        }
        let v = match self.scale {
            FadeScale::Linear => {
                (ix - self.start_indextime) / (self.end_indextime - self.start_indextime)
            }
            FadeScale::Log => {
                (ix.ln() - self.start_indextime.ln())
                    / (self.end_indextime.ln() - self.start_indextime.ln())
            }
        };
        v.clamp(0.0, 1.0)
    }
}

/// Fade over a fixed scene-time window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneWindowFade {
    start_scenetime: f64,
    end_scenetime: f64,
}

impl SceneWindowFade {
    /// Fade from `start_scenetime` to `end_scenetime`.
    pub fn new(start_scenetime: f64, end_scenetime: f64) -> PlotvidResult<Self> {
        if !start_scenetime.is_finite()
            || !end_scenetime.is_finite()
            || start_scenetime >= end_scenetime
        {
            return Err(PlotvidError::configuration(format!(
                "fade window needs finite start < end, got [{start_scenetime}, {end_scenetime}]"
            )));
        }
        Ok(Self {
            start_scenetime,
            end_scenetime,
        })
    }

    /// Scene time at which the fade starts.
    pub fn start_scenetime(&self) -> f64 {
        self.start_scenetime
    }

    /// Scene time at which the fade is complete.
    pub fn end_scenetime(&self) -> f64 {
        self.end_scenetime
    }
}

impl Fader for SceneWindowFade {
    fn value(&self, snapshot: &TimingSnapshot) -> f64 {
        let s = snapshot.stime;
        if s < self.start_scenetime {
            return 0.0;
        }
        if s >= self.end_scenetime {
            return 1.0;
        }
        ((s - self.start_scenetime) / (self.end_scenetime - self.start_scenetime)).clamp(0.0, 1.0)
    }
}

/// Fade that starts when `start_indextime` is shown and lasts `duration_scenetime` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StartIndexFade {
    start_indextime: f64,
    duration_scenetime: f64,
}

impl StartIndexFade {
    /// Describe the fade; call [`bind`](Self::bind) with the scene's timing before use.
    pub fn new(start_indextime: f64, duration_scenetime: f64) -> PlotvidResult<Self> {
        require_fade_duration(duration_scenetime)?;
        Ok(Self {
            start_indextime,
            duration_scenetime,
        })
    }

    /// Resolve the scene time at which `start_indextime` is shown.
    pub fn bind(&self, timing: &Timing) -> PlotvidResult<SceneWindowFade> {
        let start = timing.time_to_stime(self.start_indextime)?;
        SceneWindowFade::new(start, start + self.duration_scenetime)
    }
}

/// Fade lasting `duration_scenetime` seconds that completes when `end_indextime` is shown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EndIndexFade {
    duration_scenetime: f64,
    end_indextime: f64,
}

impl EndIndexFade {
    /// Describe the fade; call [`bind`](Self::bind) with the scene's timing before use.
    pub fn new(duration_scenetime: f64, end_indextime: f64) -> PlotvidResult<Self> {
        require_fade_duration(duration_scenetime)?;
        Ok(Self {
            duration_scenetime,
            end_indextime,
        })
    }

    /// Resolve the scene time at which `end_indextime` is shown.
    pub fn bind(&self, timing: &Timing) -> PlotvidResult<SceneWindowFade> {
        let end = timing.time_to_stime(self.end_indextime)?;
        SceneWindowFade::new(end - self.duration_scenetime, end)
    }
}

fn require_fade_duration(d: f64) -> PlotvidResult<()> {
    if !d.is_finite() || d <= 0.0 {
        return Err(PlotvidError::configuration(format!(
            "fade duration must be positive and finite, got {d}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fade.rs"]
mod tests;
