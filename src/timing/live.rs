use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::timing::invert::{minimize_bounded, polish_root};
use crate::timing::mapping::TimeMapping;

/// Default scene-time step used for the numerical playback rate.
pub const DEFAULT_RATE_STEP: f64 = 1e-3;

/// Squared index-time residual accepted by [`Timing::time_to_stime`].
pub const INVERSION_TOLERANCE: f64 = 1e-12;

/// Timing state captured by the latest [`Timing::update_with_stime`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingSnapshot {
    /// Scene time, in playback seconds.
    pub stime: f64,
    /// Index time shown at `stime`.
    pub indextime: f64,
    /// Index time advanced per playback second at `stime`.
    pub playback_rate: f64,
}

/// Timing authority of one scene: a mapping policy plus the live state of the current frame.
#[derive(Debug)]
pub struct Timing {
    mapping: Box<dyn TimeMapping>,
    rate_step: f64,
    current: Option<TimingSnapshot>,
}

impl Timing {
    /// Wrap a mapping policy. The timing has no current state until it is first updated.
    pub fn new(mapping: impl TimeMapping + 'static) -> Self {
        Self::from_boxed(Box::new(mapping))
    }

    /// Wrap an already boxed mapping policy.
    pub fn from_boxed(mapping: Box<dyn TimeMapping>) -> Self {
        Self {
            mapping,
            rate_step: DEFAULT_RATE_STEP,
            current: None,
        }
    }

    /// Override the finite-difference step used for the playback rate.
    pub fn with_rate_step(mut self, rate_step: f64) -> PlotvidResult<Self> {
        if !rate_step.is_finite() || rate_step <= 0.0 {
            return Err(PlotvidError::configuration(format!(
                "playback rate step must be positive and finite, got {rate_step}"
            )));
        }
        self.rate_step = rate_step;
        Ok(self)
    }

    /// Borrow the mapping policy.
    pub fn mapping(&self) -> &dyn TimeMapping {
        self.mapping.as_ref()
    }

    /// Give up the live state and return the mapping policy.
    pub fn into_mapping(self) -> Box<dyn TimeMapping> {
        self.mapping
    }

    /// Total scene duration in playback seconds.
    pub fn sduration(&self) -> f64 {
        self.mapping.sduration()
    }

    /// Index time shown at scene time `stime`.
    pub fn stime_to_time(&self, stime: f64) -> f64 {
        self.mapping.stime_to_time(stime)
    }

    /// Forward-difference playback rate at `stime`.
    pub fn playback_rate_at(&self, stime: f64) -> f64 {
        let t0 = self.mapping.stime_to_time(stime);
        let t1 = self.mapping.stime_to_time(stime + self.rate_step);
        (t1 - t0) / self.rate_step
    }

    /// Move the timing to `stime` and record index time and playback rate for it.
    pub fn update_with_stime(&mut self, stime: f64) -> TimingSnapshot {
        let snapshot = TimingSnapshot {
            stime,
            indextime: self.mapping.stime_to_time(stime),
            playback_rate: self.playback_rate_at(stime),
        };
        self.current = Some(snapshot);
        snapshot
    }

    /// State recorded by the latest update, if any.
    pub fn current(&self) -> Option<TimingSnapshot> {
        self.current
    }

    /// Current scene time, `NaN` before the first update.
    pub fn current_stime(&self) -> f64 {
        self.current.map_or(f64::NAN, |s| s.stime)
    }

    /// Current index time, `NaN` before the first update.
    pub fn current_indextime(&self) -> f64 {
        self.current.map_or(f64::NAN, |s| s.indextime)
    }

    /// Current playback rate, `NaN` before the first update.
    pub fn current_playback_rate(&self) -> f64 {
        self.current.map_or(f64::NAN, |s| s.playback_rate)
    }

    /// Scene time in `[0, sduration]` at which index time `time` is shown.
    ///
    /// Solved numerically by minimizing the squared residual, then stepped to the earliest
    /// scene time that shows exactly `time` when the mapping hits it. The search assumes the mapping
    /// is monotonic over the scene: for non-monotonic mappings it can settle on a local
    /// minimum, and for index times the scene never reaches there is no root at all. Both
    /// cases are reported as [`PlotvidError::Inversion`] rather than returning the nearest
    /// scene time.
    pub fn time_to_stime(&self, time: f64) -> PlotvidResult<f64> {
        if !time.is_finite() {
            return Err(PlotvidError::inversion(format!(
                "index time must be finite, got {time}"
            )));
        }
        let sduration = self.sduration();
        let best = minimize_bounded(
            |stime| {
                let r = self.mapping.stime_to_time(stime) - time;
                r * r
            },
            0.0,
            sduration,
        );
        if best.fx.is_nan() || best.fx > INVERSION_TOLERANCE {
            return Err(PlotvidError::inversion(format!(
                "index time {time} is not reached within scene time [0, {sduration}] \
                 (best squared residual {:e} at stime {} after {} iterations)",
                best.fx, best.x, best.iterations
            )));
        }
        Ok(polish_root(
            |stime| self.mapping.stime_to_time(stime) - time,
            best.x,
            0.0,
            sduration,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/live.rs"]
mod tests;
