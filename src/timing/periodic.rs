use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::timing::mapping::{TimeMapping, require_finite, require_positive_duration};

/// Repeating linear sweep from `start_time` towards `end_time`, once per `period`.
///
/// Scene time wraps every period, so the mapping is defined (and periodic) for any scene time
/// and `stime_to_time(k * period) == start_time` for every integer `k`. The end value itself is
/// never shown: for a full turn of a rotating view it coincides with the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicPlayback {
    start_time: f64,
    end_time: f64,
    period: f64,
    cycles: u32,
}

impl PeriodicPlayback {
    /// Sweep `[start_time, end_time)` every `period` seconds, `cycles` times.
    pub fn new(start_time: f64, end_time: f64, period: f64, cycles: u32) -> PlotvidResult<Self> {
        require_finite("start_time", start_time)?;
        require_finite("end_time", end_time)?;
        require_positive_duration(period)?;
        if cycles == 0 {
            return Err(PlotvidError::configuration(
                "periodic playback needs at least one cycle",
            ));
        }
        Ok(Self {
            start_time,
            end_time,
            period,
            cycles,
        })
    }

    /// One full turn of a view azimuth per `period`, in degrees, starting at `azim_init`.
    pub fn spin(period: f64, azim_init: f64) -> PlotvidResult<Self> {
        Self::new(azim_init, azim_init + 360.0, period, 1)
    }

    /// Seconds per sweep.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Number of sweeps in the scene.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Sweep progress in `[0, 1)` at `stime`.
    pub fn phase(&self, stime: f64) -> f64 {
        stime.rem_euclid(self.period) / self.period
    }
}

impl TimeMapping for PeriodicPlayback {
    fn sduration(&self) -> f64 {
        self.period * f64::from(self.cycles)
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        let t = self.phase(stime);
        self.start_time + t * (self.end_time - self.start_time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/periodic.rs"]
mod tests;
