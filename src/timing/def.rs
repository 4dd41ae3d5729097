use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::timing::combine::CombinedTiming;
use crate::timing::live::Timing;
use crate::timing::mapping::{
    LinearPlaybackDefinedDuration, LinearPlaybackDefinedSpeed,
    LinearPlaybackDefinedSpeedAndDuration, LogarithmicPlaybackDefinedDuration, TimeMapping,
};
use crate::timing::periodic::PeriodicPlayback;

/// Serializable description of a timing policy.
///
/// ```json
/// { "kind": "combined", "children": [
///     { "kind": "linear_speed", "start_time": 0, "end_time": 100, "playback_speed": 10 },
///     { "kind": "log_duration", "start_time": 100, "end_time": 1e5, "sduration": 6 }
/// ] }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingDef {
    /// [`LinearPlaybackDefinedSpeed`].
    LinearSpeed {
        /// First index time.
        start_time: f64,
        /// Last index time.
        end_time: f64,
        /// Index time per playback second.
        playback_speed: f64,
    },
    /// [`LinearPlaybackDefinedDuration`].
    LinearDuration {
        /// First index time.
        start_time: f64,
        /// Last index time.
        end_time: f64,
        /// Scene duration in seconds.
        sduration: f64,
    },
    /// [`LinearPlaybackDefinedSpeedAndDuration`].
    LinearSpeedDuration {
        /// First index time.
        start_time: f64,
        /// Index time per playback second.
        playback_speed: f64,
        /// Scene duration in seconds.
        sduration: f64,
    },
    /// [`LogarithmicPlaybackDefinedDuration`].
    LogDuration {
        /// First index time, positive.
        start_time: f64,
        /// Last index time, positive.
        end_time: f64,
        /// Scene duration in seconds.
        sduration: f64,
    },
    /// [`PeriodicPlayback`].
    Periodic {
        /// Index time at the start of each sweep.
        start_time: f64,
        /// Index time approached at the end of each sweep.
        end_time: f64,
        /// Seconds per sweep.
        period: f64,
        /// Number of sweeps.
        #[serde(default = "one_cycle")]
        cycles: u32,
    },
    /// [`PeriodicPlayback::spin`].
    Spin {
        /// Seconds per turn.
        period: f64,
        /// Initial azimuth in degrees.
        #[serde(default)]
        azim_init: f64,
    },
    /// [`CombinedTiming`] over nested definitions.
    Combined {
        /// Child timings in playback order.
        children: Vec<TimingDef>,
    },
}

fn one_cycle() -> u32 {
    1
}

impl TimingDef {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> PlotvidResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PlotvidError::serde(format!("invalid timing definition: {e}")))
    }

    /// Serialize the definition to pretty JSON.
    pub fn to_json(&self) -> PlotvidResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlotvidError::serde(e.to_string()))
    }

    /// Validate the definition and build its mapping policy.
    pub fn to_mapping(&self) -> PlotvidResult<Box<dyn TimeMapping>> {
        let mapping: Box<dyn TimeMapping> = match *self {
            Self::LinearSpeed {
                start_time,
                end_time,
                playback_speed,
            } => Box::new(LinearPlaybackDefinedSpeed::new(
                start_time,
                end_time,
                playback_speed,
            )?),
            Self::LinearDuration {
                start_time,
                end_time,
                sduration,
            } => Box::new(LinearPlaybackDefinedDuration::new(
                start_time, end_time, sduration,
            )?),
            Self::LinearSpeedDuration {
                start_time,
                playback_speed,
                sduration,
            } => Box::new(LinearPlaybackDefinedSpeedAndDuration::new(
                start_time,
                playback_speed,
                sduration,
            )?),
            Self::LogDuration {
                start_time,
                end_time,
                sduration,
            } => Box::new(LogarithmicPlaybackDefinedDuration::new(
                start_time, end_time, sduration,
            )?),
            Self::Periodic {
                start_time,
                end_time,
                period,
                cycles,
            } => Box::new(PeriodicPlayback::new(start_time, end_time, period, cycles)?),
            Self::Spin { period, azim_init } => Box::new(PeriodicPlayback::spin(period, azim_init)?),
            Self::Combined { ref children } => {
                let children = children
                    .iter()
                    .map(Self::to_mapping)
                    .collect::<PlotvidResult<Vec<_>>>()?;
                Box::new(CombinedTiming::new(children)?)
            }
        };
        Ok(mapping)
    }

    /// Validate the definition and wrap it in a fresh [`Timing`].
    pub fn build(&self) -> PlotvidResult<Timing> {
        self.to_mapping().map(Timing::from_boxed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/def.rs"]
mod tests;
