use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::timing::live::Timing;
use crate::timing::mapping::{TimeMapping, require_positive_duration};

/// Several mappings played back to back as one.
///
/// Scene time `stime` is routed to the last child that has started by `stime`, so a scene time
/// sitting exactly on a boundary belongs to the child that starts there. Scene times before 0
/// go to the first child and scene times past the end go to the last one; in both cases the
/// child's own policy decides how to extrapolate.
#[derive(Debug)]
pub struct CombinedTiming {
    children: Vec<Box<dyn TimeMapping>>,
    starts: Vec<f64>,
    sduration: f64,
}

impl CombinedTiming {
    /// Concatenate `children` in order.
    pub fn new(children: Vec<Box<dyn TimeMapping>>) -> PlotvidResult<Self> {
        if children.is_empty() {
            return Err(PlotvidError::empty_composition(
                "cannot combine an empty list of timings",
            ));
        }
        let durations = children
            .iter()
            .map(|c| c.sduration())
            .collect::<Vec<_>>();
        let (starts, sduration) = cumulative_starts(&durations)?;
        Ok(Self {
            children,
            starts,
            sduration,
        })
    }

    /// Number of child mappings.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always `false`; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Scene time at which each child starts.
    pub fn start_offsets(&self) -> &[f64] {
        &self.starts
    }

    /// Child index and child-local scene time for `stime`.
    pub fn locate(&self, stime: f64) -> (usize, f64) {
        let idx = last_started(&self.starts, stime);
        (idx, stime - self.starts[idx])
    }
}

impl TimeMapping for CombinedTiming {
    fn sduration(&self) -> f64 {
        self.sduration
    }

    fn stime_to_time(&self, stime: f64) -> f64 {
        let (idx, local) = self.locate(stime);
        self.children[idx].stime_to_time(local)
    }
}

/// Combine timings into one [`Timing`] spanning their concatenated durations.
///
/// Live state of the inputs is discarded; the combined timing starts un-updated.
pub fn combine_timings(timings: impl IntoIterator<Item = Timing>) -> PlotvidResult<Timing> {
    let children = timings
        .into_iter()
        .map(Timing::into_mapping)
        .collect::<Vec<_>>();
    Ok(Timing::new(CombinedTiming::new(children)?))
}

/// Start offset of every entry plus the total, validating each duration.
pub(crate) fn cumulative_starts(durations: &[f64]) -> PlotvidResult<(Vec<f64>, f64)> {
    let mut starts = Vec::with_capacity(durations.len());
    let mut total = 0.0;
    for &d in durations {
        require_positive_duration(d)?;
        starts.push(total);
        total += d;
    }
    Ok((starts, total))
}

/// Index of the last start `<= t`; 0 when `t` precedes every start.
pub(crate) fn last_started(starts: &[f64], t: f64) -> usize {
    starts.partition_point(|&s| s <= t).saturating_sub(1)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/combine.rs"]
mod tests;
