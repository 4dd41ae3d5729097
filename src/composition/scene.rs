use crate::foundation::error::PlotvidResult;
use crate::render::target::RenderTarget;
use crate::timing::live::{Timing, TimingSnapshot};

/// Caller-supplied draw callback: `(index_time, target, timing)`.
///
/// The target has been cleared before the call. `timing` carries the current scene time,
/// index time and playback rate, which faders read.
pub type DrawFn<T> = Box<dyn FnMut(f64, &mut T, &Timing) -> PlotvidResult<()>>;

/// A draw callback bound to the timing that drives it.
pub struct Scene<T> {
    name: String,
    timing: Timing,
    draw: DrawFn<T>,
}

impl<T: RenderTarget> Scene<T> {
    /// Bind `draw` to `timing`.
    pub fn new(
        timing: Timing,
        draw: impl FnMut(f64, &mut T, &Timing) -> PlotvidResult<()> + 'static,
    ) -> Self {
        Self {
            name: String::new(),
            timing,
            draw: Box::new(draw),
        }
    }

    /// Same scene with a name used in logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name given with [`with_name`](Self::with_name), empty by default.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene's timing.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Scene duration in playback seconds.
    pub fn sduration(&self) -> f64 {
        self.timing.sduration()
    }

    /// Clear `target` and draw the scene at `index_time`.
    pub fn draw(&mut self, index_time: f64, target: &mut T) -> PlotvidResult<()> {
        target.clear();
        (self.draw)(index_time, target, &self.timing)
    }

    /// Advance the timing to `stime` and draw the index time it maps to.
    pub fn draw_at_scenetime(
        &mut self,
        stime: f64,
        target: &mut T,
    ) -> PlotvidResult<TimingSnapshot> {
        let snapshot = self.timing.update_with_stime(stime);
        self.draw(snapshot.indextime, target)?;
        Ok(snapshot)
    }
}

impl<T> std::fmt::Debug for Scene<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/scene.rs"]
mod tests;
