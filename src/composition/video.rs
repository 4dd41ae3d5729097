use crate::composition::scene::Scene;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::render::target::{FrameRGBA, RenderTarget};
use crate::timing::combine::{cumulative_starts, last_started};
use crate::timing::live::TimingSnapshot;

/// Where a video time falls: which scene, and how far into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLocation {
    /// Index into [`Video::scenes`].
    pub scene: usize,
    /// Scene time, `video_time - start_offset(scene)`.
    pub stime: f64,
}

/// Result of drawing one video time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedTime {
    /// Scene that drew the frame.
    pub location: SceneLocation,
    /// Timing state the scene drew with.
    pub timing: TimingSnapshot,
}

/// Scenes played back to back on one shared render target.
///
/// The scene list is fixed at construction, which also derives each scene's start offset, the
/// total duration and the frame grid `0, 1/fps, 2/fps, ...` strictly below the duration.
#[derive(Debug)]
pub struct Video<T: RenderTarget> {
    scenes: Vec<Scene<T>>,
    target: T,
    fps: Fps,
    starts: Vec<f64>,
    duration: f64,
    frame_count: u64,
}

impl<T: RenderTarget> Video<T> {
    /// Compose `scenes` in order over `target`.
    pub fn new(scenes: Vec<Scene<T>>, target: T, fps: Fps) -> PlotvidResult<Self> {
        if scenes.is_empty() {
            return Err(PlotvidError::empty_composition(
                "a video needs at least one scene",
            ));
        }
        let fps = Fps::new(fps.num, fps.den)?;
        let durations = scenes.iter().map(Scene::sduration).collect::<Vec<_>>();
        let (starts, duration) = cumulative_starts(&durations)?;
        let frame_count = fps.frames_below(duration);
        tracing::debug!(
            scenes = scenes.len(),
            duration,
            frame_count,
            fps = fps.as_f64(),
            "video composed"
        );
        Ok(Self {
            scenes,
            target,
            fps,
            starts,
            duration,
            frame_count,
        })
    }

    /// Scenes in playback order.
    pub fn scenes(&self) -> &[Scene<T>] {
        &self.scenes
    }

    /// The shared render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the shared render target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Give up the scenes and return the render target.
    pub fn into_target(self) -> T {
        self.target
    }

    /// Frame rate of the grid.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total duration in seconds: the sum of scene durations.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Video time at which each scene starts.
    pub fn start_offsets(&self) -> &[f64] {
        &self.starts
    }

    /// Number of grid ticks strictly below [`duration`](Self::duration).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Video time of grid tick `frame`.
    pub fn video_time(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Every grid tick as `(frame, video_time)`, in order.
    pub fn video_times(&self) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (0..self.frame_count).map(|k| (FrameIndex(k), self.fps.frames_to_secs(k)))
    }

    /// Scene showing at `video_time` and the scene time within it.
    ///
    /// A time on a boundary belongs to the scene starting there; times at or past the end go to
    /// the last scene.
    pub fn resolve(&self, video_time: f64) -> PlotvidResult<SceneLocation> {
        if !video_time.is_finite() || video_time < 0.0 {
            return Err(PlotvidError::configuration(format!(
                "video time must be finite and non-negative, got {video_time}"
            )));
        }
        let scene = last_started(&self.starts, video_time);
        Ok(SceneLocation {
            scene,
            stime: video_time - self.starts[scene],
        })
    }

    /// Draw the scene showing at `video_time` onto the target.
    pub fn render_frame(&mut self, video_time: f64) -> PlotvidResult<RenderedTime> {
        let location = self.resolve(video_time)?;
        let scene = &mut self.scenes[location.scene];
        let timing = scene.draw_at_scenetime(location.stime, &mut self.target)?;
        Ok(RenderedTime { location, timing })
    }

    /// Draw `video_time` and rasterize the target.
    pub fn capture_frame(&mut self, video_time: f64) -> PlotvidResult<FrameRGBA> {
        self.render_frame(video_time)?;
        self.target.render()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/video.rs"]
mod tests;
