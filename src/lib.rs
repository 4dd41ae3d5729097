//! plotvid drives a figure through a sequence of time-remapped scenes and exports the frames.
//!
//! A video's linear playback clock is mapped, scene by scene, onto each scene's own "index
//! time": the coordinate of the data being visualised. Every frame of the export resolves to a
//! scene and a scene time, the scene's [`Timing`] turns that into an index time, and the scene's
//! draw callback redraws a shared [`RenderTarget`] for it. The rasterized frames are streamed
//! into a [`FrameSink`]: the system `ffmpeg` for MP4 output, or one image file per frame.
//!
//! # Pipeline overview
//!
//! 1. **Time**: `video time -> (scene, scene time)` via cumulative scene offsets
//! 2. **Remap**: `scene time -> index time` via the scene's [`TimeMapping`] policy
//! 3. **Draw**: the callback redraws the cleared target, reading faders from the timing
//! 4. **Encode**: rasterize ([`Figure`] uses `vello_cpu`) and push into the sink
//!
//! Everything runs on the calling thread, in increasing time order.
//!
//! # Example
//!
//! ```no_run
//! use plotvid::{Canvas, Figure, Fps, LinearPlaybackDefinedSpeed, Point, Rect, Scene, Timing, Video};
//!
//! # fn main() -> plotvid::PlotvidResult<()> {
//! let timing = Timing::new(LinearPlaybackDefinedSpeed::new(0.0, 100.0, 10.0)?);
//! let scene = Scene::new(timing, |ix, fig: &mut Figure, _timing| {
//!     let ax = fig.add_axes(Rect::new(0.0, 0.0, 640.0, 360.0))?;
//!     ax.set_xlim(0.0, 100.0)?.set_ylim(0.0, 1.0)?;
//!     ax.plot(vec![Point::new(0.0, 0.0), Point::new(ix, ix / 100.0)], 3.0, [30, 90, 200, 255]);
//!     Ok(())
//! });
//! let figure = Figure::new(Canvas::new(640, 360)?)?;
//! let mut video = Video::new(vec![scene], figure, Fps::whole(30)?)?;
//! video.write_video("out/growth.mp4", [("title", "growth")])?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod encode;
mod foundation;
mod render;
mod timing;

pub use animation::fade::{
    EndIndexFade, FadeScale, Fader, IndexWindowFade, SceneWindowFade, StartIndexFade,
};
pub use composition::export::RenderStats;
pub use composition::scene::{DrawFn, Scene};
pub use composition::video::{RenderedTime, SceneLocation, Video};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::images::{ImageSequenceOpts, ImageSequenceSink};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig, ensure_parent_dir};
pub use foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8Premul, Vec2,
};
pub use foundation::error::{PlotvidError, PlotvidResult};
pub use render::figure::{AxisScale, Axes, Figure, Mark, MarkKind};
pub use render::target::{FrameRGBA, RenderTarget};
pub use timing::combine::{CombinedTiming, combine_timings};
pub use timing::def::TimingDef;
pub use timing::live::{DEFAULT_RATE_STEP, INVERSION_TOLERANCE, Timing, TimingSnapshot};
pub use timing::mapping::{
    LinearPlaybackDefinedDuration, LinearPlaybackDefinedSpeed,
    LinearPlaybackDefinedSpeedAndDuration, LogarithmicPlaybackDefinedDuration, TimeMapping,
};
pub use timing::periodic::PeriodicPlayback;
