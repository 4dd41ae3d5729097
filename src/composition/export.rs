//! Export drivers: walk the frame grid and stream every frame into a sink.

use std::path::PathBuf;

use crate::composition::video::Video;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::images::{ImageSequenceOpts, ImageSequenceSink};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::PlotvidResult;
use crate::render::target::RenderTarget;

/// Export statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames on the video's grid.
    pub frames_total: u64,
    /// Frames drawn and handed to the sink.
    pub frames_rendered: u64,
}

impl<T: RenderTarget> Video<T> {
    /// Draw every grid tick in order and push the rasterized frames into `sink`.
    ///
    /// Once `sink.begin` succeeded, `sink.end` is called exactly once, also when drawing,
    /// rasterizing or pushing fails. The first error wins.
    #[tracing::instrument(
        skip(self, sink),
        fields(frames = self.frame_count(), duration = self.duration())
    )]
    pub fn render_to_sink(&mut self, sink: &mut dyn FrameSink) -> PlotvidResult<RenderStats> {
        let canvas = self.target().canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps(),
            frame_count: self.frame_count(),
        })?;

        let pushed = self.push_frames(sink);
        let ended = sink.end();
        match (pushed, ended) {
            (Ok(stats), Ok(())) => {
                tracing::info!(frames = stats.frames_rendered, "export finished");
                Ok(stats)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), ended) => {
                match ended {
                    Ok(()) => tracing::warn!(error = %e, "export failed; sink released"),
                    Err(end_err) => tracing::warn!(
                        error = %e,
                        end_error = %end_err,
                        "export failed; releasing the sink failed too"
                    ),
                }
                Err(e)
            }
        }
    }

    /// Encode the video to an MP4 file through the system `ffmpeg`.
    ///
    /// `metadata` entries are written as container metadata (`title`, `artist`, ...).
    pub fn write_video<K, V>(
        &mut self,
        path: impl Into<PathBuf>,
        metadata: impl IntoIterator<Item = (K, V)>,
    ) -> PlotvidResult<RenderStats>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let opts = metadata
            .into_iter()
            .fold(FfmpegSinkOpts::new(path), |opts, (k, v)| {
                opts.with_metadata(k, v)
            });
        self.write_video_with(opts)
    }

    /// Encode the video with explicit [`FfmpegSinkOpts`].
    pub fn write_video_with(&mut self, opts: FfmpegSinkOpts) -> PlotvidResult<RenderStats> {
        let mut sink = FfmpegSink::new(opts);
        self.render_to_sink(&mut sink)
    }

    /// Save every frame as `frame_<index>.<extension>` in `directory`.
    ///
    /// Indices are zero-padded to the number of digits of the frame count.
    pub fn write_images(
        &mut self,
        directory: impl Into<PathBuf>,
        extension: &str,
    ) -> PlotvidResult<RenderStats> {
        self.write_images_with(ImageSequenceOpts::new(directory).with_extension(extension))
    }

    /// Save every frame with explicit [`ImageSequenceOpts`].
    pub fn write_images_with(&mut self, opts: ImageSequenceOpts) -> PlotvidResult<RenderStats> {
        let mut sink = ImageSequenceSink::new(opts);
        self.render_to_sink(&mut sink)
    }

    fn push_frames(&mut self, sink: &mut dyn FrameSink) -> PlotvidResult<RenderStats> {
        let total = self.frame_count();
        let mut stats = RenderStats {
            frames_total: total,
            frames_rendered: 0,
        };
        for k in 0..total {
            let idx = FrameIndex(k);
            let video_time = self.video_time(idx);
            let drawn = self.render_frame(video_time)?;
            let frame = self.target_mut().render()?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
            tracing::debug!(
                frame = k,
                total,
                video_time,
                scene = drawn.location.scene,
                indextime = drawn.timing.indextime,
                "frame rendered"
            );
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/export.rs"]
mod tests;
