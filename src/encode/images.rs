use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::target::FrameRGBA;

/// Options for [`ImageSequenceSink`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageSequenceOpts {
    /// Output directory, created on `begin`.
    pub directory: PathBuf,
    /// File extension without the dot; selects the image format.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// File name prefix before the zero-padded index.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Background used for formats without an alpha channel (straight RGBA8).
    #[serde(default = "default_bg")]
    pub bg_rgba: [u8; 4],
}

fn default_extension() -> String {
    "png".to_owned()
}

fn default_prefix() -> String {
    "frame_".to_owned()
}

fn default_bg() -> [u8; 4] {
    [255, 255, 255, 255]
}

impl ImageSequenceOpts {
    /// PNG frames named `frame_<index>.png` in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: default_extension(),
            prefix: default_prefix(),
            bg_rgba: default_bg(),
        }
    }

    /// Same options writing `extension` files (e.g. `"jpg"`); a leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let ext: String = extension.into();
        self.extension = ext.trim_start_matches('.').to_owned();
        self
    }

    /// Path of frame `idx` when the export has `frame_count` frames.
    pub fn frame_path(&self, idx: FrameIndex, frame_count: u64) -> PathBuf {
        let width = frame_count.to_string().len();
        self.directory.join(format!(
            "{}{:0width$}.{}",
            self.prefix, idx.0, self.extension
        ))
    }

    fn format(&self) -> PlotvidResult<image::ImageFormat> {
        image::ImageFormat::from_extension(&self.extension).ok_or_else(|| {
            PlotvidError::configuration(format!(
                "unsupported image extension '{}'",
                self.extension
            ))
        })
    }
}

/// Sink that saves every frame as one image file.
#[derive(Debug)]
pub struct ImageSequenceSink {
    opts: ImageSequenceOpts,
    format: Option<image::ImageFormat>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl ImageSequenceSink {
    /// Create a sink writing into `opts.directory`.
    pub fn new(opts: ImageSequenceOpts) -> Self {
        Self {
            opts,
            format: None,
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Files written since the latest `begin`, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save(
        &self,
        path: &Path,
        frame: &FrameRGBA,
        format: image::ImageFormat,
    ) -> PlotvidResult<()> {
        let straight = frame.to_straight_rgba8();
        if supports_alpha(format) {
            image::save_buffer_with_format(
                path,
                &straight,
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                format,
            )
            .with_context(|| format!("write image '{}'", path.display()))?;
        } else {
            let rgb = straight_over_bg_to_rgb8(&straight, self.opts.bg_rgba);
            image::save_buffer_with_format(
                path,
                &rgb,
                frame.width,
                frame.height,
                image::ColorType::Rgb8,
                format,
            )
            .with_context(|| format!("write image '{}'", path.display()))?;
        }
        Ok(())
    }
}

impl FrameSink for ImageSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PlotvidResult<()> {
        let format = self.opts.format()?;
        std::fs::create_dir_all(&self.opts.directory).with_context(|| {
            format!(
                "failed to create image directory '{}'",
                self.opts.directory.display()
            )
        })?;
        self.format = Some(format);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PlotvidResult<()> {
        let (Some(cfg), Some(format)) = (self.cfg, self.format) else {
            return Err(PlotvidError::encode("image sink not started"));
        };
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(PlotvidError::encode(
                "image sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        frame.validate()?;

        let path = self.opts.frame_path(idx, cfg.frame_count);
        self.save(&path, frame, format)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PlotvidResult<()> {
        self.cfg = None;
        self.format = None;
        Ok(())
    }
}

fn supports_alpha(format: image::ImageFormat) -> bool {
    !matches!(format, image::ImageFormat::Jpeg)
}

fn straight_over_bg_to_rgb8(straight: &[u8], bg_rgba: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(straight.len() / 4 * 3);
    for px in straight.chunks_exact(4) {
        let a = u16::from(px[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255_u16(u16::from(px[c]), a)
                + mul_div255_u16(u16::from(bg_rgba[c]), inv);
            out.push(v.min(255) as u8);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/images.rs"]
mod tests;
