//! Encoding sinks.
//!
//! Sinks consume rendered frames in video order and are driven by [`Video::render_to_sink`].
//!
//! [`Video::render_to_sink`]: crate::Video::render_to_sink

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Image-sequence sink (one file per frame).
pub mod images;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
