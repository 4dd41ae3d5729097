//! Scenes, videos and the export drivers that walk them.

/// Export drivers (`render_to_sink`, `write_video`, `write_images`).
pub mod export;
/// A draw callback bound to its timing.
pub mod scene;
/// Scenes composed on one render target.
pub mod video;
