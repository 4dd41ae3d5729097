//! Blend helpers driven by scene timing.

/// Fade-in curves over index-time and scene-time windows.
pub mod fade;
