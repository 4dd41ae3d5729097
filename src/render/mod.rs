//! Render targets: what draw callbacks mutate and what export drivers capture.

/// CPU figure with axes and marks.
pub mod figure;
/// Render target trait and frame type.
pub mod target;
