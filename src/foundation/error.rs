/// Convenience result type used across plotvid.
pub type PlotvidResult<T> = Result<T, PlotvidError>;

/// Top-level error taxonomy used by timing, composition and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlotvidError {
    /// Invalid timing policy, fps or export parameters. Raised eagerly at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A timing or scene list that must be non-empty was empty.
    #[error("empty composition: {0}")]
    EmptyComposition(String),

    /// Inverse index-time lookup did not converge.
    #[error("inversion error: {0}")]
    Inversion(String),

    /// Errors raised while drawing or rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised by a frame sink (encoder process, image writer).
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotvidError {
    /// Build a [`PlotvidError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PlotvidError::EmptyComposition`] value.
    pub fn empty_composition(msg: impl Into<String>) -> Self {
        Self::EmptyComposition(msg.into())
    }

    /// Build a [`PlotvidError::Inversion`] value.
    pub fn inversion(msg: impl Into<String>) -> Self {
        Self::Inversion(msg.into())
    }

    /// Build a [`PlotvidError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlotvidError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PlotvidError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
