/// Convenience result type used across the crate.
pub type HalftoneResult<T> = Result<T, HalftoneError>;

/// Top-level error taxonomy used by the sampler, animator and renderer.
#[derive(thiserror::Error, Debug)]
pub enum HalftoneError {
    /// Invalid caller-provided data (pixel buffers, sizes, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while driving the phase animator.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors raised by the drawing surface or the encoder.
    #[error("render error: {0}")]
    Render(String),

    /// The precomputed dot sidecar could not be read or parsed.
    #[error("sidecar error: {0}")]
    Sidecar(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HalftoneError {
    /// Build a [`HalftoneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HalftoneError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`HalftoneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HalftoneError::Sidecar`] value.
    pub fn sidecar(msg: impl Into<String>) -> Self {
        Self::Sidecar(msg.into())
    }

    /// Build a [`HalftoneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
