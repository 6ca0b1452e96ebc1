/// Convenience result type used across gridmorph.
pub type GridmorphResult<T> = Result<T, GridmorphError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GridmorphError {
    /// Invalid user-provided or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or stepping animation timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors in the consumer thread lifecycle or the command channel.
    #[error("engine error: {0}")]
    Engine(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridmorphError {
    /// Build a [`GridmorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridmorphError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GridmorphError::Engine`] value.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}
