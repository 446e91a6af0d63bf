/// Convenience result type used across scrollfx.
pub type ScrollFxResult<T> = Result<T, ScrollFxError>;

/// Error taxonomy for the construction and configuration surfaces.
///
/// Runtime callbacks (timers, frames, intersection deliveries) never fail; they
/// degrade to "no visual change" instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollFxError {
    /// Invalid options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Page fixtures that cannot describe a document (duplicate keys, bad rects).
    #[error("markup error: {0}")]
    Markup(String),

    /// Errors when serializing or deserializing fixtures and configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollFxError {
    /// Build a [`ScrollFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollFxError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`ScrollFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollFxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
