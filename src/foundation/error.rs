/// Convenience result type used across adcanvas.
pub type CreativeResult<T> = Result<T, CreativeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CreativeError {
    /// Invalid user-provided or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image, font or data URL could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors raised while compositing a layout into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// The output raster surface could not be acquired.
    #[error("surface error: {0}")]
    Surface(String),

    /// Required image loads did not complete in time.
    #[error("timed out after {millis} ms waiting for {pending} image load(s)")]
    Timeout {
        /// Elapsed budget in milliseconds.
        millis: u64,
        /// Loads still outstanding when the budget ran out.
        pending: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CreativeError {
    /// Build a [`CreativeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CreativeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CreativeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CreativeError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// True when the error means "no image was produced, retry or show a placeholder".
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Self::Surface(_) | Self::Timeout { .. } | Self::Render(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
