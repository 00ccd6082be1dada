use thiserror::Error;
use vellum_engine::encode::EncodeError;
use vellum_engine::raster::RasterError;
use vellum_engine::text::FontLoadError;

/// Everything a render call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The document (or a font) is not something we can decode.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Recognized, but not renderable.
    #[error("unsupported style: {0}")]
    UnsupportedStyle(String),
    /// Painting, shaping or encoding broke an internal invariant.
    #[error("render failed: {0}")]
    RenderFailed(String),
}

impl RenderError {
    /// `true` when the caller can fix the request.
    #[inline]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, RenderError::MalformedInput(_) | RenderError::UnsupportedStyle(_))
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::MalformedInput(err.to_string())
    }
}

impl From<FontLoadError> for RenderError {
    fn from(err: FontLoadError) -> Self {
        RenderError::MalformedInput(err.to_string())
    }
}

impl From<RasterError> for RenderError {
    fn from(err: RasterError) -> Self {
        RenderError::RenderFailed(err.to_string())
    }
}

impl From<EncodeError> for RenderError {
    fn from(err: EncodeError) -> Self {
        RenderError::RenderFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_caller_errors() {
        let err: RenderError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RenderError::MalformedInput(_)));
        assert!(err.is_caller_error());
    }

    #[test]
    fn raster_errors_are_engine_failures() {
        let err: RenderError = RasterError::Surface { width: 0, height: 3 }.into();
        assert!(matches!(err, RenderError::RenderFailed(_)));
        assert!(!err.is_caller_error());
    }
}
