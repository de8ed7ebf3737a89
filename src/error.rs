//! Crate-level error types.

use std::fmt;

use crate::assets::TextureSetError;
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the woodbox crate.
#[derive(Debug)]
pub enum WoodboxError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// One or more material textures failed to load.
    Textures(TextureSetError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser host page failure (missing element, JS exception).
    Web(String),
}

impl fmt::Display for WoodboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Textures(e) => write!(f, "texture error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for WoodboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Textures(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for WoodboxError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<TextureSetError> for WoodboxError {
    fn from(e: TextureSetError) -> Self {
        Self::Textures(e)
    }
}

impl From<std::io::Error> for WoodboxError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_variant_context() {
        let err = WoodboxError::OptionsParse("expected `=`".into());
        assert_eq!(err.to_string(), "options parse error: expected `=`");

        let io = WoodboxError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(io.to_string().starts_with("I/O error"));
        assert!(std::error::Error::source(&io).is_some());
    }
}
