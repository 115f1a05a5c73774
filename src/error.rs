//! Crate-level error types.

use std::fmt;

use naga_oil::compose::ComposerError;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the wormhole crate.
#[derive(Debug)]
pub enum WormholeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A WGSL shader failed to compose.
    Shader(Box<ComposerError>),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for WormholeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "shader composition error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for WormholeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e.as_ref()),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for WormholeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<Box<ComposerError>> for WormholeError {
    fn from(e: Box<ComposerError>) -> Self {
        Self::Shader(e)
    }
}

impl From<std::io::Error> for WormholeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err: WormholeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn message_variants_have_no_source() {
        let err = WormholeError::OptionsParse("bad key".into());
        assert_eq!(err.to_string(), "options parse error: bad key");
        assert!(err.source().is_none());
    }
}
