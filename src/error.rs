//! Error types for the reportml library.
//!
//! The parsing pipeline itself is total: malformed input degrades to literal
//! blocks and never produces an `Error`. Errors exist at the rendering seams
//! (visitor failures, serialization) and in callers doing I/O.

use std::io;
use thiserror::Error;

/// Result type alias for reportml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering (interactive tree, HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// JSON serialization failure.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A section failed to materialize inside its fault boundary.
    ///
    /// This variant is reported through [`crate::render::Telemetry`] and
    /// recovered with a raw-text fallback; it never crosses a section boundary.
    #[error("Section '{id}' failed to render: {reason}")]
    SectionFault {
        /// Identifier of the failing section.
        id: String,
        /// Human-readable failure description.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SectionFault {
            id: "section-2".to_string(),
            reason: "visitor panicked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Section 'section-2' failed to render: visitor panicked"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
