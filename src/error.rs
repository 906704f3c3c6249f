// src/error.rs

//! Error types for recipe generation
//!
//! Catalog-level errors abort the run. Everything else is scoped to a single
//! repository and reported alongside its name by the generator.

use thiserror::Error;

/// Errors produced while fetching metadata and generating recipes
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport failure while retrieving a URL
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A structured document (catalog or manifest) could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// A source URL does not follow `scheme://host/owner/repo[.git]`
    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),

    /// Template execution failed for a repository
    #[error("Failed to render recipe for {repository}: {message}")]
    Render { repository: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn fetch(url: &str, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = Error::fetch("https://example.com/a", "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.com/a: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_render_error_names_repository() {
        let err = Error::Render {
            repository: "geometry2".to_string(),
            message: "unknown variable".to_string(),
        };
        assert!(err.to_string().contains("geometry2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(msg) if msg.contains("denied")));
    }
}
