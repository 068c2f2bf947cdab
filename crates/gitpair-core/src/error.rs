use std::path::PathBuf;

/// Errors that can occur across gitpair.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette::Report` at the boundary.
///
/// # Examples
///
/// ```
/// use gitpair_core::GitpairError;
///
/// let err = GitpairError::Api { status: 404, message: "Not Found".into() };
/// assert!(err.to_string().contains("404"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GitpairError {
    /// Filesystem or terminal I/O failure.
    #[error("IO error: {0}")]
    #[diagnostic(code(gitpair::io))]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(code(gitpair::config))]
    Config(String),

    /// The GitHub API answered with a non-success status.
    #[error("GitHub API error {status}: {message}")]
    #[diagnostic(
        code(gitpair::api),
        help("check the owner/repo spelling and that the access token can read the repository")
    )]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Network or transport failure talking to the API.
    #[error("HTTP error: {0}")]
    #[diagnostic(code(gitpair::http))]
    Http(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    #[diagnostic(code(gitpair::serialization))]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(gitpair::toml))]
    Toml(#[from] toml::de::Error),

    /// A repository reference that is not `owner/repo`.
    #[error("invalid repository '{0}', expected owner/repo")]
    #[diagnostic(code(gitpair::repo))]
    InvalidRepo(String),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    #[diagnostic(code(gitpair::file_not_found))]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GitpairError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = GitpairError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn api_error_includes_status_code() {
        let err = GitpairError::Api {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "GitHub API error 404: Not Found");
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = GitpairError::FileNotFound(PathBuf::from("/tmp/.gitpair.toml"));
        assert!(err.to_string().contains("/tmp/.gitpair.toml"));
    }
}
