//! Error types and result handling for Subtis operations.
//!
//! All fallible library operations return a [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! Every [`enum@Error`] falls into one of five [`ErrorKind`]s:
//!
//! - **Missing context**: a required input (file name, link, id) is absent and
//!   no request was issued
//! - **Transport**: connection failures and timeouts
//! - **Protocol**: non-200 statuses, malformed or incomplete JSON
//! - **Filesystem**: temp directory creation or file write failures
//! - **Configuration**: an unreadable or invalid config, raised at start-up
//!   before any request flow exists
//!
//! The clients absorb transport, protocol and filesystem failures into a
//! "no subtitle" outcome; only missing context reaches the caller as an `Err`.
//!
//! # Examples
//!
//! ```rust
//! use subtis::{Error, ErrorKind};
//!
//! let error = Error::missing_context("file name");
//! assert_eq!(error.kind(), ErrorKind::MissingContext);
//!
//! let error = Error::status("https://api.subt.is/v1/subtitle/link/7", 404);
//! assert_eq!(error.kind(), ErrorKind::Protocol);
//! ```

use thiserror::Error;

/// Type alias for Results with Subtis errors.
///
/// # Examples
///
/// ```rust
/// use subtis::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Subtis operations.
///
/// # Variants
///
/// * [`Network`](Error::Network) - HTTP client and connection errors
/// * [`Status`](Error::Status) - Non-success HTTP status codes
/// * [`Parse`](Error::Parse) - Response format errors
/// * [`MissingContext`](Error::MissingContext) - Required input absent
/// * [`Io`](Error::Io) - File system errors
/// * [`Json`](Error::Json) - JSON deserialization errors
/// * [`Config`](Error::Config) - Invalid configuration
/// * [`Transport`](Error::Transport) - Failures reported by non-reqwest transports
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// Wraps errors from reqwest, including connection failures, DNS
    /// resolution failures and request timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status other than 200.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be interpreted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use subtis::Error;
    ///
    /// let error = Error::parse("Missing subtitle_link in response");
    /// let error = Error::parse("Invalid UTF-8 in subtitle body");
    /// ```
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required input was absent, so nothing was requested.
    #[error("Missing context: {0}")]
    MissingContext(String),

    /// File system and IO operation errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded or built.
    #[error("Config error: {0}")]
    Config(String),

    /// A [`Transport`](crate::net::Transport) other than the reqwest one
    /// could not complete the request.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure category of an [`enum@Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input absent, aborted before any request.
    MissingContext,
    /// Connection or timeout failure.
    Transport,
    /// Non-200 status or malformed/incomplete response.
    Protocol,
    /// Temp directory or file write failure.
    Filesystem,
    /// Invalid or unreadable configuration.
    Configuration,
}

impl Error {
    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a missing-context error naming the absent input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use subtis::Error;
    ///
    /// let error = Error::missing_context("file name");
    /// assert_eq!(error.to_string(), "Missing context: file name");
    /// ```
    pub fn missing_context(what: impl Into<String>) -> Self {
        Error::MissingContext(what.into())
    }

    /// Creates a status error for a request that did not return 200.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Error::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingContext(_) => ErrorKind::MissingContext,
            Error::Network(_) | Error::Transport(_) => ErrorKind::Transport,
            Error::Io(_) => ErrorKind::Filesystem,
            Error::Status { .. } | Error::Parse(_) | Error::Json(_) => ErrorKind::Protocol,
            Error::Config(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status code carried by this error, if any.
    ///
    /// Transport failures report `0`, matching how the request log prints
    /// a request that never got a response.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Status { status, .. } => *status,
            Error::Network(e) => e.status().map(|s| s.as_u16()).unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Config(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::missing_context("id").kind(),
            ErrorKind::MissingContext
        );
        assert_eq!(Error::status("u", 500).kind(), ErrorKind::Protocol);
        assert_eq!(Error::parse("bad").kind(), ErrorKind::Protocol);
        assert_eq!(Error::transport("refused").kind(), ErrorKind::Transport);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(Error::from(io).kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_config_errors_are_not_protocol_errors() {
        assert_eq!(Error::config("bad").kind(), ErrorKind::Configuration);
        let toml_err = toml::from_str::<toml::Value>("= 1").unwrap_err();
        assert_eq!(Error::from(toml_err).kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Error::status("u", 404).status_code(), 404);
        assert_eq!(Error::parse("x").status_code(), 0);
    }
}
