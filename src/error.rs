//! Error types for the Greenchoice portal client.
//!
//! Each layer of the retrieval chain has its own error type so callers can tell
//! a rejected login apart from a flaky network or a payload that changed shape.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Portal retrieval errors
    #[error("retrieval error")]
    Retrieval(#[from] RetrievalError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// HTML parsing errors raised while scraping login pages.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Element not found in HTML
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// Element exists but lacks the expected attribute
    #[error("element '{selector}' has no '{attribute}' attribute")]
    MissingAttribute { selector: String, attribute: String },

    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Login handshake failures.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or password is empty
    #[error("username or password not set")]
    MissingCredentials,

    /// The portal did not hand out the OIDC form after posting credentials
    #[error("login failed, check your credentials")]
    CredentialsRejected,

    /// A login page did not have the structure we scrape
    #[error("unexpected login page")]
    MalformedPage(#[from] ParseError),

    /// Network failure during the handshake
    #[error("login request failed")]
    Transport(#[from] TransportError),
}

/// Network and HTTP-level failures.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("server error (status {status}): {body}")]
    Status { status: u16, body: String },

    /// Redirect chain exceeded the configured cap
    #[error("stopped following redirects after {limit} hops")]
    TooManyRedirects { limit: usize },

    /// Redirect response without a usable location
    #[error("invalid redirect location: {location}")]
    InvalidRedirect { location: String },

    /// Endpoint path could not be joined onto the portal URL
    #[error("invalid endpoint URL: {url}")]
    InvalidUrl { url: String },
}

/// Response bodies that could not be interpreted.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body is not the JSON shape we expect for the call
    #[error("failed to decode response of '{call}': {source}; body: {body}")]
    Json {
        call: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading timestamp is not in the portal's format
    #[error("failed to parse timestamp '{value}': {message}")]
    Timestamp { value: String, message: String },

    /// Account is flagged for a product the payload doesn't contain
    #[error("meter readings contain no product at index {index}")]
    MissingProduct { index: usize },
}

/// Umbrella failure of one retrieval, wrapping the first step that failed.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("authentication failed")]
    Auth(#[from] AuthError),

    #[error("could not decode portal response")]
    Decode(#[from] DecodeError),

    /// Retry budget exhausted on a transport failure
    #[error("request '{call}' failed")]
    Transport {
        call: String,
        #[source]
        source: TransportError,
    },

    /// Session kept expiring after the allowed re-logins
    #[error("session expired during '{call}'")]
    SessionExpired { call: String },

    #[error("could not find customer details with ID {customer_number}")]
    CustomerNotFound { customer_number: i64 },
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ParseError {
    /// Creates an element not found error.
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attribute(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            selector: selector.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }
}

impl TransportError {
    /// Creates a status error from HTTP status and response body.
    pub fn status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            body: body.into(),
        }
    }
}

impl DecodeError {
    /// Creates a JSON decode error that keeps the raw body for diagnostics.
    pub fn json(
        call: impl Into<String>,
        body: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Json {
            call: call.into(),
            body: body.into(),
            source,
        }
    }

    /// Creates a timestamp parse error.
    pub fn timestamp(value: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Timestamp {
            value: value.into(),
            message: err.to_string(),
        }
    }
}

impl RetrievalError {
    /// Creates a transport error for the named call.
    pub fn transport(call: impl Into<String>, source: TransportError) -> Self {
        Self::Transport {
            call: call.into(),
            source,
        }
    }

    /// Creates a session expired error for the named call.
    pub fn session_expired(call: impl Into<String>) -> Self {
        Self::SessionExpired { call: call.into() }
    }

    /// Whether the failure means the credentials themselves are wrong.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::CredentialsRejected | AuthError::MissingCredentials)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod config_error {
        use super::*;

        #[test]
        fn test_env_parse_error() {
            let err = ConfigError::env_parse("missing field `username`");
            assert_eq!(
                err.to_string(),
                "failed to parse environment variables: missing field `username`"
            );
        }

        #[test]
        fn test_invalid_error() {
            let err = ConfigError::invalid("url", "relative URL without a base");
            assert_eq!(
                err.to_string(),
                "invalid configuration value for url: relative URL without a base"
            );
        }
    }

    mod parse_error {
        use super::*;

        #[test]
        fn test_element_not_found() {
            let err = ParseError::element_not_found(r#"input[name="code"]"#);
            assert_eq!(err.to_string(), r#"element not found: input[name="code"]"#);
        }

        #[test]
        fn test_missing_attribute() {
            let err = ParseError::missing_attribute("input", "value");
            assert_eq!(err.to_string(), "element 'input' has no 'value' attribute");
        }
    }

    mod decode_error {
        use super::*;

        #[test]
        fn test_json_error_includes_raw_body() {
            let source = serde_json::from_str::<serde_json::Value>("<html>oops").unwrap_err();
            let err = DecodeError::json("GetTariefOvereenkomst", "<html>oops", source);
            let message = err.to_string();
            assert!(message.contains("GetTariefOvereenkomst"));
            assert!(message.contains("body: <html>oops"));
        }

        #[test]
        fn test_timestamp_error() {
            let err = DecodeError::timestamp("10-03-2023", "input contains invalid characters");
            assert_eq!(
                err.to_string(),
                "failed to parse timestamp '10-03-2023': input contains invalid characters"
            );
        }
    }

    mod retrieval_error {
        use super::*;

        #[test]
        fn test_transport() {
            let err = RetrievalError::transport(
                "OpnamesOphalen",
                TransportError::Status {
                    status: 500,
                    body: "boom".to_string(),
                },
            );
            assert_eq!(err.to_string(), "request 'OpnamesOphalen' failed");
            assert!(!err.is_auth_failure());
        }

        #[test]
        fn test_customer_not_found() {
            let err = RetrievalError::CustomerNotFound {
                customer_number: 42,
            };
            assert_eq!(err.to_string(), "could not find customer details with ID 42");
        }

        #[test]
        fn test_auth_failure_classification() {
            let err: RetrievalError = AuthError::CredentialsRejected.into();
            assert!(err.is_auth_failure());

            let err: RetrievalError =
                AuthError::MalformedPage(ParseError::element_not_found("input")).into();
            assert!(!err.is_auth_failure());
        }
    }

    mod error_conversion {
        use super::*;

        #[test]
        fn test_retrieval_error_conversion() {
            let err: Error = RetrievalError::session_expired("OpnamesOphalen").into();
            assert!(matches!(err, Error::Retrieval(_)));
        }

        #[test]
        fn test_anyhow_conversion() {
            let err = Error::Config(ConfigError::env_parse("test"));
            let anyhow_err: anyhow::Error = err.into();
            assert!(anyhow_err.to_string().contains("configuration error"));
        }
    }
}
