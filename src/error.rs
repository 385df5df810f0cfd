/// All errors that can occur while talking to the spreadsheet endpoint or
/// running one of the page flows.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON envelope we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The endpoint answered with `status: "error"`.
    #[error("remote store reported an error: {message}")]
    Remote { message: String },

    /// A required form field was missing or blank.
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    /// An admin write was attempted without a session credential.
    #[error("admin session expired, please log in again")]
    SessionExpired,

    /// A flow referenced a record that is not in the current mirror.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// No identifier is left for a new record.
    #[error("no free {entity} id left")]
    IdExhausted { entity: &'static str },

    /// The user declined a confirmation step.
    #[error("cancelled by user")]
    Cancelled,

    /// A configuration value was missing or malformed.
    #[error("invalid configuration for {key}: {message}")]
    Config { key: &'static str, message: String },
}

impl BoardError {
    /// Transport and remote-logic failures: the kinds a background poll
    /// swallows while keeping the previous snapshot.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            BoardError::Http { .. }
                | BoardError::UnexpectedStatus { .. }
                | BoardError::ResponseBody { .. }
                | BoardError::Decode { .. }
                | BoardError::Remote { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
