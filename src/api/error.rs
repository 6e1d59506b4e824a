//! Error types raised by the HTTP collaborator.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`ApiError`] failures.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that can occur while talking to the game API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying builder failure.
        #[source]
        source: reqwest::Error,
    },
    /// The configured base URL and API path do not form a valid URL.
    #[error("invalid API url `{url}`")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },
    /// The request never reached the server or the response never arrived.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        /// Request path.
        path: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("unexpected response status {status} for `{path}`")]
    RequestStatus {
        /// Request path.
        path: String,
        /// Status returned by the server.
        status: StatusCode,
    },
    /// A success response carried a body that could not be decoded.
    #[error("failed to decode response for `{path}`")]
    DecodeResponse {
        /// Request path.
        path: String,
        /// Body decoding failure.
        #[source]
        source: reqwest::Error,
    },
}
