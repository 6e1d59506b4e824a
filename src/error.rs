use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by list controller operations.
///
/// Every variant is local to the operation that produced it; the list is
/// never left half-updated.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The request never reached the server or its response never arrived.
    #[error("network failure")]
    Network(#[source] ApiError),
    /// The server answered with a non-success status.
    #[error("server rejected the request with status {status}")]
    Server {
        /// Status returned by the server.
        status: StatusCode,
        /// Transport-level detail.
        #[source]
        source: ApiError,
    },
    /// The server reported success but its payload could not be understood.
    #[error("malformed server response")]
    MalformedResponse(#[source] ApiError),
    /// The controller was shut down before the operation settled.
    #[error("controller has been shut down")]
    ShutDown,
}

impl ControllerError {
    /// Status code returned by the server, when the failure carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ControllerError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for ControllerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestStatus { status, .. } => ControllerError::Server {
                status,
                source: err,
            },
            ApiError::DecodeResponse { .. } => ControllerError::MalformedResponse(err),
            ApiError::ClientBuilder { .. }
            | ApiError::InvalidUrl { .. }
            | ApiError::RequestSend { .. } => ControllerError::Network(err),
        }
    }
}
