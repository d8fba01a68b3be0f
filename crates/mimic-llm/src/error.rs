use http::StatusCode;
use mimic_core::HttpError;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur while proxying a chat request
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required request field is absent or empty
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Requested model is not in the registry
    #[error("model not found: {model}")]
    ModelNotFound {
        /// The unknown model name
        model: String,
    },

    /// Conversation failed sequence validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus {
        /// The upstream HTTP status
        status: StatusCode,
        /// The upstream response body, best effort
        body: String,
    },

    /// Transport-level failure reaching the upstream
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// Upstream answered 2xx but the body was not usable
    #[error("upstream response malformed: {0}")]
    UpstreamShape(String),
}

impl HttpError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField { .. } | Self::ModelNotFound { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,
            // A client-range upstream status is the caller's fault; a
            // server-range one is surfaced as our own server failure
            Self::UpstreamStatus { status, .. } => {
                if status.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Upstream(_) | Self::UpstreamShape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::ModelNotFound { .. } => "model_not_found",
            Self::Validation(rejection) => rejection.code(),
            Self::UpstreamStatus { .. } | Self::Upstream(_) | Self::UpstreamShape(_) => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
