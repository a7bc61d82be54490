use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use cup_types::api::ErrorResponse;

use crate::service::TeamError;

/// Errors returned by handlers, rendered as `{"success": false, "error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// `message` goes to the client; `source` is only logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Maps a usecase error, using `failure` as the client-facing message
    /// for storage failures.
    pub fn from_team(err: TeamError, failure: &'static str) -> Self {
        match err {
            TeamError::TeamNotFound => Self::NotFound("Team not found".into()),
            TeamError::UserNotFound => Self::NotFound("User not found in team".into()),
            TeamError::Storage(source) => Self::Internal {
                message: failure,
                source,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, source } = &self {
            error!("{}: {:#}", message, source);
        }

        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Runs a blocking usecase call off the async runtime.
pub(crate) async fn run_blocking<F, T>(failure: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, TeamError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal {
            message: failure,
            source: anyhow::anyhow!("spawn_blocking join error: {}", e),
        })?
        .map_err(|e| ApiError::from_team(e, failure))
}
