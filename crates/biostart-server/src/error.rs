//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the conversion here is the
//! single place service errors become status codes and the
//! `{success:false, error, details?}` envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use biostart_core::{AuthError, Error};

/// A service error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(Error);

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self.0 {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, None),
            Error::Auth(AuthError::InvalidCredentials) => (StatusCode::UNAUTHORIZED, None),
            Error::Auth(AuthError::DuplicateRegistration { .. }) => (StatusCode::CONFLICT, None),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, None),
            Error::Upstream(upstream) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(upstream.to_string()))
            }
            Error::InvalidResponse(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(detail.clone()))
            }
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, status = %status, "request rejected");
        }

        let body = ErrorEnvelope {
            success: false,
            error: self.0.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biostart_core::UpstreamError;

    fn status_of(err: Error) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            status_of(Error::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(
                AuthError::DuplicateRegistration {
                    email: "a@b".into()
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(Error::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(UpstreamError::status(503, None).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(Error::InvalidResponse("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
