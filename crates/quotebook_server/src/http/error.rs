//! Error-to-response mapping.
//!
//! Validation failures are 400 and missing quotes are 404, each with the
//! message as a plain-text body. Everything else is a logged 500 with a
//! generic body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::error;
use quotebook_core::{RepoError, WiseSayingServiceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WiseSayingServiceError> for ApiError {
    fn from(value: WiseSayingServiceError) -> Self {
        match value {
            WiseSayingServiceError::Validation(err) => Self::BadRequest(err.to_string()),
            WiseSayingServiceError::NotFound(_) => Self::NotFound(value.to_string()),
            WiseSayingServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        WiseSayingServiceError::from(value).into()
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(value: rusqlite::Error) -> Self {
        RepoError::from(value).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Internal(message) => {
                error!("event=http_error module=http status=error error={message}");
                "internal server error".to_string()
            }
            Self::BadRequest(message) | Self::NotFound(message) => message,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use quotebook_core::{RepoError, ValidationError, WiseSayingServiceError};

    #[test]
    fn service_errors_map_to_statuses() {
        let validation: ApiError =
            WiseSayingServiceError::Validation(ValidationError::BlankAuthor).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "Author cannot be null or blank");

        let missing: ApiError = WiseSayingServiceError::NotFound(9).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "quote 9 does not exist");

        let storage: ApiError = RepoError::InvalidData("bad row".to_string()).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let response = axum::response::IntoResponse::into_response(ApiError::Internal(
            "disk on fire".to_string(),
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
