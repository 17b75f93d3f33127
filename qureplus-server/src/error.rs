use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qureplus_core::Error;
use serde_json::json;
use tracing::{debug, error};

/// Handler error: a domain [`Error`] or a malformed request.
#[derive(Debug)]
pub enum ApiError {
    Domain(Error),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Error::UnsupportedImage(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Error::ImageTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                Error::InvalidState(_) | Error::Busy(_) => StatusCode::CONFLICT,
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::BackendUnavailable(_) | Error::SessionLimit(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                Error::Backend(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(msg) => json!({ "error": msg }),
            ApiError::Domain(Error::Validation(fields)) => json!({
                "error": "Please correct the highlighted fields",
                "fields": fields,
            }),
            ApiError::Domain(err) => json!({ "error": err.to_string() }),
        };

        if status.is_server_error() {
            error!("{} -> {}", status, body["error"]);
        } else {
            debug!("{} -> {}", status, body["error"]);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qureplus_common::models::FieldErrors;

    #[test]
    fn statuses_follow_the_error_kind() {
        let cases = [
            (Error::Validation(FieldErrors::new()), 422),
            (Error::UnsupportedImage("application/pdf".into()), 415),
            (Error::ImageTooLarge(11 * 1024 * 1024), 413),
            (Error::SessionLimit(1000), 503),
            (Error::InvalidState("x".into()), 409),
            (Error::Busy("analysis".into()), 409),
            (Error::NotFound("user".into()), 404),
            (Error::BackendUnavailable("Database not configured".into()), 503),
            (Error::Backend("500: boom".into()), 502),
            (Error::Parse("x".into()), 500),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), expected);
        }
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
