use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slidemix::{MixError, OembedError, ValidationErrors};
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request itself is unusable (e.g. a missing query parameter).
    BadRequest(String),
    /// Errors from oEmbed resolution.
    Oembed(OembedError),
    /// Errors from the mix store or mix validation.
    Mix(MixError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<OembedError> for AppError {
    fn from(err: OembedError) -> Self {
        AppError::Oembed(err)
    }
}

impl From<MixError> for AppError {
    fn from(err: MixError) -> Self {
        AppError::Mix(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Mix(MixError::Validation(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(msg) => {
                warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Oembed(err) if err.is_bad_request() => {
                warn!("Rejected oEmbed request: {err}");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Oembed(
                err @ (OembedError::UpstreamUnavailable { .. }
                | OembedError::MalformedSource { .. }),
            ) => {
                error!("OembedError: {:?}", err);
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            AppError::Oembed(err) => {
                error!("OembedError: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
            AppError::Mix(MixError::Validation(errors)) => {
                warn!("Mix validation failed: {errors}");
                let body = Json(json!({ "errors": errors.errors }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Mix(MixError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Mix not found: {id}"))
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
