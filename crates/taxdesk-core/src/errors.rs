//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. The error carries the HTTP
//! status it should be rendered with and renders as `{"error": "<message>"}`.
//! Anything convertible into [`anyhow::Error`] turns into a 500 through `?`.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use http_body_util::BodyExt;

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::unauthorized(anyhow!("x")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::not_found(anyhow!("x")).status, StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict(anyhow!("x")).status, StatusCode::CONFLICT);
        assert_eq!(
            AppError::unprocessable(anyhow!("x")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        fn fails() -> Result<(), AppError> {
            "not a number".parse::<i32>()?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_into_response_renders_error_body() {
        let response = AppError::not_found(anyhow!("Tax type not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Tax type not found" }));
    }
}
