//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::StoreError;

/// Everything a handler can fail with. Conversion to a response picks the
/// status code and decides whether the client gets a message body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The unified error envelope for 404 and 400 responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    message: resource.to_string(),
                }),
            )
                .into_response(),
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
            }
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response(),
            ApiError::Store(err) => {
                // Persistence detail stays server-side.
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn collect_body(response: Response) -> bytes::Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn not_found_is_404_with_message_envelope() {
        let response = ApiError::NotFound("List not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value =
            serde_json::from_slice(&collect_body(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"message": "List not found"}));
    }

    #[tokio::test]
    async fn validation_is_400_with_message_envelope() {
        let response = ApiError::Validation("name must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_slice(&collect_body(response).await).unwrap();
        assert_eq!(body["message"], "name must not be empty");
    }

    #[tokio::test]
    async fn unsupported_media_type_is_415_with_empty_body() {
        let response = ApiError::UnsupportedMediaType.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(collect_body(response).await.is_empty());
    }

    #[tokio::test]
    async fn store_error_is_500_with_empty_body() {
        let response =
            ApiError::Store(StoreError::Unavailable("connection reset".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(collect_body(response).await.is_empty());
    }
}
