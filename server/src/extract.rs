//! Request decoding: content-type gate, JSON parse, schema check.
//!
//! Write handlers never see a request body that has not passed through
//! here. `JsonBody` stops at syntax so handlers can consult the raw
//! payload first; `ValidatedJson<T>` goes all the way to a typed,
//! validated value.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Payload checks that run after deserialization succeeds.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Syntactically valid JSON from a request with `Content-Type:
/// application/json`. Anything else on the header, including a charset
/// suffix or no header at all, is rejected before the body is read.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if content_type != Some("application/json") {
            return Err(ApiError::UnsupportedMediaType);
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| ApiError::Validation(err.to_string()))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|err| ApiError::Validation(err.to_string()))
    }
}

/// Deserialize an already-parsed body into `T` and run its checks. The
/// first failure becomes the 400 message.
pub fn decode<T>(body: Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let payload: T =
        serde_json::from_value(body).map_err(|err| ApiError::Validation(err.to_string()))?;
    payload.validate().map_err(ApiError::Validation)?;
    Ok(payload)
}

/// `JsonBody` followed by `decode`, for handlers with no use for the raw
/// payload.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = JsonBody::from_request(req, state).await?;
        decode(body).map(ValidatedJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    use crate::model::{CreateEntry, CreateList, UpdateEntry};

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = content_type {
            builder = builder.header(header::CONTENT_TYPE, value);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let result = JsonBody::from_request(request(None, "{}"), &()).await;
        assert!(matches!(result, Err(ApiError::UnsupportedMediaType)));
    }

    #[tokio::test]
    async fn charset_suffix_is_rejected() {
        let result =
            JsonBody::from_request(request(Some("application/json; charset=utf-8"), "{}"), &())
                .await;
        assert!(matches!(result, Err(ApiError::UnsupportedMediaType)));
    }

    #[tokio::test]
    async fn wrong_media_type_is_rejected_before_the_body_is_parsed() {
        let result = JsonBody::from_request(request(Some("text/plain"), "{}"), &()).await;
        assert!(matches!(result, Err(ApiError::UnsupportedMediaType)));
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let result =
            JsonBody::from_request(request(Some("application/json"), "{\"name\":"), &()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn valid_json_yields_the_raw_value() {
        let JsonBody(body) =
            JsonBody::from_request(request(Some("application/json"), r#"{"name":"x"}"#), &())
                .await
                .unwrap();
        assert_eq!(body, json!({"name": "x"}));
    }

    #[tokio::test]
    async fn validated_json_yields_the_typed_payload() {
        let ValidatedJson(payload) = ValidatedJson::<CreateList>::from_request(
            request(Some("application/json"), r#"{"name":"Groceries"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(payload.name, "Groceries");
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        let result = decode::<CreateList>(json!({"name": "x", "color": "red"}));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn decode_rejects_missing_required_fields() {
        let result = decode::<CreateEntry>(json!({"name": "Milk"}));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn decode_rejects_empty_name() {
        let result = decode::<CreateList>(json!({"name": ""}));
        let Err(ApiError::Validation(message)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(message, "name must not be empty");
    }

    #[test]
    fn decode_rejects_wrong_field_type() {
        let result = decode::<CreateEntry>(json!({"listId": "l", "name": "Milk", "done": "yes"}));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn decode_accepts_echoed_entry_id() {
        let payload =
            decode::<UpdateEntry>(json!({"_id": "abc", "done": true})).expect("should decode");
        assert_eq!(payload.done, Some(true));
    }
}
