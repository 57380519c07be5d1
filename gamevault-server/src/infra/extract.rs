//! Extractors whose rejections use the JSON error contract of [`AppError`].

use axum::{
    Form, Json,
    body::{Body, to_bytes},
    extract::{FromRequest, FromRequestParts, Request},
    http::header::CONTENT_TYPE,
};
use gamevault_model::DeleteRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::infra::errors::{AppError, AppResult};

/// Delete bodies only ever carry one short field.
const MAX_DELETE_BODY_BYTES: usize = 16 * 1024;

/// JSON body that must be an object. serde's derived struct visitors also
/// accept arrays positionally, so the shape is checked before decoding.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        from_json_object(value).map(AppJson)
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Body of both delete routes.
///
/// An empty body means no deletion code. Otherwise a url-encoded form is
/// read when the request declares one, and a JSON object in every other
/// case.
#[derive(Debug)]
pub struct DeleteBody(pub DeleteRequest);

impl<S> FromRequest<S> for DeleteBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, MAX_DELETE_BODY_BYTES)
            .await
            .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}")))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DeleteBody(DeleteRequest::default()));
        }

        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|mime| mime.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let req = Request::from_parts(parts, Body::from(bytes));
            let Form(request) = Form::<DeleteRequest>::from_request(req, state).await?;
            return Ok(DeleteBody(request));
        }

        parse_json_object(&bytes).map(DeleteBody)
    }
}

/// Decode raw bytes that must hold a JSON object.
pub fn parse_json_object<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}")))?;
    from_json_object(value)
}

fn from_json_object<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    if !value.is_object() {
        return Err(AppError::bad_request(
            "Invalid request body: expected a JSON object",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}")))
}
