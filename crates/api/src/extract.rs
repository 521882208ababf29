//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracksm_core::types::DbId;

use crate::error::AppError;

/// JSON body extractor. Any decode failure becomes a 400 `invalid json body`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest("invalid json body".into()))
            }
        }
    }
}

/// Query string extractor. A repeated key keeps its first value; anything
/// that still fails to decode becomes a 400 `invalid query string`.
///
/// `T` sees every value as a string, so its fields should be `String`s.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected query string");
                invalid_query()
            })?;

        first_values(pairs).map(QueryParams)
    }
}

/// Decode `pairs` into `T`, keeping the first value of every key.
fn first_values<T: DeserializeOwned>(pairs: Vec<(String, String)>) -> Result<T, AppError> {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|err| {
        tracing::debug!(error = %err, "Rejected query string");
        invalid_query()
    })
}

fn invalid_query() -> AppError {
    AppError::BadRequest("invalid query string".into())
}

/// Parse a series id path segment. Must be a positive integer.
pub fn parse_series_id(raw: &str) -> Result<DbId, AppError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("invalid series id".into()))
}
