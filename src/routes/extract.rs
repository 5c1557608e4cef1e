//! Extractors that report bad input as [`ApiError`]s.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::Document;
use crate::schema::{self, FieldError};

/// A JSON body validated against the document's field table, with defaults
/// applied.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: Document,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        schema::parse(T::FIELDS, value)
            .map(Payload)
            .map_err(ApiError::Validation)
    }
}

/// Query string parameters. Malformed values are validation errors on the
/// `query` field.
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(vec![FieldError::new("query", rejection.body_text())])
            })?;

        Ok(Params(params))
    }
}
