//! Custom axum extractors for Filmtrack
//!
//! These extractors turn every malformed input (bad JSON, unknown enum
//! variant, unparsable path segment, failed field validation) into
//! `Error::Validation`, so clients see a single 400 `VALIDATION_ERROR` shape
//! regardless of where parsing failed.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON body extractor that runs `Validate` after deserialization.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query-string extractor that runs `Validate` after deserialization.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// Path-parameter extractor whose parse failures use the JSON error body.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

/// Rejection type shared by the validating extractors
#[derive(Debug)]
pub enum ValidationRejection {
    Json(JsonRejection),
    Query(QueryRejection),
    Path(PathRejection),
    Invalid(Error),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            ValidationRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidationRejection::Query(e) => Error::Validation(e.body_text()).into_response(),
            ValidationRejection::Path(e) => Error::Validation(e.body_text()).into_response(),
            ValidationRejection::Invalid(e) => e.into_response(),
        }
    }
}

fn validate<T: Validate>(value: &T) -> Result<(), ValidationRejection> {
    value.validate().map_err(|e| {
        ValidationRejection::Invalid(Error::Validation(format!("Validation failed: {}", e)))
    })
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        validate(&value)?;
        Ok(ValidatedQuery(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;
        Ok(ValidatedPath(value))
    }
}
