//! Request extractors shared by the Wayfare domains

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::Error;

/// Client message for a body that could not be read as the expected JSON.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Client message for path segments that do not parse.
pub const INVALID_PATH_MESSAGE: &str = "Invalid path parameter";

/// `Json<T>` that also runs `T`'s `validator` rules.
///
/// Both unreadable bodies and rule violations are rejected with 400 and the
/// standard `{"success": false, "message": ...}` body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// Body missing, not JSON, or not the expected shape
    Body(JsonRejection),
    /// Body parsed but broke one or more field rules
    Invalid(ValidationErrors),
}

impl ValidatedJsonRejection {
    /// Client-facing message. Names the offending fields, never their values.
    pub fn message(&self) -> String {
        match self {
            ValidatedJsonRejection::Body(_) => INVALID_BODY_MESSAGE.to_string(),
            ValidatedJsonRejection::Invalid(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort_unstable();
                format!("Validation failed: {}", fields.join(", "))
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match &self {
            // serde's text can quote the submitted value, so it stays in the log
            ValidatedJsonRejection::Body(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
            }
            ValidatedJsonRejection::Invalid(_) => {
                tracing::debug!(reason = %self.message(), "Rejected request body");
            }
        }
        Error::Validation(self.message()).into_response()
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Body)?;

        value.validate().map_err(ValidatedJsonRejection::Invalid)?;

        Ok(ValidatedJson(value))
    }
}

/// `Path<T>` whose rejection uses the standard JSON error body.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                tracing::debug!(reason = %rejection.body_text(), "Rejected path parameters");
                Error::Validation(INVALID_PATH_MESSAGE.to_string())
            })?;
        Ok(ApiPath(value))
    }
}
