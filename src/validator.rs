use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use notely_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    // field_errors() is a HashMap
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let body = rejection.body_text();

    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }

    if body.contains("invalid type") || body.contains("unknown variant") {
        return "Invalid field type in request".to_string();
    }

    "Invalid request body".to_string()
}

/// JSON body extractor that runs `validator` rules. Every failure is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection_message(&rejection))))?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(probe) =
            ValidatedJson::<Probe>::from_request(json_request(r#"{"title":"x"}"#), &())
                .await
                .unwrap();
        assert_eq!(probe.title, "x");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = ValidatedJson::<Probe>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "title is required");
    }

    #[tokio::test]
    async fn test_rule_failure_is_bad_request() {
        let err = ValidatedJson::<Probe>::from_request(json_request(r#"{"title":""}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Title is required");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();
        let err = ValidatedJson::<Probe>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
