use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

/// Payload returned to redisplay a form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData<F, E> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<E>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<F>,
}

/// Result of a form action that did not fail outright.
#[derive(Debug)]
pub enum ActionOutcome<F, E> {
    Redirect(String),
    ValidationFailed { field_errors: E, fields: F },
    /// Malformed submission or a mutation that did not take effect.
    FormError(String),
    /// Form-level error that still refills the submitted fields.
    Rejected { form_error: String, fields: F },
}

impl<F, E> ActionOutcome<F, E> {
    pub fn redirect(to: impl Into<String>) -> Self {
        ActionOutcome::Redirect(to.into())
    }

    pub fn form_error(message: impl Into<String>) -> Self {
        ActionOutcome::FormError(message.into())
    }

    pub fn rejected(message: impl Into<String>, fields: F) -> Self {
        ActionOutcome::Rejected {
            form_error: message.into(),
            fields,
        }
    }
}

impl<F: Serialize, E: Serialize> IntoResponse for ActionOutcome<F, E> {
    fn into_response(self) -> Response {
        let data = match self {
            ActionOutcome::Redirect(to) => return Redirect::to(&to).into_response(),
            ActionOutcome::ValidationFailed {
                field_errors,
                fields,
            } => ActionData {
                form_error: None,
                field_errors: Some(field_errors),
                fields: Some(fields),
            },
            ActionOutcome::FormError(message) => ActionData::<F, E> {
                form_error: Some(message),
                field_errors: None,
                fields: None,
            },
            ActionOutcome::Rejected { form_error, fields } => ActionData {
                form_error: Some(form_error),
                field_errors: None,
                fields: Some(fields),
            },
        };
        (StatusCode::BAD_REQUEST, Json(data)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Fields {
        name: String,
    }

    #[derive(Serialize)]
    struct Errors {
        name: Option<&'static str>,
    }

    #[test]
    fn redirect_is_see_other() {
        let res = ActionOutcome::<Fields, Errors>::redirect("/jokes").into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[axum::http::header::LOCATION], "/jokes");
    }

    #[test]
    fn validation_failure_is_bad_request() {
        let res = ActionOutcome::ValidationFailed {
            field_errors: Errors { name: Some("too short") },
            fields: Fields { name: "a".into() },
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn form_error_serializes_without_fields() {
        let data = ActionData::<Fields, Errors> {
            form_error: Some("Form not submitted correctly.".into()),
            field_errors: None,
            fields: None,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["formError"], "Form not submitted correctly.");
        assert!(json.get("fields").is_none());
    }

    #[tokio::test]
    async fn rejected_keeps_fields() {
        let res = ActionOutcome::<Fields, Errors>::rejected("Nope", Fields { name: "kody".into() })
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["formError"], "Nope");
        assert_eq!(json["fields"]["name"], "kody");
        assert!(json.get("fieldErrors").is_none());
    }
}
