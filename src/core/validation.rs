//! Draft validation
//!
//! Input checking for the lesson submission form. Rules live on
//! [`LessonDraft`] via the `validator` derive; failures are converted
//! into the crate's typed [`ValidationError`] with per-field messages.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use validator::Validate;

use crate::core::error::{FieldError, HubError, ValidationError};
use crate::core::lesson::{AccessLevel, Category, Tone, Visibility};

static HTTP_URL: OnceLock<Regex> = OnceLock::new();

fn http_url_regex() -> &'static Regex {
    HTTP_URL.get_or_init(|| Regex::new(r"^https?://\S+$").expect("valid regex"))
}

/// A lesson as submitted or edited by its author, before the backend has
/// assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    #[validate(length(min = 3, max = 120, message = "title must be 3 to 120 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,

    pub category: Category,

    #[serde(default)]
    pub emotional_tone: Option<Tone>,

    #[serde(default)]
    #[validate(custom(function = validate_image_url))]
    pub image: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub access_level: AccessLevel,
}

impl LessonDraft {
    /// Validate the draft, converting failures into the typed hierarchy.
    pub fn check(&self) -> Result<(), HubError> {
        self.validate().map_err(|errors| {
            let fields: Vec<FieldError> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(|e| FieldError {
                        field: field.to_string(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    })
                })
                .collect();
            HubError::Validation(ValidationError::FieldErrors(fields))
        })
    }
}

fn validate_image_url(url: &str) -> Result<(), validator::ValidationError> {
    if http_url_regex().is_match(url) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("image_url")
            .with_message("image must be an http(s) URL".into()))
    }
}
