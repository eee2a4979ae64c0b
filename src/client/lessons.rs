//! Lesson endpoints: listing, CRUD, favorites, comments, moderation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::client::payload::ListPayload;
use crate::core::error::HubError;
use crate::core::lesson::{Lesson, deserialize_lenient_timestamp};
use crate::core::validation::LessonDraft;

/// A comment on a lesson.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: String,
    pub lesson_id: String,
    pub author_email: String,
    pub author_name: String,
    pub text: String,
    #[serde(deserialize_with = "deserialize_lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

// The comment POST sometimes echoes the comment bare and sometimes
// wraps it under "comment".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommentPayload {
    Wrapped { comment: Comment },
    Bare(Comment),
}

impl CommentPayload {
    fn into_comment(self) -> Comment {
        match self {
            CommentPayload::Wrapped { comment } => comment,
            CommentPayload::Bare(comment) => comment,
        }
    }
}

/// Reason attached to a lesson report. The platform offers a fixed list;
/// anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportReason {
    InappropriateContent,
    HateSpeechOrHarassment,
    MisleadingOrFalse,
    SpamOrPromotional,
    SensitiveOrDisturbing,
    Other(String),
}

impl From<String> for ReportReason {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Inappropriate Content" => ReportReason::InappropriateContent,
            "Hate Speech or Harassment" => ReportReason::HateSpeechOrHarassment,
            "Misleading or False Information" => ReportReason::MisleadingOrFalse,
            "Spam or Promotional Content" => ReportReason::SpamOrPromotional,
            "Sensitive or Disturbing Content" => ReportReason::SensitiveOrDisturbing,
            _ => ReportReason::Other(s),
        }
    }
}

impl From<ReportReason> for String {
    fn from(r: ReportReason) -> Self {
        match r {
            ReportReason::InappropriateContent => "Inappropriate Content".to_string(),
            ReportReason::HateSpeechOrHarassment => "Hate Speech or Harassment".to_string(),
            ReportReason::MisleadingOrFalse => "Misleading or False Information".to_string(),
            ReportReason::SpamOrPromotional => "Spam or Promotional Content".to_string(),
            ReportReason::SensitiveOrDisturbing => "Sensitive or Disturbing Content".to_string(),
            ReportReason::Other(s) => s,
        }
    }
}

/// A moderation report as listed for admins.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(alias = "_id")]
    pub id: String,
    pub lesson_id: String,
    pub reporter_user_id: Option<String>,
    pub reason: Option<ReportReason>,
    #[serde(alias = "timestamp", deserialize_with = "deserialize_lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lesson endpoint group, obtained from [`ApiClient::lessons`].
pub struct LessonsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl LessonsApi<'_> {
    /// Fetch the public lesson collection.
    pub async fn list(&self) -> Result<Vec<Lesson>, HubError> {
        let payload: ListPayload<Lesson> = self.client.get_json("/lessons").await?;
        Ok(payload.into_items())
    }

    /// Fetch a single lesson.
    pub async fn get(&self, id: &str) -> Result<Lesson, HubError> {
        self.client.get_json(&format!("/lessons/{id}")).await
    }

    /// Submit a new lesson. The draft is validated locally first; the
    /// backend assigns the id, so the response body is not relied on.
    pub async fn create(&self, draft: &LessonDraft) -> Result<(), HubError> {
        draft.check()?;
        self.client.post_ignored("/lessons", draft).await
    }

    /// Update an existing lesson from a validated draft.
    pub async fn update(&self, id: &str, draft: &LessonDraft) -> Result<(), HubError> {
        draft.check()?;
        self.client
            .patch_ignored(&format!("/lessons/{id}"), draft)
            .await
    }

    /// Delete a lesson (author or admin).
    pub async fn delete(&self, id: &str) -> Result<(), HubError> {
        self.client.delete_ignored(&format!("/lessons/{id}")).await
    }

    /// Fetch the lessons authored by the given email.
    ///
    /// The backend has returned over-broad results for this endpoint, so
    /// the list is re-filtered by author here.
    pub async fn mine(&self, email: &str) -> Result<Vec<Lesson>, HubError> {
        let payload: ListPayload<Lesson> = self
            .client
            .get_json_query("/my-lessons", &[("email", email)])
            .await?;
        Ok(payload
            .into_items()
            .into_iter()
            .filter(|l| l.author_email == email)
            .collect())
    }

    /// Toggle the caller's favorite on a lesson.
    pub async fn toggle_favorite(&self, id: &str) -> Result<(), HubError> {
        self.client
            .post_ignored(&format!("/lessons/{id}/favorite"), &json!({}))
            .await
    }

    /// Fetch the caller's favorited lessons.
    pub async fn favorites(&self) -> Result<Vec<Lesson>, HubError> {
        let payload: ListPayload<Lesson> = self.client.get_json("/my-favorites").await?;
        Ok(payload.into_items())
    }

    /// Fetch the comments on a lesson.
    pub async fn comments(&self, id: &str) -> Result<Vec<Comment>, HubError> {
        let payload: ListPayload<Comment> = self
            .client
            .get_json(&format!("/lessons/{id}/comments"))
            .await?;
        Ok(payload.into_items())
    }

    /// Post a comment and return the stored record.
    pub async fn add_comment(&self, id: &str, text: &str) -> Result<Comment, HubError> {
        let payload: CommentPayload = self
            .client
            .post_json(&format!("/lessons/{id}/comments"), &json!({ "text": text }))
            .await?;
        Ok(payload.into_comment())
    }

    /// Report a lesson for moderation.
    pub async fn report(
        &self,
        lesson_id: &str,
        reporter_user_id: Option<&str>,
        reason: ReportReason,
    ) -> Result<(), HubError> {
        self.client
            .post_ignored(
                "/reports",
                &json!({
                    "lessonId": lesson_id,
                    "reporterUserId": reporter_user_id,
                    "reason": String::from(reason),
                    "timestamp": Utc::now().to_rfc3339(),
                }),
            )
            .await
    }

    // === Admin moderation ===

    /// Fetch open moderation reports (admin).
    pub async fn reports(&self) -> Result<Vec<Report>, HubError> {
        let payload: ListPayload<Report> = self.client.get_json("/admin/reports").await?;
        Ok(payload.into_items())
    }

    /// Dismiss a report without touching the lesson (admin).
    pub async fn dismiss_report(&self, report_id: &str) -> Result<(), HubError> {
        self.client
            .delete_ignored(&format!("/admin/reports/{report_id}"))
            .await
    }

    /// Feature or unfeature a lesson on the home page (admin).
    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<(), HubError> {
        self.client
            .patch_ignored(&format!("/lessons/{id}"), &json!({ "isFeatured": featured }))
            .await
    }

    /// Mark a lesson as reviewed (admin).
    pub async fn mark_reviewed(&self, id: &str) -> Result<(), HubError> {
        self.client
            .patch_ignored(&format!("/lessons/{id}"), &json!({ "isReviewed": true }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_decodes_both_shapes() {
        let bare: CommentPayload =
            serde_json::from_str(r#"{"id": "c1", "text": "Loved this"}"#).unwrap();
        assert_eq!(bare.into_comment().id, "c1");

        let wrapped: CommentPayload =
            serde_json::from_str(r#"{"comment": {"id": "c2", "text": "Same"}}"#).unwrap();
        assert_eq!(wrapped.into_comment().id, "c2");
    }

    #[test]
    fn test_report_reason_round_trip() {
        let reason = ReportReason::from("Spam or Promotional Content".to_string());
        assert_eq!(reason, ReportReason::SpamOrPromotional);
        assert_eq!(String::from(reason), "Spam or Promotional Content");

        let custom = ReportReason::from("Plagiarism".to_string());
        assert_eq!(custom, ReportReason::Other("Plagiarism".to_string()));
    }

    #[test]
    fn test_report_decodes_timestamp_alias() {
        let report: Report = serde_json::from_str(
            r#"{
                "_id": "r1",
                "lessonId": "l1",
                "reason": "Inappropriate Content",
                "timestamp": "2024-05-01T08:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(report.id, "r1");
        assert_eq!(report.reason, Some(ReportReason::InappropriateContent));
        assert!(report.created_at.is_some());
    }
}
