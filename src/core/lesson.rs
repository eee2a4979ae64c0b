//! Lesson domain model
//!
//! Wire-facing types for the lesson records served by the backend. The
//! decoding is deliberately tolerant: payloads are assembled by a remote
//! service the client does not control, so missing or malformed fields
//! fall back to safe defaults instead of failing the whole decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::session::{Role, Session};
use crate::core::validation::LessonDraft;

/// Content category for a lesson.
///
/// The label set is fixed by the platform; anything else on the wire is
/// kept verbatim in `Other` so round-tripping never loses data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    PersonalGrowth,
    Career,
    Relationships,
    Mindset,
    MistakesLearned,
    HealthWellness,
    Finance,
    Leadership,
    Other(String),
}

impl Category {
    /// All platform-defined categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::PersonalGrowth,
        Category::Career,
        Category::Relationships,
        Category::Mindset,
        Category::MistakesLearned,
        Category::HealthWellness,
        Category::Finance,
        Category::Leadership,
    ];

    /// The wire/display label for this category.
    pub fn label(&self) -> &str {
        match self {
            Category::PersonalGrowth => "Personal Growth",
            Category::Career => "Career",
            Category::Relationships => "Relationships",
            Category::Mindset => "Mindset",
            Category::MistakesLearned => "Mistakes Learned",
            Category::HealthWellness => "Health & Wellness",
            Category::Finance => "Finance",
            Category::Leadership => "Leadership",
            Category::Other(s) => s,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Personal Growth" => Category::PersonalGrowth,
            "Career" => Category::Career,
            "Relationships" => Category::Relationships,
            "Mindset" => Category::Mindset,
            "Mistakes Learned" => Category::MistakesLearned,
            "Health & Wellness" => Category::HealthWellness,
            "Finance" => Category::Finance,
            "Leadership" => Category::Leadership,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}

/// Category clause of a list query.
///
/// `Any` is a query-side sentinel meaning "match every category"; it is
/// never stored on a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a lesson with the given category passes this filter.
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Emotional tone tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Happy,
    Sad,
    Motivational,
    Reflective,
    Humorous,
    Serious,
    Grateful,
    Other(String),
}

impl From<String> for Tone {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Happy" => Tone::Happy,
            "Sad" => Tone::Sad,
            "Motivational" => Tone::Motivational,
            "Reflective" => Tone::Reflective,
            "Humorous" => Tone::Humorous,
            "Serious" => Tone::Serious,
            "Grateful" => Tone::Grateful,
            _ => Tone::Other(s),
        }
    }
}

impl From<Tone> for String {
    fn from(t: Tone) -> Self {
        match t {
            Tone::Happy => "Happy".to_string(),
            Tone::Sad => "Sad".to_string(),
            Tone::Motivational => "Motivational".to_string(),
            Tone::Reflective => "Reflective".to_string(),
            Tone::Humorous => "Humorous".to_string(),
            Tone::Serious => "Serious".to_string(),
            Tone::Grateful => "Grateful".to_string(),
            Tone::Other(s) => s,
        }
    }
}

/// Whether a lesson is listed publicly or only visible to its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl From<String> for Visibility {
    fn from(s: String) -> Self {
        match s.as_str() {
            "private" => Visibility::Private,
            _ => Visibility::Public,
        }
    }
}

impl From<Visibility> for String {
    fn from(v: Visibility) -> Self {
        match v {
            Visibility::Public => "public".to_string(),
            Visibility::Private => "private".to_string(),
        }
    }
}

/// Whether the lesson body is free to read or behind the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AccessLevel {
    #[default]
    Free,
    Premium,
}

impl From<String> for AccessLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "premium" => AccessLevel::Premium,
            _ => AccessLevel::Free,
        }
    }
}

impl From<AccessLevel> for String {
    fn from(a: AccessLevel) -> Self {
        match a {
            AccessLevel::Free => "free".to_string(),
            AccessLevel::Premium => "premium".to_string(),
        }
    }
}

/// A user-authored lesson record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Lesson {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(deserialize_with = "deserialize_lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub likes_count: u64,
    pub favorites_count: u64,
    /// User ids that currently like this lesson.
    pub likes: Vec<String>,
    #[serde(alias = "creatorEmail")]
    pub author_email: String,
    pub author_name: String,
    pub image: Option<String>,
    pub emotional_tone: Option<Tone>,
    pub visibility: Visibility,
    pub access_level: AccessLevel,
    pub is_featured: bool,
    pub is_reviewed: bool,
}

impl Lesson {
    /// Build a new lesson from a validated draft, authored by the given
    /// user. Used by local stores; the backend assigns its own ids for
    /// records created through the API.
    pub fn from_draft(draft: &LessonDraft, author_email: &str, author_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            created_at: Some(Utc::now()),
            author_email: author_email.to_string(),
            author_name: author_name.to_string(),
            image: draft.image.clone(),
            emotional_tone: draft.emotional_tone.clone(),
            visibility: draft.visibility,
            access_level: draft.access_level,
            ..Default::default()
        }
    }

    /// Whether the lesson body may be read under the given session.
    ///
    /// Free lessons are open to everyone. A premium lesson is readable by
    /// its author, a confirmed admin, or a premium subscriber.
    pub fn is_accessible_to(&self, session: &Session) -> bool {
        match self.access_level {
            AccessLevel::Free => true,
            AccessLevel::Premium => match session.user() {
                Some(user) => {
                    user.email == self.author_email
                        || user.premium
                        || session.effective_role() == Some(Role::Admin)
                }
                None => false,
            },
        }
    }

    /// Whether the given user id appears in the like list.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }
}

/// Decode a timestamp that may be an RFC 3339 string, epoch milliseconds,
/// absent, or garbage. Anything unparsable becomes `None`.
pub(crate) fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::UserProfile;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            let label = category.label().to_string();
            assert_eq!(Category::from(label), category);
        }
    }

    #[test]
    fn test_unknown_category_is_preserved() {
        let category = Category::from("Astrology".to_string());
        assert_eq!(category, Category::Other("Astrology".to_string()));
        assert_eq!(category.label(), "Astrology");
    }

    #[test]
    fn test_category_filter() {
        assert!(CategoryFilter::Any.matches(&Category::Career));
        assert!(CategoryFilter::Only(Category::Career).matches(&Category::Career));
        assert!(!CategoryFilter::Only(Category::Career).matches(&Category::Mindset));
    }

    #[test]
    fn test_lesson_decodes_full_payload() {
        let lesson: Lesson = serde_json::from_str(
            r#"{
                "_id": "64fe",
                "title": "Mindful Living",
                "description": "Slowing down on purpose",
                "category": "Mindset",
                "createdAt": "2024-03-01T12:00:00Z",
                "likesCount": 4,
                "authorEmail": "ada@example.com",
                "authorName": "Ada",
                "emotionalTone": "Reflective",
                "visibility": "private",
                "accessLevel": "premium"
            }"#,
        )
        .unwrap();

        assert_eq!(lesson.id, "64fe");
        assert_eq!(lesson.category, Category::Mindset);
        assert_eq!(lesson.likes_count, 4);
        assert_eq!(lesson.emotional_tone, Some(Tone::Reflective));
        assert_eq!(lesson.visibility, Visibility::Private);
        assert_eq!(lesson.access_level, AccessLevel::Premium);
        assert!(lesson.created_at.is_some());
    }

    #[test]
    fn test_lesson_decodes_sparse_payload() {
        let lesson: Lesson = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(lesson.id, "1");
        assert_eq!(lesson.title, "");
        assert_eq!(lesson.likes_count, 0);
        assert_eq!(lesson.created_at, None);
        assert_eq!(lesson.visibility, Visibility::Public);
        assert_eq!(lesson.access_level, AccessLevel::Free);
    }

    #[test]
    fn test_unparsable_timestamp_becomes_none() {
        let lesson: Lesson =
            serde_json::from_str(r#"{"id": "1", "createdAt": "yesterday"}"#).unwrap();
        assert_eq!(lesson.created_at, None);

        let lesson: Lesson =
            serde_json::from_str(r#"{"id": "2", "createdAt": 1709294400000}"#).unwrap();
        assert!(lesson.created_at.is_some());
    }

    #[test]
    fn test_premium_access() {
        let lesson = Lesson {
            access_level: AccessLevel::Premium,
            author_email: "ada@example.com".to_string(),
            ..Default::default()
        };

        assert!(!lesson.is_accessible_to(&Session::Unauthenticated));

        let reader = Session::Authenticated {
            user: UserProfile {
                email: "bob@example.com".to_string(),
                name: "Bob".to_string(),
                photo: None,
                role: Role::User,
                premium: false,
            },
            confirmed: true,
        };
        assert!(!lesson.is_accessible_to(&reader));

        let author = Session::Authenticated {
            user: UserProfile {
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
                photo: None,
                role: Role::User,
                premium: false,
            },
            confirmed: true,
        };
        assert!(lesson.is_accessible_to(&author));

        let subscriber = Session::Authenticated {
            user: UserProfile {
                email: "bob@example.com".to_string(),
                name: "Bob".to_string(),
                photo: None,
                role: Role::User,
                premium: true,
            },
            confirmed: true,
        };
        assert!(lesson.is_accessible_to(&subscriber));
    }

    #[test]
    fn test_free_lesson_is_open() {
        let lesson = Lesson::default();
        assert!(lesson.is_accessible_to(&Session::Unauthenticated));
    }
}
