//! Service trait for lesson storage backends

use anyhow::Result;
use async_trait::async_trait;

use crate::core::lesson::Lesson;

/// CRUD and engagement operations over a lesson collection.
///
/// The production data source is the REST API; [`crate::storage`]
/// provides an in-memory implementation for development and tests.
#[async_trait]
pub trait LessonStore: Send + Sync {
    /// Persist a new lesson.
    async fn create(&self, lesson: Lesson) -> Result<Lesson>;

    /// Get a lesson by id.
    async fn get(&self, id: &str) -> Result<Option<Lesson>>;

    /// List all lessons in insertion order.
    async fn list(&self) -> Result<Vec<Lesson>>;

    /// List lessons authored by the given email.
    async fn list_by_author(&self, email: &str) -> Result<Vec<Lesson>>;

    /// Replace an existing lesson.
    async fn update(&self, id: &str, lesson: Lesson) -> Result<Lesson>;

    /// Delete a lesson.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Toggle the user's like on a lesson. Returns true when the lesson
    /// is liked after the call.
    async fn toggle_like(&self, id: &str, user_id: &str) -> Result<bool>;

    /// Toggle the user's favorite on a lesson. Returns true when the
    /// lesson is favorited after the call.
    async fn toggle_favorite(&self, id: &str, user_id: &str) -> Result<bool>;

    /// List the lessons the user has favorited, in insertion order.
    async fn favorites_of(&self, user_id: &str) -> Result<Vec<Lesson>>;
}
