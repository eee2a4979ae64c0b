//! In-memory implementation of LessonStore for testing and development

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::core::lesson::Lesson;
use crate::core::service::LessonStore;

#[derive(Default)]
struct Inner {
    /// Insertion-ordered so listings are deterministic.
    lessons: Vec<Lesson>,
    /// lesson id -> user ids that like it
    likes: HashMap<String, HashSet<String>>,
    /// lesson id -> user ids that favorited it
    favorites: HashMap<String, HashSet<String>>,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == id)
    }
}

/// In-memory lesson store.
///
/// Useful for testing and development. Uses RwLock for thread-safe
/// access; like and favorite counts on the stored lessons are kept in
/// sync with the toggle sets.
#[derive(Clone, Default)]
pub struct InMemoryLessonStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryLessonStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with lessons, preserving their order.
    pub fn seeded(lessons: Vec<Lesson>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                lessons,
                ..Inner::default()
            })),
        }
    }
}

#[async_trait]
impl LessonStore for InMemoryLessonStore {
    async fn create(&self, lesson: Lesson) -> Result<Lesson> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if inner.position(&lesson.id).is_some() {
            return Err(anyhow!("Lesson {} already exists", lesson.id));
        }

        inner.lessons.push(lesson.clone());
        Ok(lesson)
    }

    async fn get(&self, id: &str) -> Result<Option<Lesson>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.lessons.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Lesson>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.lessons.clone())
    }

    async fn list_by_author(&self, email: &str) -> Result<Vec<Lesson>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner
            .lessons
            .iter()
            .filter(|l| l.author_email == email)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, lesson: Lesson) -> Result<Lesson> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let pos = inner
            .position(id)
            .ok_or_else(|| anyhow!("Lesson {} not found", id))?;

        inner.lessons[pos] = lesson.clone();
        Ok(lesson)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        inner.lessons.retain(|l| l.id != id);
        inner.likes.remove(id);
        inner.favorites.remove(id);
        Ok(())
    }

    async fn toggle_like(&self, id: &str, user_id: &str) -> Result<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let pos = inner
            .position(id)
            .ok_or_else(|| anyhow!("Lesson {} not found", id))?;

        let set = inner.likes.entry(id.to_string()).or_default();
        let liked = if set.remove(user_id) {
            false
        } else {
            set.insert(user_id.to_string());
            true
        };
        let count = set.len() as u64;
        let members: Vec<String> = set.iter().cloned().collect();

        let lesson = &mut inner.lessons[pos];
        lesson.likes_count = count;
        lesson.likes = members;
        Ok(liked)
    }

    async fn toggle_favorite(&self, id: &str, user_id: &str) -> Result<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let pos = inner
            .position(id)
            .ok_or_else(|| anyhow!("Lesson {} not found", id))?;

        let set = inner.favorites.entry(id.to_string()).or_default();
        let favorited = if set.remove(user_id) {
            false
        } else {
            set.insert(user_id.to_string());
            true
        };
        let count = set.len() as u64;

        inner.lessons[pos].favorites_count = count;
        Ok(favorited)
    }

    async fn favorites_of(&self, user_id: &str) -> Result<Vec<Lesson>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner
            .lessons
            .iter()
            .filter(|l| {
                inner
                    .favorites
                    .get(&l.id)
                    .is_some_and(|set| set.contains(user_id))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lesson::Category;
    use crate::core::validation::LessonDraft;

    fn draft(title: &str) -> LessonDraft {
        LessonDraft {
            title: title.to_string(),
            description: "A lesson long enough to pass validation.".to_string(),
            category: Category::Career,
            emotional_tone: None,
            image: None,
            visibility: Default::default(),
            access_level: Default::default(),
        }
    }

    fn lesson(title: &str, author: &str) -> Lesson {
        Lesson::from_draft(&draft(title), author, "Author")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryLessonStore::new();
        let created = store
            .create(lesson("Ask for feedback", "ada@example.com"))
            .await
            .unwrap();

        let retrieved = store.get(&created.id).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let store = InMemoryLessonStore::new();
        let l = lesson("A", "ada@example.com");
        store.create(l.clone()).await.unwrap();
        assert!(store.create(l).await.is_err());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryLessonStore::new();
        let a = store.create(lesson("First", "a@x.com")).await.unwrap();
        let b = store.create(lesson("Second", "b@x.com")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[1].id, b.id);
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let store = InMemoryLessonStore::new();
        store.create(lesson("Mine", "ada@x.com")).await.unwrap();
        store.create(lesson("Theirs", "bob@x.com")).await.unwrap();

        let mine = store.list_by_author("ada@x.com").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_update_missing_lesson_fails() {
        let store = InMemoryLessonStore::new();
        let result = store.update("nope", lesson("X", "a@x.com")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_lesson_and_toggles() {
        let store = InMemoryLessonStore::new();
        let l = store.create(lesson("Gone soon", "a@x.com")).await.unwrap();
        store.toggle_like(&l.id, "user-1").await.unwrap();

        store.delete(&l.id).await.unwrap();
        assert_eq!(store.get(&l.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_toggles_and_keeps_count() {
        let store = InMemoryLessonStore::new();
        let l = store.create(lesson("Likeable", "a@x.com")).await.unwrap();

        assert!(store.toggle_like(&l.id, "user-1").await.unwrap());
        assert!(store.toggle_like(&l.id, "user-2").await.unwrap());

        let lesson = store.get(&l.id).await.unwrap().unwrap();
        assert_eq!(lesson.likes_count, 2);
        assert!(lesson.is_liked_by("user-1"));

        // Second toggle removes the like
        assert!(!store.toggle_like(&l.id, "user-1").await.unwrap());
        let lesson = store.get(&l.id).await.unwrap().unwrap();
        assert_eq!(lesson.likes_count, 1);
        assert!(!lesson.is_liked_by("user-1"));
    }

    #[tokio::test]
    async fn test_favorites_listing() {
        let store = InMemoryLessonStore::new();
        let a = store.create(lesson("A", "a@x.com")).await.unwrap();
        let b = store.create(lesson("B", "b@x.com")).await.unwrap();
        store.create(lesson("C", "c@x.com")).await.unwrap();

        store.toggle_favorite(&a.id, "user-1").await.unwrap();
        store.toggle_favorite(&b.id, "user-1").await.unwrap();
        store.toggle_favorite(&b.id, "user-2").await.unwrap();

        let favs = store.favorites_of("user-1").await.unwrap();
        assert_eq!(favs.len(), 2);
        assert_eq!(favs[0].id, a.id);

        // Toggling off removes it from the listing
        store.toggle_favorite(&a.id, "user-1").await.unwrap();
        let favs = store.favorites_of("user-1").await.unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].id, b.id);
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store =
            InMemoryLessonStore::seeded(vec![lesson("A", "a@x.com"), lesson("B", "b@x.com")]);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
