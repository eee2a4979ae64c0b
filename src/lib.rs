//! # lessonhub
//!
//! Client-side core for a lesson-sharing platform. The backend, the
//! identity provider, and the rendering layer are external; this crate
//! owns everything in between:
//!
//! - **Domain model**: typed lesson records with tolerant wire decoding
//! - **List-query engine**: search + category filter + sort + pagination
//!   as one pure function, shared by every listing page
//! - **Session lifecycle**: an explicit `unauthenticated → syncing →
//!   authenticated (confirmed | provisional)` state machine
//! - **Route guards**: policy checks producing allow/wait/redirect
//!   decisions
//! - **REST client**: bearer-authenticated endpoints for lessons,
//!   comments, favorites, moderation, users, and subscription checkout
//! - **In-memory store**: a `LessonStore` backend for development and
//!   tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lessonhub::prelude::*;
//!
//! let mut state = QueryState::new();
//! state.set_search_term("mind");
//! state.set_category(CategoryFilter::Only(Category::Mindset));
//!
//! let page = state.evaluate_on(&lessons);
//! assert!(page.items.len() <= page.page_size);
//!
//! // Changing a filter resets to page 1, so narrowing the search can
//! // never leave the user on an out-of-range page.
//! state.set_page(3);
//! state.set_search_term("growth");
//! assert_eq!(state.query().page, 1);
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain model ===
    pub use crate::core::lesson::{
        AccessLevel, Category, CategoryFilter, Lesson, Tone, Visibility,
    };
    pub use crate::core::validation::LessonDraft;

    // === Query engine ===
    pub use crate::core::query::{
        DEFAULT_PAGE_SIZE, ListQuery, Page, QueryState, SortKey, evaluate,
    };

    // === Session & guards ===
    pub use crate::core::guard::{GuardDecision, GuardPolicy};
    pub use crate::core::session::{ProviderIdentity, Role, Session, UserProfile};

    // === Errors & notifications ===
    pub use crate::core::error::{ApiError, ConfigError, HubError, ValidationError};
    pub use crate::core::notify::{Notifier, TracingNotifier};

    // === Client ===
    pub use crate::client::lessons::{Comment, Report, ReportReason};
    pub use crate::client::users::CheckoutSession;
    pub use crate::client::{ApiClient, LessonsApi, NoToken, StaticToken, TokenProvider, UsersApi};

    // === Storage ===
    pub use crate::core::service::LessonStore;
    pub use crate::storage::InMemoryLessonStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
