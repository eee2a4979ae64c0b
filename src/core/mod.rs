//! Core module containing the domain model, query engine, and session types

pub mod error;
pub mod guard;
pub mod lesson;
pub mod notify;
pub mod query;
pub mod service;
pub mod session;
pub mod validation;

pub use error::{ApiError, ConfigError, FieldError, HubError, ValidationError};
pub use guard::{GuardDecision, GuardPolicy};
pub use lesson::{AccessLevel, Category, CategoryFilter, Lesson, Tone, Visibility};
pub use notify::{Notifier, TracingNotifier};
pub use query::{DEFAULT_PAGE_SIZE, ListQuery, Page, QueryState, SortKey, evaluate};
pub use service::LessonStore;
pub use session::{ProviderIdentity, Role, Session, UserProfile};
pub use validation::LessonDraft;
