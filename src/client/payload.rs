//! Shape-tolerant decoding of backend list responses
//!
//! The backend is inconsistent about list envelopes: some endpoints
//! return a bare JSON array, others wrap it under `lessons`, `data`,
//! `items`, or a resource-specific key. [`ListPayload`] accepts all of
//! them so callers always receive a plain `Vec`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A list response in any of the shapes the backend produces.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(WrappedList<T>),
}

/// An object wrapping the list under a known key.
#[derive(Debug, Deserialize)]
pub struct WrappedList<T> {
    #[serde(
        rename = "lessons",
        alias = "data",
        alias = "items",
        alias = "users",
        alias = "reports",
        alias = "comments"
    )]
    inner: Vec<T>,
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Unwrap into the plain item list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped(wrapped) => wrapped.inner,
        }
    }
}
