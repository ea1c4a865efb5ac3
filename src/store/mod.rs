pub mod auth;
pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::journal::{Entry, EntryDraft, EntryPage, EntriesByDate};

pub use http::HttpEntryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Not logged in or session expired")]
    Unauthorized,
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Remote collection of journal entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Entries created within `start..=end`, grouped by `yyyy-MM-dd`.
    async fn list_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EntriesByDate, StoreError>;

    /// Newest first; `page` is 1-based.
    async fn list_entries(&self, page: u32, page_size: u32) -> Result<EntryPage, StoreError>;

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, StoreError>;

    async fn update_entry(&self, id: i64, draft: &EntryDraft) -> Result<Entry, StoreError>;

    async fn delete_entry(&self, id: i64) -> Result<(), StoreError>;
}
