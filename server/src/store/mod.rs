//! Persistence gateway for the two document collections.
//!
//! # Design
//! Handlers never touch a concrete backend: they hold an [`Db`]
//! (`Arc<dyn TodoStore>`) that is constructed once at startup and injected
//! through router state. Every operation is one independent round trip.
//! There are no transactions, so multi-step sequences (the list-delete
//! cascade) are visible as such at the call site.
//!
//! Identifier handling is deliberately forgiving: a lookup with a string
//! that is not a well-formed id must report "no match", never an error.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{CreateEntry, CreateList, Entry, List, UpdateEntry, UpdateList};

pub use memory::MemoryStore;

/// Shared store handle, reused across all in-flight requests.
pub type Db = Arc<dyn TodoStore>;

/// Errors from store operations.
///
/// Malformed ids and missing documents are not errors; they surface as
/// `None`, `false`, or an empty scan. This type is for the backend itself
/// misbehaving, and its detail is logged rather than returned to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The configured database URL names no known backend.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Typed access to the `list` and `entry` collections.
///
/// Contract shared by all backends:
/// - Reads with a malformed id return `Ok(None)`; they never error.
/// - Scans are unordered, unfiltered, and unpaged.
/// - Inserts generate the document id and return the stored document.
/// - Updates merge only the supplied fields and return the merged document,
///   or `None` when nothing matched the id.
/// - Deletes report whether anything matched.
#[async_trait]
pub trait TodoStore: std::fmt::Debug + Send + Sync {
    async fn find_all_lists(&self) -> StoreResult<Vec<List>>;

    async fn find_list(&self, id: &str) -> StoreResult<Option<List>>;

    async fn insert_list(&self, new: CreateList) -> StoreResult<List>;

    async fn update_list(&self, id: &str, patch: UpdateList) -> StoreResult<Option<List>>;

    async fn delete_list(&self, id: &str) -> StoreResult<bool>;

    async fn find_all_entries(&self) -> StoreResult<Vec<Entry>>;

    /// All entries whose `listId` equals `list_id`, by string equality.
    async fn find_entries_for_list(&self, list_id: &str) -> StoreResult<Vec<Entry>>;

    async fn find_entry(&self, id: &str) -> StoreResult<Option<Entry>>;

    async fn insert_entry(&self, new: CreateEntry) -> StoreResult<Entry>;

    async fn update_entry(&self, id: &str, patch: UpdateEntry) -> StoreResult<Option<Entry>>;

    async fn delete_entry(&self, id: &str) -> StoreResult<bool>;

    /// Remove every entry referencing `list_id`; returns how many went.
    async fn delete_entries_for_list(&self, list_id: &str) -> StoreResult<u64>;

    /// Whether a list with this id exists. Fails open: a malformed id is
    /// simply a list that does not exist.
    async fn list_exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.find_list(id).await?.is_some())
    }
}

/// Open the store backend named by a database URL.
///
/// `memory://` selects the embedded in-memory backend. Driver-backed stores
/// plug in behind [`TodoStore`]; an unrecognized scheme is a startup error.
pub fn open(database_url: &str) -> StoreResult<Db> {
    match database_url {
        "memory://" | "memory:" => Ok(Arc::new(MemoryStore::new())),
        other => Err(StoreError::UnsupportedUrl(other.to_string())),
    }
}
