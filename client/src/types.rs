//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client crate stands alone as an SDK. Integration tests catch any
//! schema drift between the two crates. `listId` is typed as `Uuid` here:
//! the server treats it as an opaque string, but every id it hands out is a
//! UUID, and a typed reference keeps callers from building dangling ones.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// A single todo entry belonging to a list. `done` stays `None` until some
/// client has set it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "listId")]
    pub list_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// A list together with every entry referencing it, as returned by
/// `GET /lists/{id}/entries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListWithEntries {
    pub parent: List,
    pub children: Vec<Entry>,
}

/// Request payload for creating a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    pub name: String,
}

/// Request payload for updating a list. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request payload for creating an entry. The referenced list must exist or
/// the server answers 404.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntry {
    #[serde(rename = "listId")]
    pub list_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Request payload for updating an entry. Only the fields present in the
/// JSON are applied; a present `listId` must name an existing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEntry {
    #[serde(rename = "listId", skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}
