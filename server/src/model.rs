//! Document types for the two collections and the payload schemas accepted
//! by the write routes.
//!
//! # Design
//! Documents serialize with the store's field names (`_id`, `listId`) so
//! responses look exactly like the persisted records. Payload types are
//! strict: unknown fields are rejected, and each type carries the schema
//! checks that go beyond what deserialization alone can express.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::Validate;

/// A named collection grouping entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct List {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// A single todo item, scoped to exactly one list via `list_id`.
///
/// The reference is an opaque string matched by equality, not a foreign key;
/// `done` stays absent from the document (and from JSON) until a client sets
/// it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "listId")]
    pub list_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Composite returned by `GET /lists/{id}/entries`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListWithEntries {
    pub parent: List,
    pub children: Vec<Entry>,
}

/// Payload for `POST /lists`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateList {
    pub name: String,
}

/// Payload for `PATCH /lists/{id}`. Only the supplied fields are merged.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateList {
    pub name: Option<String>,
}

/// Payload for `POST /entries`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEntry {
    #[serde(rename = "listId")]
    pub list_id: String,
    pub name: String,
    pub done: Option<bool>,
}

/// Payload for `PATCH /entries/{id}`. All fields optional; `_id` is accepted
/// so clients may echo a fetched document back, but it is never written.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEntry {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: Option<String>,
    pub name: Option<String>,
    pub done: Option<bool>,
}

impl Validate for CreateList {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for UpdateList {
    fn validate(&self) -> Result<(), String> {
        if matches!(self.name.as_deref(), Some("")) {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for CreateEntry {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for UpdateEntry {
    fn validate(&self) -> Result<(), String> {
        if matches!(self.name.as_deref(), Some("")) {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}
