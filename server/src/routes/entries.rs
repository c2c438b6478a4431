//! Handlers for the `/entries` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::{decode, JsonBody};
use crate::model::{CreateEntry, Entry, UpdateEntry};
use crate::store::Db;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/{id}",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
}

/// A payload `listId` must name an existing list before the rest of the
/// payload is looked at. Non-string values fall through to the schema
/// check.
async fn ensure_list_ref_exists(db: &Db, body: &Value) -> Result<(), ApiError> {
    if let Some(list_id) = body.get("listId").and_then(Value::as_str) {
        if !db.list_exists(list_id).await? {
            return Err(ApiError::NotFound("List not found"));
        }
    }
    Ok(())
}

async fn list_entries(State(db): State<Db>) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(db.find_all_entries().await?))
}

async fn get_entry(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Entry>, ApiError> {
    db.find_entry(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Entry not found"))
}

async fn create_entry(
    State(db): State<Db>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    ensure_list_ref_exists(&db, &body).await?;
    let input: CreateEntry = decode(body)?;
    let entry = db.insert_entry(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(db): State<Db>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Entry>, ApiError> {
    ensure_list_ref_exists(&db, &body).await?;
    let input: UpdateEntry = decode(body)?;
    db.update_entry(&id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Entry not found"))
}

async fn delete_entry(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !db.delete_entry(&id).await? {
        return Err(ApiError::NotFound("Entry not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
