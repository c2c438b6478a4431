//! Handlers for the `/lists` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::model::{CreateList, List, ListWithEntries, UpdateList};
use crate::store::Db;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{id}",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .route("/lists/{id}/entries", get(get_list_with_entries))
}

async fn list_lists(State(db): State<Db>) -> Result<Json<Vec<List>>, ApiError> {
    Ok(Json(db.find_all_lists().await?))
}

async fn get_list(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<List>, ApiError> {
    db.find_list(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("List not found"))
}

async fn get_list_with_entries(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ListWithEntries>, ApiError> {
    let parent = db
        .find_list(&id)
        .await?
        .ok_or(ApiError::NotFound("List not found"))?;
    let children = db.find_entries_for_list(&parent.id.to_string()).await?;
    Ok(Json(ListWithEntries { parent, children }))
}

async fn create_list(
    State(db): State<Db>,
    ValidatedJson(input): ValidatedJson<CreateList>,
) -> Result<(StatusCode, Json<List>), ApiError> {
    let list = db.insert_list(input).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

async fn update_list(
    State(db): State<Db>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateList>,
) -> Result<Json<List>, ApiError> {
    db.update_list(&id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("List not found"))
}

/// Dependent entries go first. The two deletes are separate store calls,
/// so a competing request can observe the gap between them.
async fn delete_list(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let entries_removed = db.delete_entries_for_list(&id).await?;
    if !db.delete_list(&id).await? {
        return Err(ApiError::NotFound("List not found"));
    }
    tracing::debug!(list_id = %id, entries_removed, "deleted list");
    Ok(StatusCode::NO_CONTENT)
}
