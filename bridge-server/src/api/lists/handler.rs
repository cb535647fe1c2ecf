//! List API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::AppJson;
use crate::core::ServerState;
use shared::models::{List, ListCreate, ListUpdate};
use shared::{ApiResponse, AppResult};

/// POST /mailchimp/lists - create a list locally and on MailChimp
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ListCreate>,
) -> AppResult<Json<List>> {
    let list = state.lists.create(payload).await?;
    Ok(Json(list))
}

/// GET /mailchimp/lists - all mirrored lists
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<List>>> {
    let lists = state.lists.get_all().await?;
    Ok(Json(lists))
}

/// GET /mailchimp/lists/:list_id - one mirrored list
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(list_id): Path<i64>,
) -> AppResult<Json<List>> {
    let list = state.lists.get(list_id).await?;
    Ok(Json(list))
}

/// PUT|PATCH /mailchimp/lists/:list_id - update locally and on MailChimp
pub async fn update(
    State(state): State<ServerState>,
    Path(list_id): Path<i64>,
    AppJson(payload): AppJson<ListUpdate>,
) -> AppResult<Json<List>> {
    let list = state.lists.update(list_id, payload).await?;
    Ok(Json(list))
}

/// DELETE /mailchimp/lists/:list_id - remove from MailChimp, then locally
pub async fn delete(
    State(state): State<ServerState>,
    Path(list_id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.lists.delete(list_id).await?;
    Ok(Json(ApiResponse::ok()))
}
