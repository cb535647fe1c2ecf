//! Member API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::AppJson;
use crate::core::ServerState;
use shared::models::{Member, MemberCreate, MemberUpdate};
use shared::{ApiResponse, AppResult};

/// POST /mailchimp/lists/:list_id/members - create a member under a synced list
pub async fn create(
    State(state): State<ServerState>,
    Path(list_id): Path<i64>,
    AppJson(payload): AppJson<MemberCreate>,
) -> AppResult<Json<Member>> {
    let member = state.members.create(list_id, payload).await?;
    Ok(Json(member))
}

/// GET /mailchimp/lists/:list_id/members - all mirrored members of a list
pub async fn list(
    State(state): State<ServerState>,
    Path(list_id): Path<i64>,
) -> AppResult<Json<Vec<Member>>> {
    let members = state.members.get_for_list(list_id).await?;
    Ok(Json(members))
}

/// GET /mailchimp/lists/:list_id/members/:member_id - one mirrored member
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((list_id, member_id)): Path<(i64, i64)>,
) -> AppResult<Json<Member>> {
    let member = state.members.get(list_id, member_id).await?;
    Ok(Json(member))
}

/// PUT /mailchimp/lists/:list_id/members/:member_id - update on MailChimp, then locally
pub async fn update(
    State(state): State<ServerState>,
    Path((list_id, member_id)): Path<(i64, i64)>,
    AppJson(payload): AppJson<MemberUpdate>,
) -> AppResult<Json<Member>> {
    let member = state.members.update(list_id, member_id, payload).await?;
    Ok(Json(member))
}

/// DELETE /mailchimp/lists/:list_id/members/:member_id - remove from MailChimp, then locally
pub async fn delete(
    State(state): State<ServerState>,
    Path((list_id, member_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.members.delete(list_id, member_id).await?;
    Ok(Json(ApiResponse::ok()))
}
