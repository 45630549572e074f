use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::User;

/// All users except the first inserted (fixed offset quirk).
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, DomainError> {
    let users = state.user_repo.find_all_after_first().await?;
    Ok(Json(users))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state.user_repo.delete(id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}
