use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::auth::hash_password;
use crate::domain::{DomainError, NewUser};
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, DomainError> {
    tracing::info!("Signup attempt for user: {}", payload.username);

    let password_hash = hash_password(&payload.password).map_err(DomainError::Internal)?;

    state
        .user_repo
        .create(NewUser {
            email: payload.email,
            username: payload.username,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Signup successful!" })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, DomainError> {
    tracing::info!("Login attempt for user: {}", payload.username);

    state
        .user_repo
        .verify_credentials(&payload.username, &payload.password)
        .await?;

    Ok(Json(json!({ "message": "Login successful!" })))
}
