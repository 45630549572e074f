use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::domain::{BookPopularity, DailyReviewCount, DomainError};
use crate::infrastructure::AppState;

const TOP_BOOKS_LIMIT: usize = 10;

pub async fn user_count(State(state): State<AppState>) -> Result<Json<Value>, DomainError> {
    let count = state.stats_repo.count_users().await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn review_count(State(state): State<AppState>) -> Result<Json<Value>, DomainError> {
    let count = state.stats_repo.count_reviews().await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn book_count(State(state): State<AppState>) -> Result<Json<Value>, DomainError> {
    let count = state.stats_repo.count_books().await?;
    Ok(Json(json!({ "count": count })))
}

/// Sparse series of review counts per UTC day, ascending.
pub async fn reviews_over_time(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyReviewCount>>, DomainError> {
    let series = state.stats_repo.reviews_per_day().await?;
    Ok(Json(series))
}

pub async fn most_popular_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookPopularity>>, DomainError> {
    let ranking = state.stats_repo.top_books(TOP_BOOKS_LIMIT).await?;
    Ok(Json(ranking))
}
