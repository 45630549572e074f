use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::{DomainError, ReviewInput};
use crate::infrastructure::AppState;
use crate::models::Review;
use crate::uploads::UploadStore;

/// Walk the multipart stream, collecting the review text fields and
/// storing the `audio` file part (if any) through the upload store.
async fn collect_review_parts(
    multipart: &mut Multipart,
    uploads: &UploadStore,
) -> Result<(ReviewInput, Option<String>), DomainError> {
    let mut input = ReviewInput::default();
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "audio" {
            let original_name = field.file_name().unwrap_or("audio").to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|e| DomainError::BadRequest(e.to_string()))?;
            audio = Some(uploads.store(&original_name, &data).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| DomainError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "username" => input.username = Some(value),
            "isbn13" => input.isbn13 = Some(value),
            "bookTitle" => input.book_title = Some(value),
            "reviewText" => input.review_text = Some(value),
            "image" => input.image = Some(value),
            "price" => input.price = Some(value),
            "subtitle" => input.subtitle = Some(value),
            _ => {}
        }
    }

    Ok((input, audio))
}

pub async fn create_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, DomainError> {
    let (input, audio) = collect_review_parts(&mut multipart, &state.uploads).await?;

    let review = state.review_repo.create(input, audio).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, DomainError> {
    let reviews = state.review_repo.find_all().await?;
    Ok(Json(reviews))
}

/// Single review, enriched with the catalog url for its isbn13.
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Review>, DomainError> {
    let review = state.review_repo.find_by_id(id).await?;
    Ok(Json(review))
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, DomainError> {
    let (input, audio) = collect_review_parts(&mut multipart, &state.uploads).await?;

    let review = state.review_repo.update(id, input, audio).await?;
    Ok(Json(json!({
        "message": "Review updated",
        "updatedReview": review
    })))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state.review_repo.delete(id).await?;
    Ok(Json(json!({ "message": "Review deleted" })))
}

/// Attach or replace the audio file on an existing review.
pub async fn upload_audio(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, DomainError> {
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("audio") {
            let original_name = field.file_name().unwrap_or("audio").to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|e| DomainError::BadRequest(e.to_string()))?;
            audio = Some(state.uploads.store(&original_name, &data).await?);
        }
    }

    let Some(filename) = audio else {
        return Err(DomainError::BadRequest(
            "No audio file uploaded".to_string(),
        ));
    };

    let review = state.review_repo.set_audio(id, filename).await?;
    Ok(Json(json!({
        "message": "Audio uploaded successfully",
        "review": review
    })))
}
