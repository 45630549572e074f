use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::{BookInput, DomainError};
use crate::infrastructure::AppState;
use crate::models::Book;

pub async fn create_book(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, DomainError> {
    let mut input = BookInput::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let original_name = field.file_name().unwrap_or("image").to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|e| DomainError::BadRequest(e.to_string()))?;
            image = Some(state.uploads.store(&original_name, &data).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| DomainError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "title" => input.title = Some(value),
            "subtitle" => input.subtitle = Some(value),
            "isbn13" => input.isbn13 = Some(value),
            "price" => input.price = Some(value),
            "url" => input.url = Some(value),
            _ => {}
        }
    }

    let book = state.book_repo.create(input, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book added successfully",
            "book": book
        })),
    ))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, DomainError> {
    let books = state.book_repo.find_all().await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn13): Path<String>,
) -> Result<Json<Book>, DomainError> {
    let book = state.book_repo.find_by_isbn13(&isbn13).await?;
    Ok(Json(book))
}
