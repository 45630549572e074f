pub mod auth;
pub mod books;
pub mod health;
pub mod reviews;
pub mod stats;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(health::health_check))
        // Auth (route names kept from the original frontend contract)
        .route("/add", post(auth::signup))
        .route("/view", post(auth::login))
        // Reviews
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews", post(reviews::create_review))
        .route(
            "/review/:id",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/upload-audio/:id", post(reviews::upload_audio))
        // Users
        .route("/users", get(users::list_users))
        .route("/user/:id", delete(users::delete_user))
        // Books
        .route("/addbook", post(books::create_book))
        .route("/books", get(books::list_books))
        .route("/books/:isbn13", get(books::get_book))
        // Statistics
        .route("/usercount", get(stats::user_count))
        .route("/reviewcount", get(stats::review_count))
        .route("/bookcount", get(stats::book_count))
        .route("/reviews-over-time", get(stats::reviews_over_time))
        .route("/most-popular-books", get(stats::most_popular_books))
        .with_state(state)
}
