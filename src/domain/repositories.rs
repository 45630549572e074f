//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;
use crate::models::{Book, Review, User};

/// Input for creating a user. The hash is computed by the caller
/// (see `auth::hash_password`); repositories never see plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Fields of a review create or update request. Fields left as `None`
/// are not written on update.
#[derive(Debug, Default, Clone)]
pub struct ReviewInput {
    pub username: Option<String>,
    pub isbn13: Option<String>,
    pub book_title: Option<String>,
    pub review_text: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub subtitle: Option<String>,
}

/// Fields of a book create request. `title`, `price` and `url` are
/// required; creation fails with `BadRequest` when any is missing.
#[derive(Debug, Default, Clone)]
pub struct BookInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub isbn13: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
}

/// One day of review activity (UTC calendar day)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReviewCount {
    pub date: String,
    pub count: u64,
}

/// A book title ranked by how many reviews mention it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPopularity {
    pub title: String,
    #[serde(rename = "reviewCount")]
    pub review_count: u64,
}

/// Repository trait for User records
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user. Fails with `Conflict` if a user with the same
    /// email or username already exists.
    async fn create(&self, input: NewUser) -> Result<User, DomainError>;

    /// Check a username/password pair. Fails with `Unauthorized` when
    /// the user is absent or the password does not match.
    async fn verify_credentials(&self, username: &str, password: &str)
    -> Result<User, DomainError>;

    /// All users except the earliest-inserted one (fixed offset of one,
    /// ordered by id ascending).
    async fn find_all_after_first(&self) -> Result<Vec<User>, DomainError>;

    /// Delete by id; succeeds even if no row matched.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Review records
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Create a review; `audio` is the stored filename of an uploaded
    /// file, if one was present.
    async fn create(&self, input: ReviewInput, audio: Option<String>)
    -> Result<Review, DomainError>;

    /// All reviews, natural storage order.
    async fn find_all(&self) -> Result<Vec<Review>, DomainError>;

    /// One review by id, enriched with the matching book's `url`
    /// (empty string when no book shares the isbn13).
    async fn find_by_id(&self, id: i32) -> Result<Review, DomainError>;

    /// Replace the provided fields; `audio` is replaced only when a new
    /// upload is present. Fails with `NotFound` when no row matched.
    async fn update(
        &self,
        id: i32,
        input: ReviewInput,
        audio: Option<String>,
    ) -> Result<Review, DomainError>;

    /// Attach or replace the audio filename on an existing review.
    async fn set_audio(&self, id: i32, audio: String) -> Result<Review, DomainError>;

    /// Delete by id; succeeds even if no row matched.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Book records. Books have no update or delete.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Create a book; `image` is the stored filename of an uploaded
    /// cover, if one was present.
    async fn create(&self, input: BookInput, image: Option<String>)
    -> Result<Book, DomainError>;

    /// All books.
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// One book by isbn13. Fails with `NotFound` when absent.
    async fn find_by_isbn13(&self, isbn13: &str) -> Result<Book, DomainError>;
}

/// Aggregate statistics derived from the stored records
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn count_users(&self) -> Result<u64, DomainError>;
    async fn count_reviews(&self) -> Result<u64, DomainError>;
    /// Counted from the local catalog; never an external service.
    async fn count_books(&self) -> Result<u64, DomainError>;

    /// Reviews grouped by UTC calendar day, ascending by date. Days
    /// with no reviews are omitted.
    async fn reviews_per_day(&self) -> Result<Vec<DailyReviewCount>, DomainError>;

    /// Top book titles by review count, descending, at most `limit`
    /// entries. Ties break by title ascending.
    async fn top_books(&self, limit: usize) -> Result<Vec<BookPopularity>, DomainError>;
}
