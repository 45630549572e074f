//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookRepository, ReviewRepository, StatsRepository, UserRepository};
use crate::infrastructure::{
    SeaOrmBookRepository, SeaOrmReviewRepository, SeaOrmStatsRepository, SeaOrmUserRepository,
};
use crate::uploads::UploadStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Review repository
    pub review_repo: Arc<dyn ReviewRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Aggregate statistics
    pub stats_repo: Arc<dyn StatsRepository>,
    /// Where uploaded files land
    pub uploads: UploadStore,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, uploads: UploadStore) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let review_repo = Arc::new(SeaOrmReviewRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let stats_repo = Arc::new(SeaOrmStatsRepository::new(db));

        Self {
            user_repo,
            review_repo,
            book_repo,
            stats_repo,
            uploads,
        }
    }
}
