//! SeaORM implementation of StatsRepository
//!
//! Counts go through the paginator; the grouped statistics fetch the
//! review rows and aggregate in-process, which is plenty at this
//! collection size.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::{BookPopularity, DailyReviewCount, DomainError, StatsRepository};
use crate::models::book::Entity as BookEntity;
use crate::models::review::Entity as ReviewEntity;
use crate::models::user::Entity as UserEntity;

/// SeaORM-based implementation of StatsRepository
pub struct SeaOrmStatsRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatsRepository for SeaOrmStatsRepository {
    async fn count_users(&self) -> Result<u64, DomainError> {
        Ok(UserEntity::find().count(&self.db).await?)
    }

    async fn count_reviews(&self) -> Result<u64, DomainError> {
        Ok(ReviewEntity::find().count(&self.db).await?)
    }

    async fn count_books(&self) -> Result<u64, DomainError> {
        Ok(BookEntity::find().count(&self.db).await?)
    }

    async fn reviews_per_day(&self) -> Result<Vec<DailyReviewCount>, DomainError> {
        let reviews = ReviewEntity::find().all(&self.db).await?;

        // created_at is RFC 3339 UTC, so the first ten characters are
        // the calendar day. BTreeMap keeps the dates ascending.
        let mut per_day: BTreeMap<String, u64> = BTreeMap::new();
        for review in reviews {
            let day = review.created_at.chars().take(10).collect::<String>();
            *per_day.entry(day).or_insert(0) += 1;
        }

        Ok(per_day
            .into_iter()
            .map(|(date, count)| DailyReviewCount { date, count })
            .collect())
    }

    async fn top_books(&self, limit: usize) -> Result<Vec<BookPopularity>, DomainError> {
        let reviews = ReviewEntity::find().all(&self.db).await?;

        let mut per_title: HashMap<String, u64> = HashMap::new();
        for review in reviews {
            if let Some(title) = review.book_title {
                *per_title.entry(title).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<BookPopularity> = per_title
            .into_iter()
            .map(|(title, review_count)| BookPopularity {
                title,
                review_count,
            })
            .collect();

        // Count descending, title ascending as the tie-break so the
        // ranking is deterministic.
        ranked.sort_by(|a, b| {
            b.review_count
                .cmp(&a.review_count)
                .then_with(|| a.title.cmp(&b.title))
        });
        ranked.truncate(limit);

        Ok(ranked)
    }
}
