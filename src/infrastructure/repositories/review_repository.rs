//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::domain::{DomainError, ReviewInput, ReviewRepository};
use crate::models::Review;
use crate::models::book::{Column as BookColumn, Entity as BookEntity};
use crate::models::review::{ActiveModel, Entity as ReviewEntity};

/// SeaORM-based implementation of ReviewRepository
pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(
        &self,
        input: ReviewInput,
        audio: Option<String>,
    ) -> Result<Review, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let review = ActiveModel {
            username: Set(input.username),
            isbn13: Set(input.isbn13),
            book_title: Set(input.book_title),
            review_text: Set(input.review_text),
            image: Set(input.image),
            price: Set(input.price),
            subtitle: Set(input.subtitle),
            audio: Set(audio),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = review.insert(&self.db).await?;
        Ok(Review::from(result))
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        let reviews = ReviewEntity::find().all(&self.db).await?;
        Ok(reviews.into_iter().map(Review::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Review, DomainError> {
        let review = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Review not found".to_string()))?;

        // Enrich with the catalog url for the same isbn13, empty string
        // when no book matches.
        let url = match &review.isbn13 {
            Some(isbn13) => BookEntity::find()
                .filter(BookColumn::Isbn13.eq(isbn13))
                .one(&self.db)
                .await?
                .map(|b| b.url)
                .unwrap_or_default(),
            None => String::new(),
        };

        let mut dto = Review::from(review);
        dto.url = Some(url);
        Ok(dto)
    }

    async fn update(
        &self,
        id: i32,
        input: ReviewInput,
        audio: Option<String>,
    ) -> Result<Review, DomainError> {
        let existing = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Review not found".to_string()))?;

        let mut review: ActiveModel = existing.into();
        review.username = input.username.map_or(NotSet, |v| Set(Some(v)));
        review.isbn13 = input.isbn13.map_or(NotSet, |v| Set(Some(v)));
        review.book_title = input.book_title.map_or(NotSet, |v| Set(Some(v)));
        review.review_text = input.review_text.map_or(NotSet, |v| Set(Some(v)));
        review.image = input.image.map_or(NotSet, |v| Set(Some(v)));
        review.price = input.price.map_or(NotSet, |v| Set(Some(v)));
        review.subtitle = input.subtitle.map_or(NotSet, |v| Set(Some(v)));
        // Audio only changes when a new file was uploaded
        if let Some(filename) = audio {
            review.audio = Set(Some(filename));
        }
        review.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = review.update(&self.db).await?;
        Ok(Review::from(result))
    }

    async fn set_audio(&self, id: i32, audio: String) -> Result<Review, DomainError> {
        let existing = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Review not found".to_string()))?;

        let mut review: ActiveModel = existing.into();
        review.audio = Set(Some(audio));
        review.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = review.update(&self.db).await?;
        Ok(Review::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        // No existence check; deleting an absent review is a success.
        ReviewEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
