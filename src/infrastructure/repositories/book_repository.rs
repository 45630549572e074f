//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{BookInput, BookRepository, DomainError};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn create(
        &self,
        input: BookInput,
        image: Option<String>,
    ) -> Result<Book, DomainError> {
        // Presence check only; no further validation by design.
        let (Some(title), Some(price), Some(url)) = (input.title, input.price, input.url)
        else {
            return Err(DomainError::BadRequest(
                "Required fields missing".to_string(),
            ));
        };

        let now = chrono::Utc::now().to_rfc3339();

        let book = ActiveModel {
            title: Set(title),
            subtitle: Set(input.subtitle),
            isbn13: Set(input.isbn13),
            price: Set(price),
            url: Set(url),
            image: Set(image),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = book.insert(&self.db).await?;
        Ok(Book::from(result))
    }

    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find().all(&self.db).await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_isbn13(&self, isbn13: &str) -> Result<Book, DomainError> {
        let book = BookEntity::find()
            .filter(Column::Isbn13.eq(isbn13))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        Ok(Book::from(book))
    }
}
