use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: Option<String>,
    pub isbn13: Option<String>,
    pub book_title: Option<String>,
    pub review_text: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub subtitle: Option<String>,
    // Filename of an uploaded audio file, if any
    pub audio: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses. `url` is only populated on the enriched
// single-review read (looked up from the book catalog by isbn13).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub username: Option<String>,
    pub isbn13: Option<String>,
    #[serde(rename = "bookTitle")]
    pub book_title: Option<String>,
    #[serde(rename = "reviewText")]
    pub review_text: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub subtitle: Option<String>,
    pub audio: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            isbn13: model.isbn13,
            book_title: model.book_title,
            review_text: model.review_text,
            image: model.image,
            price: model.price,
            subtitle: model.subtitle,
            audio: model.audio,
            created_at: model.created_at,
            updated_at: model.updated_at,
            url: None,
        }
    }
}
