//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::auth;
use crate::domain::{DomainError, NewUser, UserRepository};
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        // Duplicate check on email OR username. Username stays
        // non-unique at the schema level; this check is the only guard.
        let existing = UserEntity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(&input.email))
                    .add(Column::Username.eq(&input.username)),
            )
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(DomainError::Conflict(
                "Email or username already exists.".to_string(),
            ));
        }

        let user = ActiveModel {
            email: Set(input.email),
            username: Set(input.username),
            password_hash: Set(input.password_hash),
            signup_date: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = user.insert(&self.db).await?;
        Ok(User::from(result))
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid credentials.".to_string()))?;

        match auth::verify_password(password, &user.password_hash) {
            Ok(true) => Ok(User::from(user)),
            _ => Err(DomainError::Unauthorized(
                "Invalid credentials.".to_string(),
            )),
        }
    }

    async fn find_all_after_first(&self) -> Result<Vec<User>, DomainError> {
        // Fixed offset of one: the earliest-inserted user is never listed.
        // SQLite rejects OFFSET without LIMIT, so pair it with a no-op limit.
        let users = UserEntity::find()
            .order_by_asc(Column::Id)
            .limit(i64::MAX as u64)
            .offset(1)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        // No existence check; deleting an absent user is a success.
        UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
