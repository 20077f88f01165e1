use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::db::RepositoryError;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
  async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
  async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError>;
  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError>;
  async fn create(&self, req: &CreateUserRequest) -> Result<User, RepositoryError>;
  async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<Option<User>, RepositoryError>;
  async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_id(&self.pool, id).await?)
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_username(&self.pool, username).await?)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_email(&self.pool, email).await?)
  }

  async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    Ok(User::find_by_ids(&self.pool, ids).await?)
  }

  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError> {
    Ok(User::list(&self.pool, skip, limit).await?)
  }

  async fn create(&self, req: &CreateUserRequest) -> Result<User, RepositoryError> {
    Ok(User::create(&self.pool, req).await?)
  }

  async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<Option<User>, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let Some(mut user) = User::find_for_update(&mut *tx, id).await? else {
      return Ok(None);
    };

    changes.apply_to(&mut user);
    let user = user.save(&mut *tx).await?;

    tx.commit().await?;
    Ok(Some(user))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    Ok(User::delete(&self.pool, id).await?)
  }
}
