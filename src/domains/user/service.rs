use async_trait::async_trait;
use std::error::Error;
use validator::Validate;

use super::{
  model::{CreateUserRequest, UpdateUserRequest, User},
  repository::UserRepository,
};
use crate::impl_service_error_conversions;

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError(String),
  Conflict(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      UserServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError, NotFound, Conflict);

const USER_NOT_FOUND: &str = "User not found";

#[async_trait]
pub trait UserService: Send + Sync {
  async fn get_user(&self, user_id: i32) -> Result<User, UserServiceError>;
  async fn get_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserServiceError>;
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError>;
  async fn update_user(&self, user_id: i32, req: UpdateUserRequest) -> Result<User, UserServiceError>;
  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn get_user(&self, user_id: i32) -> Result<User, UserServiceError> {
    self
      .user_repository
      .find_by_id(user_id)
      .await?
      .ok_or_else(|| UserServiceError::NotFound(USER_NOT_FOUND.to_string()))
  }

  async fn get_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserServiceError> {
    Ok(self.user_repository.list(skip, limit).await?)
  }

  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    if self.user_repository.find_by_username(&req.username).await?.is_some() {
      return Err(UserServiceError::Conflict("Username already registered".to_string()));
    }

    if self.user_repository.find_by_email(&req.email).await?.is_some() {
      return Err(UserServiceError::Conflict("Email already registered".to_string()));
    }

    let user = self.user_repository.create(&req).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");

    Ok(user)
  }

  async fn update_user(&self, user_id: i32, req: UpdateUserRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    self
      .user_repository
      .update(user_id, &req)
      .await?
      .ok_or_else(|| UserServiceError::NotFound(USER_NOT_FOUND.to_string()))
  }

  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError> {
    if !self.user_repository.delete(user_id).await? {
      return Err(UserServiceError::NotFound(USER_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id, "User deleted");
    Ok(())
  }
}
