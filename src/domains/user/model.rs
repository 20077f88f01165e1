use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use validator::{Validate, ValidationError};

use crate::utils::deserialize_present;

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct User {
  pub id: i32,
  pub username: String,
  pub email: String,
  pub full_name: Option<String>,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
  #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
  pub username: String,
  #[validate(length(min = 1, max = 100, message = "Email must be between 1 and 100 characters"))]
  pub email: String,
  #[serde(default)]
  #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
  pub full_name: Option<String>,
  /// Accepted for compatibility with existing clients; never stored.
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Partial input for `PUT /users/{id}`. Only keys present in the payload are applied.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_full_name_change"))]
pub struct UpdateUserRequest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
  pub username: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 1, max = 100, message = "Email must be between 1 and 100 characters"))]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_present")]
  pub full_name: Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
}

fn validate_full_name_change(req: &UpdateUserRequest) -> Result<(), ValidationError> {
  match &req.full_name {
    Some(Some(name)) if name.chars().count() > 100 => Err(
      ValidationError::new("full_name_length").with_message("Full name must be at most 100 characters".into()),
    ),
    _ => Ok(()),
  }
}

impl UpdateUserRequest {
  pub fn apply_to(&self, user: &mut User) {
    if let Some(username) = &self.username {
      user.username = username.clone();
    }
    if let Some(email) = &self.email {
      user.email = email.clone();
    }
    if let Some(full_name) = &self.full_name {
      user.full_name = full_name.clone();
    }
    if let Some(is_active) = self.is_active {
      user.is_active = is_active;
    }
  }
}

impl User {
  pub async fn create<'e, E>(executor: E, req: &CreateUserRequest) -> Result<User, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (username, email, full_name)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, full_name, is_active, created_at
      "#,
    )
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.full_name)
    .fetch_one(executor)
    .await?;

    Ok(user)
  }

  pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, full_name, is_active, created_at FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
  }

  pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, full_name, is_active, created_at FROM users WHERE username = $1"#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
  }

  pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, full_name, is_active, created_at FROM users WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
  }

  pub async fn find_by_ids<'e, E>(executor: E, ids: &[i32]) -> Result<Vec<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, full_name, is_active, created_at FROM users WHERE id = ANY($1) ORDER BY id"#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await
  }

  pub async fn list<'e, E>(executor: E, skip: i64, limit: i64) -> Result<Vec<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"
        SELECT id, username, email, full_name, is_active, created_at
        FROM users
        ORDER BY id
        OFFSET $1
        LIMIT $2
      "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(executor)
    .await
  }

  /// Locks the row for the rest of the surrounding transaction.
  pub async fn find_for_update<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, full_name, is_active, created_at FROM users WHERE id = $1 FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
  }

  pub async fn save<'e, E>(&self, executor: E) -> Result<User, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"
        UPDATE users
        SET username = $2, email = $3, full_name = $4, is_active = $5
        WHERE id = $1
        RETURNING id, username, email, full_name, is_active, created_at
      "#,
    )
    .bind(self.id)
    .bind(&self.username)
    .bind(&self.email)
    .bind(&self.full_name)
    .bind(self.is_active)
    .fetch_one(executor)
    .await
  }

  pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
