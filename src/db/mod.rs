pub mod pool;

use std::error::Error;

/// Failure surfaced by a repository. Constraint violations that the API reports
/// to clients are lifted out of `sqlx::Error` here.
#[derive(Debug)]
pub enum RepositoryError {
  DatabaseError(sqlx::Error),
  NotFound(String),
  Conflict(String),
}

impl Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RepositoryError::DatabaseError(err) => write!(f, "Database error: {}", err),
      RepositoryError::NotFound(msg) => write!(f, "Not found: {}", msg),
      RepositoryError::Conflict(msg) => write!(f, "Conflict: {}", msg),
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    if let Some(db_err) = err.as_database_error() {
      if db_err.is_unique_violation() {
        let message = match db_err.constraint() {
          Some("users_username_key") => "Username already registered",
          Some("users_email_key") => "Email already registered",
          _ => "Duplicate value",
        };
        return RepositoryError::Conflict(message.to_string());
      }

      if db_err.is_foreign_key_violation() && db_err.constraint() == Some("blog_posts_author_id_fkey") {
        return RepositoryError::NotFound("Author not found".to_string());
      }
    }

    RepositoryError::DatabaseError(err)
  }
}
