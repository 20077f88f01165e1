use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::domains::user::model::User;

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct BlogPost {
  pub id: i32,
  pub title: String,
  pub content: String,
  pub author_id: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A post as returned to clients, with its author embedded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlogPostResponse {
  pub id: i32,
  pub title: String,
  pub content: String,
  pub author_id: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub author: User,
}

impl BlogPostResponse {
  pub fn new(post: BlogPost, author: User) -> Self {
    Self {
      id: post.id,
      title: post.title,
      content: post.content,
      author_id: post.author_id,
      created_at: post.created_at,
      updated_at: post.updated_at,
      author,
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePostRequest {
  #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
  pub title: String,
  #[validate(length(min = 1, message = "Content is required"))]
  pub content: String,
  pub author_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 1, message = "Content is required"))]
  pub content: Option<String>,
}

impl UpdatePostRequest {
  pub fn apply_to(&self, post: &mut BlogPost) {
    if let Some(title) = &self.title {
      post.title = title.clone();
    }
    if let Some(content) = &self.content {
      post.content = content.clone();
    }
  }
}
