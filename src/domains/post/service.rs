use std::collections::HashMap;
use std::error::Error;

use async_trait::async_trait;
use validator::Validate;

use super::{
  model::{BlogPost, BlogPostResponse, CreatePostRequest, UpdatePostRequest},
  repository::PostRepository,
};
use crate::{domains::user::repository::UserRepository, impl_service_error_conversions};

#[derive(Debug)]
pub enum PostServiceError {
  ValidationError(String),
  Conflict(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for PostServiceError {}

impl std::fmt::Display for PostServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PostServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      PostServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      PostServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      PostServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(PostServiceError, InternalServerError, NotFound, Conflict);

const POST_NOT_FOUND: &str = "Post not found";

#[async_trait]
pub trait PostService: Send + Sync {
  async fn get_post(&self, post_id: i32) -> Result<BlogPostResponse, PostServiceError>;
  async fn get_posts(&self, skip: i64, limit: i64) -> Result<Vec<BlogPostResponse>, PostServiceError>;
  async fn get_posts_by_author(&self, user_id: i32) -> Result<Vec<BlogPostResponse>, PostServiceError>;
  async fn create_post(&self, req: CreatePostRequest) -> Result<BlogPostResponse, PostServiceError>;
  async fn update_post(&self, post_id: i32, req: UpdatePostRequest) -> Result<BlogPostResponse, PostServiceError>;
  async fn delete_post(&self, post_id: i32) -> Result<(), PostServiceError>;
}

pub struct PostServiceImpl<P, U> {
  post_repository: P,
  user_repository: U,
}

impl<P, U> PostServiceImpl<P, U>
where
  P: PostRepository,
  U: UserRepository,
{
  pub fn new(post_repository: P, user_repository: U) -> Self {
    Self {
      post_repository,
      user_repository,
    }
  }

  // A missing author means the user was deleted after the post was read, and the
  // cascade has removed the post as well.
  async fn with_author(&self, post: BlogPost) -> Result<BlogPostResponse, PostServiceError> {
    let author = self
      .user_repository
      .find_by_id(post.author_id)
      .await?
      .ok_or_else(|| PostServiceError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(BlogPostResponse::new(post, author))
  }

  async fn with_authors(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPostResponse>, PostServiceError> {
    let mut author_ids: Vec<i32> = posts.iter().map(|post| post.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, _> = self
      .user_repository
      .find_by_ids(&author_ids)
      .await?
      .into_iter()
      .map(|user| (user.id, user))
      .collect();

    Ok(
      posts
        .into_iter()
        .filter_map(|post| {
          let author = authors.get(&post.author_id)?.clone();
          Some(BlogPostResponse::new(post, author))
        })
        .collect(),
    )
  }
}

#[async_trait]
impl<P, U> PostService for PostServiceImpl<P, U>
where
  P: PostRepository,
  U: UserRepository,
{
  async fn get_post(&self, post_id: i32) -> Result<BlogPostResponse, PostServiceError> {
    let post = self
      .post_repository
      .find_by_id(post_id)
      .await?
      .ok_or_else(|| PostServiceError::NotFound(POST_NOT_FOUND.to_string()))?;

    self.with_author(post).await
  }

  async fn get_posts(&self, skip: i64, limit: i64) -> Result<Vec<BlogPostResponse>, PostServiceError> {
    let posts = self.post_repository.list(skip, limit).await?;
    self.with_authors(posts).await
  }

  async fn get_posts_by_author(&self, user_id: i32) -> Result<Vec<BlogPostResponse>, PostServiceError> {
    let author = self
      .user_repository
      .find_by_id(user_id)
      .await?
      .ok_or_else(|| PostServiceError::NotFound("User not found".to_string()))?;

    let posts = self.post_repository.list_by_author(user_id).await?;

    Ok(
      posts
        .into_iter()
        .map(|post| BlogPostResponse::new(post, author.clone()))
        .collect(),
    )
  }

  async fn create_post(&self, req: CreatePostRequest) -> Result<BlogPostResponse, PostServiceError> {
    req
      .validate()
      .map_err(|e| PostServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let author = self
      .user_repository
      .find_by_id(req.author_id)
      .await?
      .ok_or_else(|| PostServiceError::NotFound("Author not found".to_string()))?;

    let post = self.post_repository.create(&req).await?;
    tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");

    Ok(BlogPostResponse::new(post, author))
  }

  async fn update_post(&self, post_id: i32, req: UpdatePostRequest) -> Result<BlogPostResponse, PostServiceError> {
    req
      .validate()
      .map_err(|e| PostServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let post = self
      .post_repository
      .update(post_id, &req)
      .await?
      .ok_or_else(|| PostServiceError::NotFound(POST_NOT_FOUND.to_string()))?;

    self.with_author(post).await
  }

  async fn delete_post(&self, post_id: i32) -> Result<(), PostServiceError> {
    if !self.post_repository.delete(post_id).await? {
      return Err(PostServiceError::NotFound(POST_NOT_FOUND.to_string()));
    }

    tracing::info!(post_id, "Post deleted");
    Ok(())
  }
}
