use std::future::Future;
use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::{
  post::{
    model::{BlogPostResponse, CreatePostRequest, UpdatePostRequest},
    repository::SqlxPostRepository,
    service::{PostService, PostServiceError, PostServiceImpl},
  },
  user::{
    model::{CreateUserRequest, UpdateUserRequest, User},
    repository::SqlxUserRepository,
    service::{UserService, UserServiceError, UserServiceImpl},
  },
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn get_user(&self, user_id: i32) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn get_users(&self, skip: i64, limit: i64) -> impl Future<Output = Result<Vec<User>, UserServiceError>> + Send;
  fn create_user(&self, req: CreateUserRequest) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn update_user(
    &self,
    user_id: i32,
    req: UpdateUserRequest,
  ) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn delete_user(&self, user_id: i32) -> impl Future<Output = Result<(), UserServiceError>> + Send;

  fn get_post(&self, post_id: i32) -> impl Future<Output = Result<BlogPostResponse, PostServiceError>> + Send;
  fn get_posts(
    &self,
    skip: i64,
    limit: i64,
  ) -> impl Future<Output = Result<Vec<BlogPostResponse>, PostServiceError>> + Send;
  fn get_posts_by_author(
    &self,
    user_id: i32,
  ) -> impl Future<Output = Result<Vec<BlogPostResponse>, PostServiceError>> + Send;
  fn create_post(
    &self,
    req: CreatePostRequest,
  ) -> impl Future<Output = Result<BlogPostResponse, PostServiceError>> + Send;
  fn update_post(
    &self,
    post_id: i32,
    req: UpdatePostRequest,
  ) -> impl Future<Output = Result<BlogPostResponse, PostServiceError>> + Send;
  fn delete_post(&self, post_id: i32) -> impl Future<Output = Result<(), PostServiceError>> + Send;
}

/// Per-process handle injected into every request. The pool lives inside the
/// repositories; cloning only bumps reference counts.
#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
  pub post_service: Arc<dyn PostService>,
}

impl SharedAppState {
  pub fn new(pool: PgPool) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(SqlxUserRepository::new(pool.clone())));
    let post_service = Arc::new(PostServiceImpl::new(
      SqlxPostRepository::new(pool.clone()),
      SqlxUserRepository::new(pool),
    ));

    Self::from_services(user_service, post_service)
  }

  pub fn from_services(user_service: Arc<dyn UserService>, post_service: Arc<dyn PostService>) -> Self {
    Self {
      user_service,
      post_service,
    }
  }
}

impl AppState for SharedAppState {
  async fn get_user(&self, user_id: i32) -> Result<User, UserServiceError> {
    self.user_service.get_user(user_id).await
  }

  async fn get_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserServiceError> {
    self.user_service.get_users(skip, limit).await
  }

  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn update_user(&self, user_id: i32, req: UpdateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.update_user(user_id, req).await
  }

  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError> {
    self.user_service.delete_user(user_id).await
  }

  async fn get_post(&self, post_id: i32) -> Result<BlogPostResponse, PostServiceError> {
    self.post_service.get_post(post_id).await
  }

  async fn get_posts(&self, skip: i64, limit: i64) -> Result<Vec<BlogPostResponse>, PostServiceError> {
    self.post_service.get_posts(skip, limit).await
  }

  async fn get_posts_by_author(&self, user_id: i32) -> Result<Vec<BlogPostResponse>, PostServiceError> {
    self.post_service.get_posts_by_author(user_id).await
  }

  async fn create_post(&self, req: CreatePostRequest) -> Result<BlogPostResponse, PostServiceError> {
    self.post_service.create_post(req).await
  }

  async fn update_post(&self, post_id: i32, req: UpdatePostRequest) -> Result<BlogPostResponse, PostServiceError> {
    self.post_service.update_post(post_id, req).await
  }

  async fn delete_post(&self, post_id: i32) -> Result<(), PostServiceError> {
    self.post_service.delete_post(post_id).await
  }
}
