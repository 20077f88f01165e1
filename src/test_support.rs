use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceExt;

use crate::{
  app::create_app,
  db::RepositoryError,
  domains::{
    post::{
      model::{BlogPost, CreatePostRequest, UpdatePostRequest},
      repository::PostRepository,
      service::PostServiceImpl,
    },
    user::{
      model::{CreateUserRequest, UpdateUserRequest, User},
      repository::UserRepository,
      service::UserServiceImpl,
    },
  },
  state::SharedAppState,
};

mockall::mock! {
    pub UserRepository {}

    #[async_trait]
    impl UserRepository for UserRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
        async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError>;
        async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError>;
        async fn create(&self, req: &CreateUserRequest) -> Result<User, RepositoryError>;
        async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<Option<User>, RepositoryError>;
        async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
    }
}

mockall::mock! {
    pub PostRepository {}

    #[async_trait]
    impl PostRepository for PostRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepositoryError>;
        async fn list(&self, skip: i64, limit: i64) -> Result<Vec<BlogPost>, RepositoryError>;
        async fn list_by_author(&self, author_id: i32) -> Result<Vec<BlogPost>, RepositoryError>;
        async fn create(&self, req: &CreatePostRequest) -> Result<BlogPost, RepositoryError>;
        async fn update(&self, id: i32, changes: &UpdatePostRequest) -> Result<Option<BlogPost>, RepositoryError>;
        async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
    }
}

#[derive(Default)]
struct Tables {
  users: Vec<User>,
  posts: Vec<BlogPost>,
  next_user_id: i32,
  next_post_id: i32,
}

/// Postgres stand-in for router tests. Mirrors the schema's unique, foreign key
/// and cascade rules.
#[derive(Clone, Default)]
pub struct InMemoryStore {
  tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn user_count(&self) -> usize {
    self.tables.lock().unwrap().users.len()
  }

  pub fn post_count(&self) -> usize {
    self.tables.lock().unwrap().posts.len()
  }
}

fn check_unique(users: &[User], candidate: &User) -> Result<(), RepositoryError> {
  let others = users.iter().filter(|u| u.id != candidate.id);
  for other in others {
    if other.username == candidate.username {
      return Err(RepositoryError::Conflict("Username already registered".to_string()));
    }
    if other.email == candidate.email {
      return Err(RepositoryError::Conflict("Email already registered".to_string()));
    }
  }
  Ok(())
}

fn page<T: Clone>(rows: &[T], skip: i64, limit: i64) -> Vec<T> {
  rows
    .iter()
    .skip(skip.max(0) as usize)
    .take(limit.max(0) as usize)
    .cloned()
    .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.users.iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.users.iter().find(|u| u.username == username).cloned())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.users.iter().find(|u| u.email == email).cloned())
  }

  async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
  }

  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(page(&tables.users, skip, limit))
  }

  async fn create(&self, req: &CreateUserRequest) -> Result<User, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    let user = User {
      id: tables.next_user_id + 1,
      username: req.username.clone(),
      email: req.email.clone(),
      full_name: req.full_name.clone(),
      is_active: true,
      created_at: Utc::now(),
    };
    check_unique(&tables.users, &user)?;

    tables.next_user_id = user.id;
    tables.users.push(user.clone());
    Ok(user)
  }

  async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<Option<User>, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    let Some(index) = tables.users.iter().position(|u| u.id == id) else {
      return Ok(None);
    };

    let mut user = tables.users[index].clone();
    changes.apply_to(&mut user);
    check_unique(&tables.users, &user)?;

    tables.users[index] = user.clone();
    Ok(Some(user))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    let before = tables.users.len();
    tables.users.retain(|u| u.id != id);
    let deleted = tables.users.len() < before;
    if deleted {
      tables.posts.retain(|p| p.author_id != id);
    }
    Ok(deleted)
  }
}

#[async_trait]
impl PostRepository for InMemoryStore {
  async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.posts.iter().find(|p| p.id == id).cloned())
  }

  async fn list(&self, skip: i64, limit: i64) -> Result<Vec<BlogPost>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(page(&tables.posts, skip, limit))
  }

  async fn list_by_author(&self, author_id: i32) -> Result<Vec<BlogPost>, RepositoryError> {
    let tables = self.tables.lock().unwrap();
    Ok(tables.posts.iter().filter(|p| p.author_id == author_id).cloned().collect())
  }

  async fn create(&self, req: &CreatePostRequest) -> Result<BlogPost, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    if !tables.users.iter().any(|u| u.id == req.author_id) {
      return Err(RepositoryError::NotFound("Author not found".to_string()));
    }

    let now = Utc::now();
    let post = BlogPost {
      id: tables.next_post_id + 1,
      title: req.title.clone(),
      content: req.content.clone(),
      author_id: req.author_id,
      created_at: now,
      updated_at: now,
    };
    tables.next_post_id = post.id;
    tables.posts.push(post.clone());
    Ok(post)
  }

  async fn update(&self, id: i32, changes: &UpdatePostRequest) -> Result<Option<BlogPost>, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    let Some(post) = tables.posts.iter_mut().find(|p| p.id == id) else {
      return Ok(None);
    };

    changes.apply_to(post);
    post.updated_at = Utc::now();
    Ok(Some(post.clone()))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    let mut tables = self.tables.lock().unwrap();
    let before = tables.posts.len();
    tables.posts.retain(|p| p.id != id);
    Ok(tables.posts.len() < before)
  }
}

pub fn state_with_store(store: InMemoryStore) -> SharedAppState {
  SharedAppState::from_services(
    Arc::new(UserServiceImpl::new(store.clone())),
    Arc::new(PostServiceImpl::new(store.clone(), store)),
  )
}

pub fn app_with_store(store: InMemoryStore) -> Router {
  create_app(state_with_store(store))
}

pub async fn app_with_pool(pool: PgPool) -> Router {
  let state = SharedAppState::new(pool);
  create_app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request")
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");
  send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("DELETE")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");
  send(app, request).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("POST", uri, body)).await
}

pub async fn put_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("PUT", uri, body)).await
}

pub fn error_message(body: &[u8]) -> String {
  let value: serde_json::Value = serde_json::from_slice(body).expect("deserialize error body");
  value["error"].as_str().unwrap_or_default().to_string()
}
