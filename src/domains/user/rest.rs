use axum::{
  extract::State,
  response::Json as JsonResponse,
  routing::get,
  Router,
};
use validator::Validate;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::{
  domains::post::model::BlogPostResponse,
  models::{ListQuery, SuccessResponse},
  state::{AppState, SharedAppState},
  utils::extract::{AppJson, AppPath, AppQuery},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", get(get_users_handler).post(create_user_handler))
    .route("/users/", get(get_users_handler).post(create_user_handler))
    .route(
      "/users/{user_id}",
      get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
    )
    .route("/users/{user_id}/posts", get(get_user_posts_handler))
}

pub async fn get_users_handler(
  State(state): State<SharedAppState>,
  AppQuery(query): AppQuery<ListQuery>,
) -> Result<JsonResponse<Vec<User>>, AppError> {
  query.validate()?;

  state
    .get_users(query.skip, query.limit)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  AppPath(user_id): AppPath<i32>,
) -> Result<JsonResponse<User>, AppError> {
  state.get_user(user_id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<JsonResponse<User>, AppError> {
  state.create_user(payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  AppPath(user_id): AppPath<i32>,
  AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<JsonResponse<User>, AppError> {
  state
    .update_user(user_id, payload)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  AppPath(user_id): AppPath<i32>,
) -> Result<JsonResponse<SuccessResponse>, AppError> {
  state.delete_user(user_id).await?;
  Ok(JsonResponse(SuccessResponse::new("User deleted successfully")))
}

pub async fn get_user_posts_handler(
  State(state): State<SharedAppState>,
  AppPath(user_id): AppPath<i32>,
) -> Result<JsonResponse<Vec<BlogPostResponse>>, AppError> {
  state
    .get_posts_by_author(user_id)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}
