use axum::{
  extract::State,
  response::Json as JsonResponse,
  routing::get,
  Router,
};
use validator::Validate;

use super::model::{BlogPostResponse, CreatePostRequest, UpdatePostRequest};
use crate::{
  models::{ListQuery, SuccessResponse},
  state::{AppState, SharedAppState},
  utils::extract::{AppJson, AppPath, AppQuery},
  AppError,
};

pub fn post_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/posts", get(get_posts_handler).post(create_post_handler))
    .route("/posts/", get(get_posts_handler).post(create_post_handler))
    .route(
      "/posts/{post_id}",
      get(get_post_handler).put(update_post_handler).delete(delete_post_handler),
    )
}

pub async fn get_posts_handler(
  State(state): State<SharedAppState>,
  AppQuery(query): AppQuery<ListQuery>,
) -> Result<JsonResponse<Vec<BlogPostResponse>>, AppError> {
  query.validate()?;

  state
    .get_posts(query.skip, query.limit)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn get_post_handler(
  State(state): State<SharedAppState>,
  AppPath(post_id): AppPath<i32>,
) -> Result<JsonResponse<BlogPostResponse>, AppError> {
  state.get_post(post_id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn create_post_handler(
  State(state): State<SharedAppState>,
  AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<JsonResponse<BlogPostResponse>, AppError> {
  state.create_post(payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn update_post_handler(
  State(state): State<SharedAppState>,
  AppPath(post_id): AppPath<i32>,
  AppJson(payload): AppJson<UpdatePostRequest>,
) -> Result<JsonResponse<BlogPostResponse>, AppError> {
  state
    .update_post(post_id, payload)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}

pub async fn delete_post_handler(
  State(state): State<SharedAppState>,
  AppPath(post_id): AppPath<i32>,
) -> Result<JsonResponse<SuccessResponse>, AppError> {
  state.delete_post(post_id).await?;
  Ok(JsonResponse(SuccessResponse::new("Post deleted successfully")))
}
