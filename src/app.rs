use axum::{http::HeaderValue, response::Json as JsonResponse, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  domains::{post::rest::post_routes, user::rest::user_routes},
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/", get(root_handler))
    .merge(user_routes())
    .merge(post_routes())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn root_handler() -> JsonResponse<Value> {
  JsonResponse(json!({
    "message": "Welcome to the Blog API!",
    "status": "running",
  }))
}

/// An empty list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
  let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

  let origins: Vec<HeaderValue> = allowed_origins
    .iter()
    .filter_map(|origin| match origin.parse() {
      Ok(value) => Some(value),
      Err(_) => {
        tracing::warn!(%origin, "Ignoring invalid CORS origin");
        None
      }
    })
    .collect();

  if origins.is_empty() {
    layer.allow_origin(Any)
  } else {
    layer.allow_origin(origins)
  }
}
