use axum::{
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn unprocessable_entity(message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }

  fn internal(detail: String) -> Self {
    tracing::error!("{}", detail);
    AppError::internal_server_error("Internal server error occurred")
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "error": self.message,
      "status_code": self.status_code.as_u16(),
    }));

    (self.status_code, body).into_response()
  }
}

// Extractor rejections keep axum's status (400, 415 or 422) and text.
impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    AppError::new(rejection.status(), rejection.body_text())
  }
}

impl From<PathRejection> for AppError {
  fn from(rejection: PathRejection) -> Self {
    AppError::new(rejection.status(), rejection.body_text())
  }
}

impl From<QueryRejection> for AppError {
  fn from(rejection: QueryRejection) -> Self {
    AppError::new(rejection.status(), rejection.body_text())
  }
}

impl From<ValidationErrors> for AppError {
  fn from(errors: ValidationErrors) -> Self {
    AppError::unprocessable_entity(format!("Validation failed: {}", errors))
  }
}

impl From<crate::domains::user::service::UserServiceError> for AppError {
  fn from(error: crate::domains::user::service::UserServiceError) -> Self {
    use crate::domains::user::service::UserServiceError;
    match error {
      UserServiceError::ValidationError(msg) => AppError::unprocessable_entity(msg),
      UserServiceError::Conflict(msg) => AppError::bad_request(msg),
      UserServiceError::NotFound(msg) => AppError::not_found(msg),
      UserServiceError::InternalServerError(msg) => AppError::internal(msg),
    }
  }
}

impl From<crate::domains::post::service::PostServiceError> for AppError {
  fn from(error: crate::domains::post::service::PostServiceError) -> Self {
    use crate::domains::post::service::PostServiceError;
    match error {
      PostServiceError::ValidationError(msg) => AppError::unprocessable_entity(msg),
      PostServiceError::Conflict(msg) => AppError::bad_request(msg),
      PostServiceError::NotFound(msg) => AppError::not_found(msg),
      PostServiceError::InternalServerError(msg) => AppError::internal(msg),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::user::service::UserServiceError;

  #[tokio::test]
  async fn into_response_writes_status_and_message() {
    let response = AppError::not_found("User not found").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .expect("read body");
    let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value["error"], "User not found");
    assert_eq!(value["status_code"], 404);
  }

  #[test]
  fn conflict_maps_to_bad_request() {
    let err: AppError = UserServiceError::Conflict("Username already registered".to_string()).into();
    assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Username already registered");
  }

  #[test]
  fn internal_errors_hide_details() {
    let err: AppError = UserServiceError::InternalServerError("Database error: connection refused".to_string()).into();
    assert_eq!(err.status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!err.message.contains("connection refused"));
  }
}
