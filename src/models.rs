use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_LIMIT: i64 = 100;

/// Offset pagination shared by the collection routes.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Validate)]
pub struct ListQuery {
  #[serde(default)]
  #[validate(range(min = 0, message = "skip must not be negative"))]
  pub skip: i64,
  #[serde(default = "default_limit")]
  #[validate(range(min = 0, message = "limit must not be negative"))]
  pub limit: i64,
}

fn default_limit() -> i64 {
  DEFAULT_LIMIT
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
  pub message: String,
}

impl SuccessResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
    }
  }
}
