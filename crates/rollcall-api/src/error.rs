//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rollcall_core::roster::RecordedResponse;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized")]
  Unauthorized,

  /// The gate refused a submission; the body carries the standing response
  /// so clients can display it without a second request.
  #[error("a response is already recorded; the next one is accepted at {eligible_at}")]
  CooldownActive {
    current:     RecordedResponse,
    eligible_at: DateTime<Utc>,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => error_body(StatusCode::NOT_FOUND, &m),
      ApiError::BadRequest(m) => error_body(StatusCode::BAD_REQUEST, &m),
      ApiError::Unauthorized => {
        let mut res = error_body(StatusCode::UNAUTHORIZED, "unauthorized");
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"rollcall\""),
        );
        res
      }
      ApiError::CooldownActive {
        current,
        eligible_at,
      } => (
        StatusCode::CONFLICT,
        Json(json!({
          "error": format!(
            "a response is already recorded; the next one is accepted at {eligible_at}"
          ),
          "current": current,
          "eligible_at": eligible_at,
        })),
      )
        .into_response(),
      ApiError::Store(e) => {
        error_body(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
      }
    }
  }
}

fn error_body(status: StatusCode, message: &str) -> Response {
  (status, Json(json!({ "error": message }))).into_response()
}

impl From<rollcall_core::Error> for ApiError {
  fn from(e: rollcall_core::Error) -> Self {
    use rollcall_core::Error as Core;
    match e {
      Core::NotFound(id) => Self::NotFound(format!("participant {id} not found")),
      Core::PhoneNotFound(phone) => {
        Self::NotFound(format!("no participant with phone {phone}"))
      }
      Core::CooldownActive {
        current,
        eligible_at,
      } => Self::CooldownActive {
        current,
        eligible_at,
      },
      Core::InvalidValue(_) | Core::InvalidPhone(_) => {
        Self::BadRequest(e.to_string())
      }
      Core::Unauthorized => Self::Unauthorized,
      Core::Store(e) => Self::Store(e),
    }
  }
}
