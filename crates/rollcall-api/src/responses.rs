//! Handlers for response submission and reads.
//!
//! | Method | Path                          | Notes                          |
//! |--------|-------------------------------|--------------------------------|
//! | `POST` | `/participants/{id}/response` | Body `{"value"}`; gate-checked |
//! | `GET`  | `/participants/{id}/response` | Standing response, or null     |
//! | `POST` | `/responses`                  | Body `{"phone","value"}`       |
//!
//! Submissions go through the gate, never straight to the store: a 409 with
//! the standing response means the 24-hour window has not elapsed.

use axum::{
  Json,
  extract::{Path, State},
};
use rollcall_core::{
  roster::{Participant, Phone, Response},
  store::RosterStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Submit ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub value: String,
}

/// `POST /participants/{id}/response` — body: `{"value":"in"}`
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SubmitBody>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let value: Response = body.value.parse()?;
  let updated = state.gate.submit(id, value).await?;
  Ok(Json(updated))
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /participants/{id}/response`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let standing = state.gate.response_of(id).await?;
  Ok(Json(json!({ "response": standing })))
}

// ─── Submit by phone ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PhoneSubmitBody {
  pub phone: String,
  pub value: String,
}

/// `POST /responses` — body: `{"phone":"9000000001","value":"not_in"}`
pub async fn submit_by_phone<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PhoneSubmitBody>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let phone = Phone::parse(&body.phone)?;
  let value: Response = body.value.parse()?;
  let updated = state.gate.submit_by_phone(phone, value).await?;
  Ok(Json(updated))
}
