//! Handlers for administrator override endpoints.
//!
//! | Method | Path                | Notes                  |
//! |--------|---------------------|------------------------|
//! | `POST` | `/admin/reset/{id}` | Clear one response     |
//! | `POST` | `/admin/reset-all`  | Clear every response   |
//! | `POST` | `/admin/set-all`    | Body `{"value"}`       |
//! | `GET`  | `/admin/summary`    | Roster plus in-count   |
//!
//! The claim is passed through to the override operations, which reject
//! non-administrators; the cooldown gate is bypassed entirely.

use axum::{
  Json,
  extract::{Path, State},
};
use rollcall_core::{
  roster::{Participant, Response},
  store::RosterStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, auth::AdminClaim, error::ApiError};

/// `POST /admin/reset/{id}`
pub async fn reset_one<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
  Path(id): Path<Uuid>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let cleared = state.admin.reset_one(claim.is_admin, id).await?;
  Ok(Json(cleared))
}

/// `POST /admin/reset-all`
pub async fn reset_all<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let cleared = state.admin.reset_all(claim.is_admin).await?;
  Ok(Json(json!({ "cleared": cleared })))
}

#[derive(Debug, Deserialize)]
pub struct SetAllBody {
  pub value: String,
}

/// `POST /admin/set-all` — body: `{"value":"not_in"}`
pub async fn set_all<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
  Json(body): Json<SetAllBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let value: Response = body.value.parse()?;
  let written = state.admin.set_all_to(claim.is_admin, value).await?;
  Ok(Json(json!({ "written": written, "value": value })))
}

/// `GET /admin/summary` — the full roster together with how many standing
/// responses are `"in"`.
pub async fn summary<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  if !claim.is_admin {
    return Err(ApiError::Unauthorized);
  }

  let roster = state
    .store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let in_count = roster
    .iter()
    .filter(|p| p.response.is_some_and(|r| r.value == Response::In))
    .count();

  Ok(Json(json!({
    "participants": roster,
    "in_count": in_count,
  })))
}
