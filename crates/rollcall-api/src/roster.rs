//! Handlers for roster membership endpoints.
//!
//! | Method   | Path                 | Notes                            |
//! |----------|----------------------|----------------------------------|
//! | `GET`    | `/participants`      | Whole roster, ordered by name    |
//! | `POST`   | `/participants`      | Admin; body `{"name","phone"}`   |
//! | `GET`    | `/participants/{id}` | 404 if not found                 |
//! | `DELETE` | `/participants/{id}` | Admin                            |
//! | `POST`   | `/login`             | Body `{"phone"}`                 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollcall_core::{
  roster::{NewParticipant, Participant, Phone},
  store::{InsertOutcome, RosterStore},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, auth::AdminClaim, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /participants`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Participant>>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let roster = state
    .store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(roster))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:  String,
  pub phone: String,
}

/// `POST /participants` — body: `{"name":"Asha","phone":"9000000001"}`
///
/// A phone already on the roster is a 409 whose body carries the record
/// holding it, so the caller can point the user at the existing entry.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
  Json(body): Json<CreateBody>,
) -> Result<Response, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  if !claim.is_admin {
    return Err(ApiError::Unauthorized);
  }

  let name = body.name.trim().to_owned();
  if name.is_empty() {
    return Err(ApiError::BadRequest("name must not be empty".to_string()));
  }
  let phone = Phone::parse(&body.phone)?;

  let outcome = state
    .store
    .insert(NewParticipant { name, phone })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match outcome {
    InsertOutcome::Created(p) => Ok((StatusCode::CREATED, Json(p)).into_response()),
    InsertOutcome::PhoneTaken { existing } => Ok(
      (
        StatusCode::CONFLICT,
        Json(json!({
          "error": format!("phone {} is already on the roster", existing.phone),
          "existing": existing,
        })),
      )
        .into_response(),
    ),
  }
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /participants/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let participant = state
    .store
    .find(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("participant {id} not found")))?;
  Ok(Json(participant))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /participants/{id}`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  claim: AdminClaim,
  Path(id): Path<Uuid>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  if !claim.is_admin {
    return Err(ApiError::Unauthorized);
  }

  let removed = state
    .store
    .delete(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("participant {id} not found")))?;
  Ok(Json(removed))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub phone: String,
}

/// `POST /login` — body: `{"phone":"9000000001"}`
///
/// Identifies the participant holding `phone`. No session is created; the
/// phone number is an identifier, not a secret.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<Participant>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  let phone = Phone::parse(&body.phone)?;
  let participant = state
    .store
    .find_by_phone(phone.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no participant with phone {phone}"))
    })?;
  Ok(Json(participant))
}
