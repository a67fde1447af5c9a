//! Privileged roster mutations that bypass the cooldown gate.
//!
//! Every operation takes the caller's administrator status as a plain
//! boolean; establishing that status (credentials, sessions) is the
//! transport layer's job. The gate's cooldown is never consulted here.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  roster::{Participant, Response},
  store::RosterStore,
};

pub struct AdminOverride<S> {
  store: Arc<S>,
}

impl<S: RosterStore> AdminOverride<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Clear one participant's standing response, cooldown or not.
  /// Idempotent: resetting an already-clear record succeeds.
  pub async fn reset_one(&self, is_admin: bool, id: Uuid) -> Result<Participant> {
    authorize(is_admin)?;

    let mut participant = self
      .store
      .find(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))?;

    participant.clear_response();
    self
      .store
      .update(&participant)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  /// Clear every participant's response in one bulk write; returns the
  /// number of records written. The daily scheduler runs this same sweep.
  pub async fn reset_all(&self, is_admin: bool) -> Result<usize> {
    authorize(is_admin)?;
    self
      .store
      .update_all(|p| p.clear_response())
      .await
      .map_err(Error::store)
  }

  /// Force-set every participant to `value`, all stamped with one shared
  /// timestamp captured at the start of the operation.
  pub async fn set_all_to(&self, is_admin: bool, value: Response) -> Result<usize> {
    authorize(is_admin)?;
    let now = Utc::now();
    self
      .store
      .update_all(move |p| p.record_response(value, now))
      .await
      .map_err(Error::store)
  }
}

fn authorize(is_admin: bool) -> Result<()> {
  if is_admin { Ok(()) } else { Err(Error::Unauthorized) }
}
