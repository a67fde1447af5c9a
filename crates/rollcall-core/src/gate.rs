//! The response gate, which admits or rejects participant submissions.
//!
//! A participant may submit again only once [`COOLDOWN`] has passed since
//! their standing response was accepted. The check-then-write for a record
//! runs under a per-record async lock, so two racing submissions for the
//! same participant can never both commit inside one window; submissions
//! for different participants never contend.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

pub use crate::roster::COOLDOWN;
use crate::{
  Error, Result,
  roster::{Participant, Phone, RecordedResponse, Response},
  store::RosterStore,
};

/// Decides eligibility and commits accepted responses.
///
/// Holds no record state of its own; every decision re-reads the store
/// immediately before acting.
pub struct ResponseGate<S> {
  store: Arc<S>,
  /// One lock per participant, created on first use. Entries live for the
  /// process lifetime; the map is bounded by roster size.
  locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<S: RosterStore> ResponseGate<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      locks: Mutex::new(HashMap::new()),
    }
  }

  /// Submit `value` for the participant with `id`, timestamped now.
  pub async fn submit(&self, id: Uuid, value: Response) -> Result<Participant> {
    self.submit_at(id, value, Utc::now()).await
  }

  /// Submit `value` for the participant holding `phone`, timestamped now.
  pub async fn submit_by_phone(
    &self,
    phone: Phone,
    value: Response,
  ) -> Result<Participant> {
    let found = self
      .store
      .find_by_phone(phone.clone())
      .await
      .map_err(Error::store)?;
    match found {
      Some(participant) => self.submit(participant.id, value).await,
      None => Err(Error::PhoneNotFound(phone)),
    }
  }

  /// Submit with an explicit clock. Split out from [`ResponseGate::submit`]
  /// so the cooldown window is testable without waiting on real time.
  pub async fn submit_at(
    &self,
    id: Uuid,
    value: Response,
    now: DateTime<Utc>,
  ) -> Result<Participant> {
    let lock = self.record_lock(id).await;
    let _held = lock.lock().await;

    // Re-read under the lock; the standing response may have changed while
    // we waited.
    let mut participant = self
      .store
      .find(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))?;

    if let Some(current) = participant.response
      && current.in_cooldown(now)
    {
      return Err(Error::CooldownActive {
        current,
        eligible_at: current.eligible_at(),
      });
    }

    participant.record_response(value, now);
    self
      .store
      .update(&participant)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  /// The standing response for `id`; `Ok(None)` when nothing is recorded.
  pub async fn response_of(&self, id: Uuid) -> Result<Option<RecordedResponse>> {
    let participant = self
      .store
      .find(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))?;
    Ok(participant.response)
  }

  /// The lock serializing submissions for one participant. The outer map
  /// lock is held only long enough to clone the entry out.
  async fn record_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
    let mut locks = self.locks.lock().await;
    locks.entry(id).or_default().clone()
  }
}
