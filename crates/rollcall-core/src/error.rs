//! Error types for `rollcall-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::roster::{Phone, RecordedResponse};

/// The error type for roster operations.
#[derive(Debug, Error)]
pub enum Error {
  #[error("participant not found: {0}")]
  NotFound(Uuid),

  #[error("no participant with phone {0}")]
  PhoneNotFound(Phone),

  /// The gate rejected a submission because the standing response is still
  /// inside its cooldown window. Carries the standing response and the
  /// instant the window ends, so callers can show both without a second
  /// read.
  #[error("a response is already recorded; the next one is accepted at {eligible_at}")]
  CooldownActive {
    current:     RecordedResponse,
    eligible_at: DateTime<Utc>,
  },

  #[error("invalid response value: {0:?}")]
  InvalidValue(String),

  #[error("invalid phone number (expected exactly 10 digits): {0:?}")]
  InvalidPhone(String),

  #[error("caller is not an administrator")]
  Unauthorized,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(error))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
