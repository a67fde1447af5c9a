//! The roster data model.
//!
//! A participant's standing answer and the moment it was accepted travel
//! together as one [`RecordedResponse`] inside an `Option`, so neither field
//! can exist without the other.

use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// How long a participant must wait after an accepted submission before the
/// gate admits another one.
pub const COOLDOWN: TimeDelta = TimeDelta::hours(24);

// ─── Phone ───────────────────────────────────────────────────────────────────

/// A participant's phone number: exactly 10 ASCII digits.
///
/// The phone is the roster's secondary unique key and the login identifier
/// participants use. Construction goes through [`Phone::parse`], so a held
/// `Phone` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
  /// Validate and normalize `input`. Surrounding whitespace is trimmed;
  /// anything other than exactly 10 digits is rejected.
  pub fn parse(input: &str) -> Result<Self> {
    let trimmed = input.trim();
    if trimmed.len() == 10 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(trimmed.to_owned()))
    } else {
      Err(Error::InvalidPhone(input.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Phone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Phone {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl<'de> Deserialize<'de> for Phone {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    Phone::parse(&raw).map_err(serde::de::Error::custom)
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// The two answers a participant can give for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
  In,
  NotIn,
}

impl Response {
  /// The wire spelling, as stored and served.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::In => "in",
      Self::NotIn => "not_in",
    }
  }
}

impl fmt::Display for Response {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Response {
  type Err = Error;

  /// Accepts the wire spellings `"in"` and `"not_in"`, case-insensitively.
  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "in" => Ok(Self::In),
      "not_in" => Ok(Self::NotIn),
      _ => Err(Error::InvalidValue(s.to_owned())),
    }
  }
}

// ─── RecordedResponse ────────────────────────────────────────────────────────

/// A response together with the instant the gate accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResponse {
  pub value:       Response,
  pub recorded_at: DateTime<Utc>,
}

impl RecordedResponse {
  /// The earliest instant at which a new submission will be accepted.
  pub fn eligible_at(&self) -> DateTime<Utc> { self.recorded_at + COOLDOWN }

  /// True while a fresh submission would still be rejected.
  ///
  /// A `now` *before* `recorded_at` also counts as inside the window, so a
  /// rolled-back clock can never move a standing timestamp backwards.
  pub fn in_cooldown(&self, now: DateTime<Utc>) -> bool {
    now < self.eligible_at()
  }
}

// ─── Participant ─────────────────────────────────────────────────────────────

/// One member of the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
  pub id:       Uuid,
  pub name:     String,
  pub phone:    Phone,
  /// The standing response, or `None` when nothing is recorded for the
  /// current cycle.
  pub response: Option<RecordedResponse>,
}

impl Participant {
  /// Record `value` as accepted at `at`, replacing any standing response.
  pub fn record_response(&mut self, value: Response, at: DateTime<Utc>) {
    self.response = Some(RecordedResponse {
      value,
      recorded_at: at,
    });
  }

  /// Return to the "nothing recorded" state.
  pub fn clear_response(&mut self) { self.response = None; }
}

/// Input for creating a participant. The id is assigned by the store, never
/// accepted from callers.
#[derive(Debug, Clone)]
pub struct NewParticipant {
  pub name:  String,
  pub phone: Phone,
}
