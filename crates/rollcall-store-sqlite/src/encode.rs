//! Encoding and decoding helpers between the roster domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, responses by their wire spelling.

use chrono::{DateTime, Utc};
use rollcall_core::roster::{Participant, Phone, RecordedResponse, Response};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── Response ────────────────────────────────────────────────────────────────

pub fn encode_response(r: Response) -> &'static str { r.as_str() }

/// Strict decode of the canonical stored spellings. Unlike the parser on
/// [`Response`], anything nonstandard here means a corrupt row.
pub fn decode_response(s: &str) -> Result<Response> {
  match s {
    "in" => Ok(Response::In),
    "not_in" => Ok(Response::NotIn),
    other => Err(Error::Decode(format!("unknown response: {other:?}"))),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `participants` row.
pub struct RawParticipant {
  pub participant_id: String,
  pub name:           String,
  pub phone:          String,
  pub response:       Option<String>,
  pub responded_at:   Option<String>,
}

impl RawParticipant {
  pub fn into_participant(self) -> Result<Participant> {
    let response = match (self.response, self.responded_at) {
      (Some(value), Some(at)) => Some(RecordedResponse {
        value:       decode_response(&value)?,
        recorded_at: decode_dt(&at)?,
      }),
      (None, None) => None,
      _ => {
        return Err(Error::Decode(format!(
          "row {} has a response without a timestamp (or the reverse)",
          self.participant_id
        )));
      }
    };

    Ok(Participant {
      id:    decode_uuid(&self.participant_id)?,
      name:  self.name,
      phone: Phone::parse(&self.phone)?,
      response,
    })
  }
}
