//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rollcall_core::{
  roster::{NewParticipant, Participant, Phone},
  store::{InsertOutcome, RosterStore},
};

use crate::{
  Result,
  encode::{RawParticipant, encode_dt, encode_response, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and all
/// database work is serialized on its dedicated worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) the store file at `path`, installing the schema if
  /// it is not already present.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a fresh in-memory store; the test suites run against this.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawParticipant> {
  Ok(RawParticipant {
    participant_id: row.get(0)?,
    name:           row.get(1)?,
    phone:          row.get(2)?,
    response:       row.get(3)?,
    responded_at:   row.get(4)?,
  })
}

/// Column values for one row, encoded for binding.
fn encode_row(
  p: &Participant,
) -> (String, String, String, Option<String>, Option<String>) {
  let (response, responded_at) = match &p.response {
    Some(r) => (
      Some(encode_response(r.value).to_owned()),
      Some(encode_dt(r.recorded_at)),
    ),
    None => (None, None),
  };
  (
    encode_uuid(p.id),
    p.name.clone(),
    p.phone.as_str().to_owned(),
    response,
    responded_at,
  )
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  async fn find(&self, id: Uuid) -> Result<Option<Participant>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT participant_id, name, phone, response, responded_at
               FROM participants WHERE participant_id = ?1",
              rusqlite::params![id_str],
              read_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn find_by_phone(&self, phone: Phone) -> Result<Option<Participant>> {
    let phone_str = phone.as_str().to_owned();

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT participant_id, name, phone, response, responded_at
               FROM participants WHERE phone = ?1",
              rusqlite::params![phone_str],
              read_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn insert(&self, new: NewParticipant) -> Result<InsertOutcome> {
    let participant = Participant {
      id:       Uuid::new_v4(),
      name:     new.name,
      phone:    new.phone,
      response: None,
    };
    let id_str = encode_uuid(participant.id);
    let name = participant.name.clone();
    let phone_str = participant.phone.as_str().to_owned();

    let taken: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        // Check-then-insert is atomic here: every call for this connection
        // runs serialized on its worker thread. The UNIQUE constraint
        // backstops it regardless.
        let existing = conn
          .query_row(
            "SELECT participant_id, name, phone, response, responded_at
             FROM participants WHERE phone = ?1",
            rusqlite::params![phone_str],
            read_raw,
          )
          .optional()?;
        if let Some(raw) = existing {
          return Ok(Some(raw));
        }

        conn.execute(
          "INSERT INTO participants (participant_id, name, phone, response, responded_at)
           VALUES (?1, ?2, ?3, NULL, NULL)",
          rusqlite::params![id_str, name, phone_str],
        )?;
        Ok(None)
      })
      .await?;

    match taken {
      Some(raw) => Ok(InsertOutcome::PhoneTaken {
        existing: raw.into_participant()?,
      }),
      None => Ok(InsertOutcome::Created(participant)),
    }
  }

  async fn update(&self, participant: &Participant) -> Result<Option<Participant>> {
    let (id_str, name, phone, response, responded_at) = encode_row(participant);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE participants
           SET name = ?2, phone = ?3, response = ?4, responded_at = ?5
           WHERE participant_id = ?1",
          rusqlite::params![id_str, name, phone, response, responded_at],
        )?)
      })
      .await?;

    Ok((changed > 0).then(|| participant.clone()))
  }

  async fn delete(&self, id: Uuid) -> Result<Option<Participant>> {
    let id_str = encode_uuid(id);

    let removed: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            "SELECT participant_id, name, phone, response, responded_at
             FROM participants WHERE participant_id = ?1",
            rusqlite::params![id_str],
            read_raw,
          )
          .optional()?;
        if raw.is_some() {
          conn.execute(
            "DELETE FROM participants WHERE participant_id = ?1",
            rusqlite::params![id_str],
          )?;
        }
        Ok(raw)
      })
      .await?;

    removed.map(RawParticipant::into_participant).transpose()
  }

  async fn list(&self) -> Result<Vec<Participant>> {
    let raws: Vec<RawParticipant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT participant_id, name, phone, response, responded_at
           FROM participants ORDER BY name COLLATE NOCASE, participant_id",
        )?;
        let rows = stmt
          .query_map([], read_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawParticipant::into_participant)
      .collect()
  }

  async fn update_all<F>(&self, transform: F) -> Result<usize>
  where
    F: Fn(&mut Participant) + Send + 'static,
  {
    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raws: Vec<RawParticipant> = {
          let mut stmt = tx.prepare(
            "SELECT participant_id, name, phone, response, responded_at
             FROM participants",
          )?;
          stmt
            .query_map([], read_raw)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut written = 0;
        for raw in raws {
          let mut participant = raw
            .into_participant()
            .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
          transform(&mut participant);

          let (id_str, name, phone, response, responded_at) =
            encode_row(&participant);
          written += tx.execute(
            "UPDATE participants
             SET name = ?2, phone = ?3, response = ?4, responded_at = ?5
             WHERE participant_id = ?1",
            rusqlite::params![id_str, name, phone, response, responded_at],
          )?;
        }

        // Dropping the transaction without this rolls the sweep back, so a
        // failure partway through leaves no partial state.
        tx.commit()?;
        Ok(written)
      })
      .await?;

    Ok(written)
  }
}
