//! SQL schema for the roster SQLite store.
//!
//! Applied on every open; the DDL is idempotent. `PRAGMA user_version`
//! records the installed revision so future migrations can gate on it.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS participants (
    participant_id TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    phone          TEXT NOT NULL UNIQUE,  -- exactly 10 digits, app-validated
    response       TEXT,                  -- 'in' | 'not_in'
    responded_at   TEXT,                  -- RFC 3339 UTC; server-assigned

    -- A response and its timestamp are recorded and cleared together.
    CHECK ((response IS NULL) = (responded_at IS NULL))
);

CREATE INDEX IF NOT EXISTS participants_name_idx
    ON participants(name COLLATE NOCASE);

PRAGMA user_version = 1;
";
