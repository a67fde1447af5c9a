//! The [`RosterStore`] trait.
//!
//! Implemented by storage backends (see `rollcall-store-sqlite`); the gate,
//! the admin override, and the scheduler depend only on this abstraction.
//!
//! Absence is a value here (`Option`, [`InsertOutcome`]) rather than a
//! backend error, so generic callers can branch on it without downcasting
//! `Self::Error`. The associated error type is reserved for genuine backend
//! failures.

use std::future::Future;

use uuid::Uuid;

use crate::roster::{NewParticipant, Participant, Phone};

/// Result of [`RosterStore::insert`].
///
/// A duplicate phone is a first-class outcome, not an error; it carries the
/// record already holding the number so callers can offer it to the user
/// instead of a bare rejection.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
  Created(Participant),
  PhoneTaken { existing: Participant },
}

/// Durable roster storage, keyed by participant id with the phone number as
/// a unique secondary key.
///
/// Each method is atomic with respect to the others. `update_all` is
/// all-or-nothing: a failure partway through must leave no partial sweep
/// visible.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a participant by id. `None` if the id is unknown.
  fn find(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + '_;

  /// Retrieve a participant by phone number. `None` if no record holds it.
  fn find_by_phone(
    &self,
    phone: Phone,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + '_;

  /// Create a participant with a store-assigned id and no response. A phone
  /// already on the roster yields [`InsertOutcome::PhoneTaken`] and mutates
  /// nothing.
  fn insert(
    &self,
    new: NewParticipant,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// Persist `participant` over the stored record with the same id,
  /// returning the stored state, or `None` if the id is unknown.
  fn update<'a>(
    &'a self,
    participant: &'a Participant,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + 'a;

  /// Remove a participant, returning the removed record, or `None` if the
  /// id is unknown.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + '_;

  /// Every participant, ordered by name for stable display.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Participant>, Self::Error>> + Send + '_;

  /// Apply `transform` to every record as one bulk write and return the
  /// number of records written.
  fn update_all<F>(
    &self,
    transform: F,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_
  where
    F: Fn(&mut Participant) + Send + 'static;
}
