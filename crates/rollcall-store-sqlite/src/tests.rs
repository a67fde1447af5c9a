//! Round-trip and integration tests against an in-memory SQLite store.

use std::sync::Arc;

use chrono::{NaiveTime, TimeDelta, TimeZone, Utc};
use rollcall_core::{
  Error as CoreError,
  gate::ResponseGate,
  roster::{NewParticipant, Participant, Phone, Response},
  scheduler::ResetScheduler,
  store::{InsertOutcome, RosterStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.unwrap()
}

async fn add(store: &SqliteStore, name: &str, phone: &str) -> Participant {
  let outcome = store
    .insert(NewParticipant {
      name:  name.to_owned(),
      phone: Phone::parse(phone).unwrap(),
    })
    .await
    .unwrap();
  match outcome {
    InsertOutcome::Created(p) => p,
    InsertOutcome::PhoneTaken { .. } => panic!("fixture phone collision"),
  }
}

// ─── Participants ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_starts_without_response() {
  let store = store().await;
  let p = add(&store, "Asha", "9000000001").await;

  assert!(p.response.is_none());
  let found = store.find(p.id).await.unwrap().unwrap();
  assert_eq!(found.id, p.id);
  assert_eq!(found.name, "Asha");
  assert_eq!(found.phone.as_str(), "9000000001");
  assert!(found.response.is_none());
}

#[tokio::test]
async fn insert_reports_the_record_holding_a_taken_phone() {
  let store = store().await;
  let first = add(&store, "Asha", "9000000001").await;

  let outcome = store
    .insert(NewParticipant {
      name:  "Newcomer".to_owned(),
      phone: Phone::parse("9000000001").unwrap(),
    })
    .await
    .unwrap();

  match outcome {
    InsertOutcome::PhoneTaken { existing } => {
      assert_eq!(existing.id, first.id);
      assert_eq!(existing.name, "Asha");
    }
    InsertOutcome::Created(_) => panic!("duplicate phone accepted"),
  }
  assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn lookups_return_none_for_unknown_keys() {
  let store = store().await;
  add(&store, "Asha", "9000000001").await;

  assert!(store.find(Uuid::new_v4()).await.unwrap().is_none());
  assert!(
    store
      .find_by_phone(Phone::parse("1234567890").unwrap())
      .await
      .unwrap()
      .is_none()
  );

  let hit = store
    .find_by_phone(Phone::parse("9000000001").unwrap())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(hit.name, "Asha");
}

#[tokio::test]
async fn update_persists_and_clears_the_response_pair() {
  let store = store().await;
  let mut p = add(&store, "Asha", "9000000001").await;
  let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();

  p.record_response(Response::In, at);
  store.update(&p).await.unwrap().unwrap();

  let stored = store.find(p.id).await.unwrap().unwrap().response.unwrap();
  assert_eq!(stored.value, Response::In);
  assert_eq!(stored.recorded_at, at);

  p.clear_response();
  store.update(&p).await.unwrap().unwrap();
  assert!(store.find(p.id).await.unwrap().unwrap().response.is_none());
}

#[tokio::test]
async fn update_of_unknown_id_writes_nothing() {
  let store = store().await;
  let ghost = Participant {
    id:       Uuid::new_v4(),
    name:     "Ghost".to_owned(),
    phone:    Phone::parse("9999999999").unwrap(),
    response: None,
  };

  assert!(store.update(&ghost).await.unwrap().is_none());
  assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_returns_the_removed_record_once() {
  let store = store().await;
  let p = add(&store, "Asha", "9000000001").await;

  let removed = store.delete(p.id).await.unwrap().unwrap();
  assert_eq!(removed.id, p.id);
  assert!(store.find(p.id).await.unwrap().is_none());
  assert!(store.delete(p.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_orders_by_name_case_insensitively() {
  let store = store().await;
  add(&store, "charlie", "9000000003").await;
  add(&store, "Alice", "9000000001").await;
  add(&store, "bob", "9000000002").await;

  let names: Vec<String> = store
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, ["Alice", "bob", "charlie"]);
}

#[tokio::test]
async fn update_all_sweeps_every_row() {
  let store = store().await;
  add(&store, "Asha", "9000000001").await;
  add(&store, "Bram", "9000000002").await;
  add(&store, "Cleo", "9000000003").await;

  let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
  let written = store
    .update_all(move |p| p.record_response(Response::NotIn, at))
    .await
    .unwrap();
  assert_eq!(written, 3);
  for p in store.list().await.unwrap() {
    let recorded = p.response.unwrap();
    assert_eq!(recorded.value, Response::NotIn);
    assert_eq!(recorded.recorded_at, at);
  }

  let written = store.update_all(|p| p.clear_response()).await.unwrap();
  assert_eq!(written, 3);
  for p in store.list().await.unwrap() {
    assert!(p.response.is_none());
  }
}

// ─── Gate and scheduler on the real backend ──────────────────────────────────

#[tokio::test]
async fn gate_enforces_cooldown_against_the_real_backend() {
  let store = Arc::new(store().await);
  let p = add(&store, "Asha", "9000000001").await;
  let gate = ResponseGate::new(store.clone());
  let t0 = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();

  gate.submit_at(p.id, Response::In, t0).await.unwrap();
  let err = gate
    .submit_at(p.id, Response::NotIn, t0 + TimeDelta::hours(23))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::CooldownActive { .. }));

  gate
    .submit_at(p.id, Response::NotIn, t0 + TimeDelta::hours(24))
    .await
    .unwrap();
  let stored = store.find(p.id).await.unwrap().unwrap().response.unwrap();
  assert_eq!(stored.value, Response::NotIn);
}

#[tokio::test]
async fn scheduled_fire_clears_the_roster() {
  let store = Arc::new(store().await);
  let p = add(&store, "Asha", "9000000001").await;
  let gate = ResponseGate::new(store.clone());
  gate.submit(p.id, Response::In).await.unwrap();

  let scheduler = ResetScheduler::new(
    store.clone(),
    NaiveTime::from_hms_opt(22, 1, 20).unwrap(),
  );
  scheduler.fire().await;

  assert!(store.find(p.id).await.unwrap().unwrap().response.is_none());
}
