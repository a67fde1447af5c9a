//! The daily roster reset, a self-rearming background task.
//!
//! Once per calendar day, at the configured local wall-clock time, the
//! scheduler clears every standing response. After each fire (and after any
//! failure) it recomputes the next occurrence from the wall clock and goes
//! back to sleep, so the fire time stays pinned to local time across DST
//! shifts and clock adjustments. Fires missed while the process was down
//! are not caught up on restart.

use std::sync::Arc;

use chrono::{DateTime, Local, LocalResult, NaiveTime, TimeDelta, TimeZone};
use tokio::task::JoinHandle;

use crate::store::RosterStore;

/// The process-wide daily reset task.
///
/// Construct one at startup and hand it to [`ResetScheduler::spawn`]; spawn
/// consumes the scheduler, so an instance cannot run twice.
pub struct ResetScheduler<S> {
  store:    Arc<S>,
  reset_at: NaiveTime,
}

impl<S> ResetScheduler<S>
where
  S: RosterStore + 'static,
{
  pub fn new(store: Arc<S>, reset_at: NaiveTime) -> Self {
    Self { store, reset_at }
  }

  /// Run the reset loop in the background for the rest of the process
  /// lifetime.
  pub fn spawn(self) -> JoinHandle<()> { tokio::spawn(self.run()) }

  async fn run(self) {
    loop {
      let next = next_occurrence(&Local::now(), self.reset_at);
      tracing::info!(fire_at = %next, "roster reset armed");
      wait_until(next).await;
      self.fire().await;
    }
  }

  /// One clear attempt. A failure is logged and swallowed so the loop
  /// re-arms for tomorrow regardless.
  pub async fn fire(&self) {
    match self.store.update_all(|p| p.clear_response()).await {
      Ok(cleared) => tracing::info!(cleared, "daily roster reset complete"),
      Err(error) => {
        tracing::error!(%error, "daily roster reset failed, rearming");
      }
    }
  }
}

/// Sleep until the wall clock reaches `target`.
///
/// `tokio::time::sleep` tracks monotonic time, which the wall clock can
/// fall behind (suspend, NTP steps), so re-check on wake and sleep again
/// for any remainder.
async fn wait_until(target: DateTime<Local>) {
  loop {
    let now = Local::now();
    if now >= target {
      return;
    }
    match (target - now).to_std() {
      Ok(remaining) => tokio::time::sleep(remaining).await,
      Err(_) => return,
    }
  }
}

/// The next instant strictly after `after` at which the wall clock in
/// `after`'s timezone reads `at`.
///
/// Starting exactly at `at` arms for tomorrow, never for "now". An
/// ambiguous local time (clocks rolled back across it) resolves to its
/// earliest instant still in the future; a nonexistent one (clocks rolled
/// forward across it) rolls to the next day on which it exists.
pub fn next_occurrence<Tz: TimeZone>(
  after: &DateTime<Tz>,
  at: NaiveTime,
) -> DateTime<Tz> {
  let tz = after.timezone();
  let mut date = after.date_naive();

  // A few days forward is enough to clear any DST gap or ambiguity.
  for _ in 0..4 {
    let candidate = match tz.from_local_datetime(&date.and_time(at)) {
      LocalResult::Single(dt) => Some(dt),
      LocalResult::Ambiguous(earliest, latest) => {
        if earliest > *after {
          Some(earliest)
        } else {
          Some(latest)
        }
      }
      LocalResult::None => None,
    };
    if let Some(dt) = candidate
      && dt > *after
    {
      return dt;
    }
    match date.succ_opt() {
      Some(next) => date = next,
      None => break,
    }
  }

  // Unreachable for real timezones; fall back to a plain 24-hour arm
  // rather than panicking inside the reset loop.
  after.clone() + TimeDelta::days(1)
}
