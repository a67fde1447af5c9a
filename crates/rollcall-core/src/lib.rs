//! Core domain types and logic for the rollcall attendance roster.
//!
//! Everything transport- and storage-agnostic lives here: the participant
//! model, the [`store::RosterStore`] contract that backends implement, the
//! cooldown-enforcing [`gate::ResponseGate`], the privileged
//! [`admin::AdminOverride`], and the daily [`scheduler::ResetScheduler`].
//! The only runtime dependency is tokio, for the sync and timer primitives
//! the gate and scheduler are built on.

pub mod admin;
pub mod error;
pub mod gate;
pub mod roster;
pub mod scheduler;
pub mod store;

pub use error::{Error, Result};
