//! # sync-types
//!
//! Shared vocabulary for AppFactory sync coordination.
//!
//! This crate provides the types used across all sync crates:
//! - [`SyncScope`], [`SyncFilter`] - What gets synchronized
//! - [`SyncState`], [`SyncResult`] - Observable status and outcomes
//! - [`SyncError`] - Error type returned by engines
//! - [`wire`] - Request/response contract for the remote coordination endpoint

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod scope;
mod state;
pub mod wire;

pub use error::{SyncError, OFFLINE_MESSAGE};
pub use scope::{SyncFilter, SyncScope, ALL_ENTITY_TYPE};
pub use state::{SyncResult, SyncState};
pub use wire::TriggerResponse;
