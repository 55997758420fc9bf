//! # sync-backend
//!
//! Remote coordination endpoint for AppFactory sync.
//!
//! This crate serves the sync wire contract over HTTP so thin clients can
//! delegate sync to a shared process:
//! - Runs sync attempts on an engine it owns
//! - Reports per-scope state to pollers
//! - Exposes a health endpoint with the offline queue depth
//!
//! ## Architecture
//!
//! ```text
//! RemoteEngine ──┐                       ┌── RemoteEngine
//!   (client A)   │   POST /sync/trigger  │     (client B)
//!                ├──────────────────────►│
//!                │   GET  /sync/state    │
//!            ┌───┴───────────────────────┴───┐
//!            │         sync-backend          │
//!            │  ┌─────────────────────────┐  │
//!            │  │ EmbeddedEngine (queue)  │  │
//!            │  └─────────────────────────┘  │
//!            └───────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod server;
