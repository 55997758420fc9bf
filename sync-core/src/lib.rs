//! # sync-core
//!
//! Pure logic for AppFactory sync (no I/O, instant tests).
//!
//! This crate holds the bookkeeping behind offline batching: which scopes
//! are waiting for connectivity, and which scopes a flush covers once it
//! returns.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. Locking, connectivity checks and state publication
//! are performed by `sync-client`, which drives these types under its own
//! mutation lock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pending;

pub use pending::{FlushBatch, PendingScopes};
