// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite warehouse backend for the Vigil security analytics assistant.
//!
//! Provides the security views the fallback catalog queries, created by
//! embedded migrations and optionally seeded with demo rows, a
//! [`QueryBackend`](vigil_core::QueryBackend) that runs read-only SQL over a
//! `tokio-rusqlite` connection, and a TTL cache decorator for any backend.

pub mod backend;
pub mod cache;
pub mod database;
pub mod migrations;

pub use backend::SqliteBackend;
pub use cache::CachedBackend;
pub use database::Database;
