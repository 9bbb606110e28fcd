// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warehouse connection management with PRAGMA setup, migrations, and seeding.
//!
//! All statements run on tokio-rusqlite's single background thread.

use std::path::Path;

use tracing::debug;
use vigil_core::VigilError;

use crate::migrations;

/// An open, migrated warehouse database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the warehouse at `path`, migrate it, and
    /// optionally seed demo rows.
    pub async fn open(path: &str, seed_demo_data: bool) -> Result<Self, VigilError> {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| VigilError::Storage {
                    source: Box::new(e),
                })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| VigilError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(true, seed_demo_data).await?;
        debug!(path, seed_demo_data, "warehouse opened");
        Ok(db)
    }

    /// Open a private in-memory warehouse. Used by tests and `doctor` dry runs.
    pub async fn open_in_memory(seed_demo_data: bool) -> Result<Self, VigilError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| VigilError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false, seed_demo_data).await?;
        Ok(db)
    }

    async fn prepare(&self, wal: bool, seed_demo_data: bool) -> Result<(), VigilError> {
        self.conn
            .call(move |conn| -> Result<(), VigilError> {
                let pragmas = if wal {
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;"
                } else {
                    "PRAGMA foreign_keys = ON;"
                };
                conn.execute_batch(pragmas).map_err(|e| VigilError::Storage {
                    source: Box::new(e),
                })?;
                migrations::run_migrations(conn)?;
                if seed_demo_data {
                    migrations::seed_demo_data(conn)?;
                }
                Ok(())
            })
            .await
            .map_err(map_call_err)
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Map a tokio-rusqlite error wrapping a plain rusqlite error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> VigilError {
    VigilError::Storage {
        source: Box::new(e),
    }
}

/// Map a tokio-rusqlite error whose closure already produced a [`VigilError`].
pub fn map_call_err(e: tokio_rusqlite::Error<VigilError>) -> VigilError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        tokio_rusqlite::Error::ConnectionClosed => VigilError::Storage {
            source: "warehouse connection closed".into(),
        },
        tokio_rusqlite::Error::Close((_, err)) => VigilError::Storage {
            source: Box::new(err),
        },
        other => VigilError::Storage {
            source: other.to_string().into(),
        },
    }
}
