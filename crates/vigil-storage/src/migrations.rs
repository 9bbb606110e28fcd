// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded warehouse migrations using refinery, plus the demo data seed.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use rusqlite::OptionalExtension;
use tracing::info;
use vigil_core::VigilError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

const DEMO_DATA: &str = include_str!("../seed/demo_data.sql");

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), VigilError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| VigilError::Storage {
            source: Box::new(e),
        })?;
    let applied = report.applied_migrations().len();
    if applied > 0 {
        info!(applied, "warehouse migrations applied");
    }
    Ok(())
}

/// Load the demo rows if the warehouse holds no incidents yet.
///
/// Returns whether rows were inserted. Runs in one transaction.
pub fn seed_demo_data(conn: &mut rusqlite::Connection) -> Result<bool, VigilError> {
    let storage_err = |e: rusqlite::Error| VigilError::Storage {
        source: Box::new(e),
    };

    let existing: Option<i64> = conn
        .query_row("SELECT 1 FROM security_incidents LIMIT 1", [], |row| row.get(0))
        .optional()
        .map_err(storage_err)?;
    if existing.is_some() {
        return Ok(false);
    }

    let tx = conn.transaction().map_err(storage_err)?;
    tx.execute_batch(DEMO_DATA).map_err(storage_err)?;
    tx.commit().map_err(storage_err)?;
    info!("demo warehouse data seeded");
    Ok(true)
}
