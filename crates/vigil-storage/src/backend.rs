// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the QueryBackend trait.

use std::time::Instant;

use async_trait::async_trait;
use rusqlite::ErrorCode;
use rusqlite::hooks::{AuthAction, AuthContext, Authorization};
use rusqlite::types::ValueRef;
use tracing::debug;

use vigil_config::model::WarehouseConfig;
use vigil_core::{AdapterType, HealthStatus, PluginAdapter, QueryBackend, Table, Value, VigilError};

use crate::database::{Database, map_call_err, map_tr_err};

/// Tables every warehouse is expected to hold.
const REQUIRED_TABLES: &[&str] = &[
    "security_incidents",
    "user_risk_scores",
    "threat_intel",
    "vulnerability_priorities",
];

const READ_ONLY_MESSAGE: &str = "only read-only queries may run against the warehouse";

/// SQLite-backed query backend.
///
/// Only read-only statements are executed. Statements that write, attach
/// other databases, open transactions, or set pragmas are rejected while
/// they are being prepared, before anything runs.
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the warehouse described by `config`.
    pub async fn open(config: &WarehouseConfig) -> Result<Self, VigilError> {
        let db = Database::open(&config.database_path, config.seed_demo_data).await?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Actions a query statement may perform. Everything else is denied.
fn authorize_query(ctx: AuthContext<'_>) -> Authorization {
    match ctx.action {
        AuthAction::Select
        | AuthAction::Read { .. }
        | AuthAction::Function { .. }
        | AuthAction::Recursive => Authorization::Allow,
        // `PRAGMA name` reads a setting; `PRAGMA name = value` changes it.
        AuthAction::Pragma {
            pragma_value: None, ..
        } => Authorization::Allow,
        _ => Authorization::Deny,
    }
}

/// Run one read-only statement with the query authorizer installed.
///
/// The authorizer is removed again afterwards so migrations, seeding and
/// shutdown on the same connection are unaffected.
fn run_query(conn: &mut rusqlite::Connection, query: &str) -> Result<Table, VigilError> {
    conn.authorizer(Some(authorize_query));
    let result = collect_rows(conn, query);
    conn.authorizer(None::<fn(AuthContext<'_>) -> Authorization>);
    result
}

fn collect_rows(conn: &rusqlite::Connection, query: &str) -> Result<Table, VigilError> {
    let backend_err = |e: rusqlite::Error| VigilError::Backend {
        message: e.to_string(),
        source: Some(Box::new(e)),
    };

    let mut stmt = conn.prepare(query).map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::AuthorizationForStatementDenied) => VigilError::Backend {
            message: READ_ONLY_MESSAGE.to_string(),
            source: Some(Box::new(e)),
        },
        _ => backend_err(e),
    })?;
    if !stmt.readonly() {
        return Err(VigilError::backend(READ_ONLY_MESSAGE));
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let mut table = Table::new(columns);

    let mut rows = stmt.query([]).map_err(backend_err)?;
    while let Some(row) = rows.next().map_err(backend_err)? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(to_value(row.get_ref(i).map_err(backend_err)?));
        }
        table.push_row(values)?;
    }
    Ok(table)
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Text(format!("<blob {} bytes>", bytes.len())),
    }
}

#[async_trait]
impl PluginAdapter for SqliteBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::QueryBackend
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        let missing = self
            .db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn
                    .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
                let mut missing = Vec::new();
                for table in REQUIRED_TABLES {
                    if !stmt.exists([*table])? {
                        missing.push(table.to_string());
                    }
                }
                Ok(missing)
            })
            .await
            .map_err(map_tr_err)?;

        if missing.is_empty() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!(
                "missing tables: {}",
                missing.join(", ")
            )))
        }
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl QueryBackend for SqliteBackend {
    async fn execute(&self, query: &str) -> Result<Table, VigilError> {
        let started = Instant::now();
        let owned = query.to_string();
        let table = self
            .db
            .connection()
            .call(move |conn| run_query(conn, &owned))
            .await
            .map_err(map_call_err)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            latency_ms = started.elapsed().as_millis() as u64,
            "warehouse query executed"
        );
        Ok(table)
    }
}
