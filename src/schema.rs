// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

/// Version the store is brought to by `ensure_schema`.
pub const SCHEMA_VERSION: i64 = 4;

/// One additive migration step. `version` is the schema version the step
/// brings the store to; `apply` must be idempotent.
struct Migration {
    version: i64,
    name: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create transactions",
        apply: create_transactions,
    },
    Migration {
        version: 2,
        name: "create diary",
        apply: create_diary,
    },
    Migration {
        version: 3,
        name: "create todos",
        apply: create_todos,
    },
    Migration {
        version: 4,
        name: "todo assignee/attachment columns",
        apply: add_todo_assignment_columns,
    },
];

/// Bring the database up to `SCHEMA_VERSION`, applying every pending step in
/// order inside a single exclusive transaction. On failure nothing commits
/// and the stored version marker is left untouched.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn
        .transaction_with_behavior(rusqlite::TransactionBehavior::Exclusive)
        .context("Begin schema transaction")?;

    let current: i64 = tx
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .context("Read schema version")?;

    for step in MIGRATIONS.iter().filter(|m| m.version > current) {
        (step.apply)(&tx).with_context(|| format!("Migration '{}' failed", step.name))?;
        info!(version = step.version, step = step.name, "schema migration applied");
    }

    if current < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    }
    tx.commit().context("Commit schema transaction")?;
    Ok(())
}

fn create_transactions(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_tx_date ON transactions(date);
        CREATE INDEX IF NOT EXISTS idx_tx_type ON transactions(type);
        CREATE INDEX IF NOT EXISTS idx_tx_date_type ON transactions(date, type);
        "#,
    )?;
    Ok(())
}

fn create_diary(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS diary(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            content TEXT NOT NULL,
            mood TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_diary_date ON diary(date);
        "#,
    )?;
    Ok(())
}

fn create_todos(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS todos(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'not_started',
            priority TEXT,
            due_date TEXT,
            tags TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_todo_date ON todos(date);
        CREATE INDEX IF NOT EXISTS idx_todo_status ON todos(status);
        CREATE INDEX IF NOT EXISTS idx_todo_priority ON todos(priority);
        CREATE INDEX IF NOT EXISTS idx_todo_due ON todos(due_date);
        "#,
    )?;
    backfill_from_checklist(conn)
}

/// Best-effort copy from the pre-status `checklist` table shipped in early
/// builds. A store that never had one skips the step.
fn backfill_from_checklist(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "checklist")? {
        debug!("no legacy checklist table, backfill skipped");
        return Ok(());
    }
    let copied = conn.execute(
        "INSERT INTO todos(title, status, priority, date, created_at)
         SELECT title,
                CASE WHEN done = 1 THEN 'completed' ELSE 'not_started' END,
                priority, date, created_at
         FROM checklist",
        [],
    )?;
    info!(rows = copied, "backfilled todos from legacy checklist");
    Ok(())
}

fn add_todo_assignment_columns(conn: &Connection) -> Result<()> {
    for col in ["assignee", "attachment"] {
        if !column_exists(conn, "todos", col)? {
            conn.execute_batch(&format!("ALTER TABLE todos ADD COLUMN {col} TEXT"))?;
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [name],
        |r| r.get(0),
    )?;
    Ok(found)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
