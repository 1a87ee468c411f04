// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::schema::{ensure_schema, SCHEMA_VERSION};
use rusqlite::Connection;

fn user_version(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap()
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn fresh_database_reaches_current_version() {
    let mut conn = Connection::open_in_memory().unwrap();
    ensure_schema(&mut conn).unwrap();

    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    let tables = table_names(&conn);
    for t in ["transactions", "diary", "todos"] {
        assert!(tables.iter().any(|n| n == t), "missing table {}", t);
    }
}

#[test]
fn ensure_schema_is_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();
    ensure_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(type, amount, category, note, date)
         VALUES ('expense', 12.5, '餐饮', '', '2025-06-01')",
        [],
    )
    .unwrap();

    ensure_schema(&mut conn).unwrap();

    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn legacy_checklist_rows_are_backfilled() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE checklist(
            id INTEGER PRIMARY KEY,
            title TEXT,
            done INTEGER,
            priority TEXT,
            date TEXT,
            created_at TEXT
        );
        INSERT INTO checklist(title, done, priority, date, created_at)
        VALUES ('buy milk', 0, 'high', '2024-01-05', '2024-01-05 08:00:00'),
               ('ship parcel', 1, 'low', '2024-01-06', '2024-01-06 09:00:00');
        "#,
    )
    .unwrap();

    ensure_schema(&mut conn).unwrap();

    let status: String = conn
        .query_row(
            "SELECT status FROM todos WHERE title='ship parcel'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(status, "completed");
    let status: String = conn
        .query_row("SELECT status FROM todos WHERE title='buy milk'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(status, "not_started");
}

#[test]
fn column_adds_tolerate_reapply() {
    let mut conn = Connection::open_in_memory().unwrap();
    // Shape of a database last touched before the assignment columns landed.
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL
        );
        CREATE TABLE diary(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            content TEXT NOT NULL,
            mood TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE todos(
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
        PRAGMA user_version = 3;
        "#,
    )
    .unwrap();

    ensure_schema(&mut conn).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);

    // Re-running against the now-current schema must be a no-op.
    conn.execute_batch("PRAGMA user_version = 3").unwrap();
    ensure_schema(&mut conn).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);

    conn.execute(
        "INSERT INTO todos(title, date, assignee, attachment)
         VALUES ('x', '2025-01-01', 'me', 'file.png')",
        [],
    )
    .unwrap();
}
