// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::Store;
use crate::models::{DiaryEntry, Priority, TodoItem, TodoStatus, Transaction, TxType};

const TODO_STATUS_RANK: &str =
    "CASE status WHEN 'in_progress' THEN 1 WHEN 'not_started' THEN 2 WHEN 'completed' THEN 3 END";
const TODO_PRIORITY_RANK: &str =
    "CASE priority WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END";

fn tx_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind_raw: String = row.get(1)?;
    let kind = TxType::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown transaction type '{kind_raw}'").into(),
        )
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        kind,
        amount: row.get(2)?,
        category: row.get(3)?,
        note: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        date: row.get(5)?,
    })
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    let status: String = row.get(3)?;
    let priority: Option<String> = row.get(4)?;
    Ok(TodoItem {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        status: TodoStatus::parse(&status),
        priority: priority.as_deref().and_then(Priority::parse),
        due_date: row.get(5)?,
        tags: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        date: row.get(7)?,
        created_at: row.get(8)?,
        assignee: row.get(9)?,
        attachment: row.get(10)?,
    })
}

fn diary_from_row(row: &Row<'_>) -> rusqlite::Result<DiaryEntry> {
    Ok(DiaryEntry {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        content: row.get(2)?,
        mood: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl Store {
    // ── Transactions ──────────────────────────────────────────

    pub fn add_transaction(&self, t: &Transaction) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO transactions(type, amount, category, note, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![t.kind.as_str(), t.amount, t.category, t.note, t.date],
        )
        .context("Insert transaction")?;
        Ok(conn.last_insert_rowid())
    }

    /// Returns false when the id does not exist; that is a normal outcome.
    pub fn update_transaction(&self, t: &Transaction) -> Result<bool> {
        let id = match t.id {
            Some(id) => id,
            None => return Ok(false),
        };
        let affected = self.conn().execute(
            "UPDATE transactions SET type=?1, amount=?2, category=?3, note=?4, date=?5 WHERE id=?6",
            params![t.kind.as_str(), t.amount, t.category, t.note, t.date, id],
        )?;
        Ok(affected > 0)
    }

    /// Deleting an absent id is a silent no-op.
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        self.conn()
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(())
    }

    /// Most recent first, ties broken by insertion order.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, type, amount, category, note, date FROM transactions
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], tx_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn transactions_by_date(&self, date: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, type, amount, category, note, date FROM transactions
             WHERE date=?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![date], tx_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Diary ─────────────────────────────────────────────────

    pub fn add_diary_entry(&self, e: &DiaryEntry) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO diary(title, content, mood, date) VALUES (?1, ?2, ?3, ?4)",
            params![e.title, e.content, e.mood, e.date],
        )
        .context("Insert diary entry")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_diary_entry(&self, e: &DiaryEntry) -> Result<bool> {
        let id = match e.id {
            Some(id) => id,
            None => return Ok(false),
        };
        let affected = self.conn().execute(
            "UPDATE diary SET title=?1, content=?2, mood=?3, date=?4 WHERE id=?5",
            params![e.title, e.content, e.mood, e.date, id],
        )?;
        Ok(affected > 0)
    }

    pub fn delete_diary_entry(&self, id: i64) -> Result<()> {
        self.conn()
            .execute("DELETE FROM diary WHERE id=?1", params![id])?;
        Ok(())
    }

    pub fn diary_entries(&self) -> Result<Vec<DiaryEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, content, mood, date, created_at FROM diary
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], diary_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn diary_entries_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, content, mood, date, created_at FROM diary
             WHERE date=?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![date], diary_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn diary_count(&self) -> Result<i64> {
        Ok(self
            .conn()
            .query_row("SELECT COUNT(*) FROM diary", [], |r| r.get(0))?)
    }

    // ── Todos ─────────────────────────────────────────────────

    pub fn add_todo(&self, item: &TodoItem) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO todos(title, description, status, priority, due_date, tags, date, assignee, attachment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.title,
                item.description,
                item.status.as_str(),
                item.priority.map(Priority::as_str),
                item.due_date,
                item.tags,
                item.date,
                item.assignee,
                item.attachment
            ],
        )
        .context("Insert todo item")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_todo(&self, item: &TodoItem) -> Result<bool> {
        let id = match item.id {
            Some(id) => id,
            None => return Ok(false),
        };
        let affected = self.conn().execute(
            "UPDATE todos SET title=?1, description=?2, status=?3, priority=?4, due_date=?5,
             tags=?6, date=?7, assignee=?8, attachment=?9 WHERE id=?10",
            params![
                item.title,
                item.description,
                item.status.as_str(),
                item.priority.map(Priority::as_str),
                item.due_date,
                item.tags,
                item.date,
                item.assignee,
                item.attachment,
                id
            ],
        )?;
        Ok(affected > 0)
    }

    pub fn set_todo_status(&self, id: i64, status: TodoStatus) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE todos SET status=?1 WHERE id=?2",
            params![status.as_str(), id],
        )?;
        Ok(affected > 0)
    }

    pub fn delete_todo(&self, id: i64) -> Result<()> {
        self.conn()
            .execute("DELETE FROM todos WHERE id=?1", params![id])?;
        Ok(())
    }

    /// Active work first, then by priority, newest creation first.
    pub fn todos(&self) -> Result<Vec<TodoItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, description, status, priority, due_date, tags, date, created_at,
                    assignee, attachment
             FROM todos ORDER BY {TODO_STATUS_RANK}, {TODO_PRIORITY_RANK}, created_at DESC"
        ))?;
        let rows = stmt.query_map([], todo_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn todos_by_status(&self, status: TodoStatus) -> Result<Vec<TodoItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, description, status, priority, due_date, tags, date, created_at,
                    assignee, attachment
             FROM todos WHERE status=?1 ORDER BY {TODO_PRIORITY_RANK}, created_at DESC"
        ))?;
        let rows = stmt.query_map(params![status.as_str()], todo_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn todos_by_date(&self, date: NaiveDate) -> Result<Vec<TodoItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, description, status, priority, due_date, tags, date, created_at,
                    assignee, attachment
             FROM todos WHERE date=?1 ORDER BY {TODO_STATUS_RANK}, {TODO_PRIORITY_RANK}"
        ))?;
        let rows = stmt.query_map(params![date], todo_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Items created today or due today.
    pub fn today_todos(&self, today: NaiveDate) -> Result<Vec<TodoItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, description, status, priority, due_date, tags, date, created_at,
                    assignee, attachment
             FROM todos WHERE date=?1 OR due_date=?1
             ORDER BY {TODO_STATUS_RANK}, {TODO_PRIORITY_RANK}"
        ))?;
        let rows = stmt.query_map(params![today], todo_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn todo_count(&self) -> Result<i64> {
        Ok(self
            .conn()
            .query_row("SELECT COUNT(*) FROM todos", [], |r| r.get(0))?)
    }

    pub fn pending_todo_count(&self) -> Result<i64> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM todos WHERE status != 'completed'",
            [],
            |r| r.get(0),
        )?)
    }

    pub fn todo_count_by_status(&self, status: TodoStatus) -> Result<i64> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM todos WHERE status=?1",
            params![status.as_str()],
            |r| r.get(0),
        )?)
    }
}
