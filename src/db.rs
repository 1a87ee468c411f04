// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::{Lazy, OnceCell};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::schema;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("app.daybook", "Daybook", "daybook"));

static GLOBAL: OnceCell<Store> = OnceCell::new();

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("daybook.sqlite"))
}

/// Shared handle over the embedded store. Writes serialize on the inner
/// mutex; each statement sees a consistent snapshot.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let mut conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        schema::ensure_schema(&mut conn)?;
        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_default() -> Result<Self> {
        Store::open(&db_path()?)
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
        schema::ensure_schema(&mut conn)?;
        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    /// Process-wide handle. The first caller opens and migrates the store;
    /// concurrent first-callers block until that finishes and then share the
    /// same handle. A failed open is not cached.
    pub fn global() -> Result<&'static Store> {
        GLOBAL.get_or_try_init(Store::open_default)
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}
