// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction direction. Stored as the lowercase token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TxType::Income),
            "expense" => Some(TxType::Expense),
            _ => None,
        }
    }

    /// Localized label used at the CSV boundary.
    pub fn label(self) -> &'static str {
        match self {
            TxType::Income => "收入",
            TxType::Expense => "支出",
        }
    }

    /// Accepts either the localized label or the internal token.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "收入" => Some(TxType::Income),
            "支出" => Some(TxType::Expense),
            other => TxType::parse(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::NotStarted => "not_started",
            TodoStatus::InProgress => "in_progress",
            TodoStatus::Completed => "completed",
        }
    }

    /// Unknown or missing tokens fall back to the default status.
    pub fn parse(s: &str) -> Self {
        match s {
            "in_progress" => TodoStatus::InProgress,
            "completed" => TodoStatus::Completed,
            _ => TodoStatus::NotStarted,
        }
    }

    /// List ordering: active work first, finished work last.
    pub fn rank(self) -> i64 {
        match self {
            TodoStatus::InProgress => 1,
            TodoStatus::NotStarted => 2,
            TodoStatus::Completed => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Unset priorities rank after low.
    pub fn rank(p: Option<Priority>) -> i64 {
        match p {
            Some(Priority::High) => 1,
            Some(Priority::Medium) => 2,
            Some(Priority::Low) => 3,
            None => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub kind: TxType,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(kind: TxType, amount: f64, category: &str, note: &str, date: NaiveDate) -> Self {
        Transaction {
            id: None,
            kind,
            amount,
            category: category.to_string(),
            note: note.to_string(),
            date,
        }
    }

    /// Parent segment of a `Parent-Child` composite category.
    pub fn parent_category(&self) -> &str {
        match self.category.split_once('-') {
            Some((parent, _)) => parent,
            None => &self.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    /// Comma-joined tags; empty when none.
    pub tags: String,
    /// Creation date.
    pub date: NaiveDate,
    /// Store-assigned timestamp.
    pub created_at: Option<String>,
    pub assignee: Option<String>,
    pub attachment: Option<String>,
}

impl TodoItem {
    pub fn new(title: &str, priority: Option<Priority>, date: NaiveDate) -> Self {
        TodoItem {
            id: None,
            title: title.to_string(),
            description: String::new(),
            status: TodoStatus::NotStarted,
            priority,
            due_date: None,
            tags: String::new(),
            date,
            created_at: None,
            assignee: None,
            attachment: None,
        }
    }

    /// Date-only comparison; an item due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => self.status != TodoStatus::Completed && due < today,
            None => false,
        }
    }
}

/// Moods the diary UI knows how to render; anything else falls back to a
/// neutral display. Persisted as free text.
pub const KNOWN_MOODS: &[&str] = &["happy", "neutral", "sad", "excited", "tired", "angry"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: String,
    pub mood: String,
    pub date: NaiveDate,
    pub created_at: Option<String>,
}

impl DiaryEntry {
    pub fn new(title: Option<&str>, content: &str, mood: &str, date: NaiveDate) -> Self {
        DiaryEntry {
            id: None,
            title: title.map(|t| t.to_string()),
            content: content.to_string(),
            mood: mood.to_string(),
            date,
            created_at: None,
        }
    }

    /// Stored mood if it is one the UI knows, otherwise the neutral default.
    pub fn mood_or_default(&self) -> &str {
        if KNOWN_MOODS.contains(&self.mood.as_str()) {
            &self.mood
        } else {
            "neutral"
        }
    }
}

/// Per-day income/expense sums for one calendar month. Derived, not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTotal {
    pub date: String,
    pub income: f64,
    pub expense: f64,
}

/// Expense share of one parent category within a month.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}
