// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::db::Store;
use crate::models::{CategoryStat, DailyTotal, TxType};

/// Sum of all amounts of one type within a `YYYY-MM` month. 0 when no rows.
pub fn monthly_sum(store: &Store, kind: TxType, year_month: &str) -> Result<f64> {
    let total: f64 = store.conn().query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions
         WHERE type=?1 AND substr(date,1,7)=?2",
        [kind.as_str(), year_month],
        |r| r.get(0),
    )?;
    Ok(total)
}

/// One entry per date carrying at least one transaction in the month, income
/// and expense summed independently.
pub fn daily_summaries(store: &Store, year_month: &str) -> Result<BTreeMap<String, DailyTotal>> {
    let conn = store.conn();
    let mut stmt = conn.prepare(
        "SELECT date,
                SUM(CASE WHEN type='income' THEN amount ELSE 0 END),
                SUM(CASE WHEN type='expense' THEN amount ELSE 0 END)
         FROM transactions WHERE substr(date,1,7)=?1 GROUP BY date",
    )?;
    let rows = stmt.query_map([year_month], |r| {
        Ok(DailyTotal {
            date: r.get(0)?,
            income: r.get(1)?,
            expense: r.get(2)?,
        })
    })?;
    let mut out = BTreeMap::new();
    for row in rows {
        let total = row?;
        out.insert(total.date.clone(), total);
    }
    Ok(out)
}

/// Expense share per parent category segment, largest first. Ties keep
/// first-insertion order. Empty when the month has no expenses at all, so
/// the percentage division is never attempted.
pub fn category_stats(store: &Store, year_month: &str) -> Result<Vec<CategoryStat>> {
    let total_expense = monthly_sum(store, TxType::Expense, year_month)?;
    if total_expense == 0.0 {
        return Ok(Vec::new());
    }

    let conn = store.conn();
    let mut stmt = conn.prepare(
        "SELECT CASE WHEN instr(category, '-') > 0
                     THEN substr(category, 1, instr(category, '-') - 1)
                     ELSE category END AS parent,
                SUM(amount) AS total
         FROM transactions
         WHERE type='expense' AND substr(date,1,7)=?1
         GROUP BY parent ORDER BY MIN(id)",
    )?;
    let rows = stmt.query_map([year_month], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, f64>(1)?))
    })?;

    let mut stats = Vec::new();
    for row in rows {
        let (category, amount) = row?;
        stats.push(CategoryStat {
            category,
            amount,
            percentage: amount / total_expense * 100.0,
        });
    }
    // Stable sort keeps insertion order between equal amounts.
    stats.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    Ok(stats)
}
