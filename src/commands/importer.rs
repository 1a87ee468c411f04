// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::db::Store;
use crate::models::{Transaction, TxType};

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Combined outcome of one CSV import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let text = std::fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;
    let report = import_csv(store, &text)?;
    let mut msg = format!("Imported {} transactions", report.imported);
    if report.skipped > 0 {
        msg.push_str(&format!(", skipped {} invalid rows", report.skipped));
    }
    println!("{}", msg);
    Ok(())
}

/// Import transactions from CSV text with the `类型,分类,金额,日期,备注`
/// header. Invalid rows are skipped and counted; the batch never aborts on
/// one bad row.
pub fn import_csv(store: &Store, text: &str) -> Result<ImportReport> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut imported = 0usize;
    let mut skipped = 0usize;

    for record in rdr.records() {
        let rec = match record {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if rec.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match decode_row(&rec) {
            Some(t) => {
                store.add_transaction(&t)?;
                imported += 1;
            }
            None => skipped += 1,
        }
    }

    debug!(imported, skipped, "csv import finished");
    Ok(ImportReport { imported, skipped })
}

/// One row in export column order; None when any field fails validation.
fn decode_row(rec: &csv::StringRecord) -> Option<Transaction> {
    if rec.len() < 4 {
        return None;
    }
    let kind = TxType::from_label(rec.get(0)?.trim())?;
    let category = rec.get(1)?.trim().to_string();
    let amount: f64 = rec.get(2)?.trim().parse().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let date_raw = rec.get(3)?.trim();
    if !DATE_RE.is_match(date_raw) {
        return None;
    }
    let date = chrono::NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").ok()?;
    let note = rec.get(4).map(|s| s.trim()).unwrap_or("").to_string();

    Some(Transaction {
        id: None,
        kind,
        amount,
        category,
        note,
        date,
    })
}
