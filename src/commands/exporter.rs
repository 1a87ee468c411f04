// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::io::Write;

use crate::db::Store;

/// BOM keeps spreadsheet tools reading the UTF-8 labels correctly.
const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap();
    let mut file =
        std::fs::File::create(path).with_context(|| format!("Create CSV {}", path))?;
    let count = export_csv(store, &mut file)?;
    println!("Exported {} transactions to {}", count, path);
    Ok(())
}

/// Write all transactions as `类型,分类,金额,日期,备注` rows, most recent
/// first, RFC-4180 quoted. Returns the row count.
pub fn export_csv<W: Write>(store: &Store, out: &mut W) -> Result<usize> {
    out.write_all(BOM)?;
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["类型", "分类", "金额", "日期", "备注"])?;

    let transactions = store.transactions()?;
    for t in &transactions {
        wtr.write_record([
            t.kind.label().to_string(),
            t.category.clone(),
            format!("{:.2}", t.amount),
            t.date.to_string(),
            t.note.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}
