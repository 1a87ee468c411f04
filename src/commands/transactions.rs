// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use crate::db::Store;
use crate::models::{Transaction, TxType};
use crate::utils::{maybe_print_json, parse_date, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_transaction(id)?;
            println!("Deleted transaction {}", id);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let kind_raw = sub.get_one::<String>("type").unwrap();
    let kind = TxType::parse(kind_raw)
        .ok_or_else(|| anyhow!("Invalid type '{}', expected income or expense", kind_raw))?;
    let amount = *sub.get_one::<f64>("amount").unwrap();
    if amount < 0.0 {
        return Err(anyhow!("Amount must not be negative"));
    }
    let category = sub.get_one::<String>("category").unwrap();
    if category.is_empty() {
        return Err(anyhow!("Category must not be empty"));
    }
    let note = sub.get_one::<String>("note").map(String::as_str).unwrap_or("");
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let id = store.add_transaction(&Transaction::new(kind, amount, category, note, date))?;
    println!(
        "Recorded {} {:.2} in '{}' on {} (id {})",
        kind.as_str(),
        amount,
        category,
        date,
        id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = match sub.get_one::<String>("date") {
        Some(d) => store.transactions_by_date(parse_date(d)?)?,
        None => store.transactions()?,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.map(|i| i.to_string()).unwrap_or_default(),
                    t.date.to_string(),
                    t.kind.label().to_string(),
                    format!("{:.2}", t.amount),
                    t.category.clone(),
                    t.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Type", "Amount", "Category", "Note"], rows)
        );
    }
    Ok(())
}
