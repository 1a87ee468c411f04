// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::db::Store;
use crate::models::TxType;
use crate::stats;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub),
        Some(("daily", sub)) => daily(store, sub),
        Some(("categories", sub)) => categories(store, sub),
        _ => Ok(()),
    }
}

fn month_of(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(current_month()),
    }
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let income = stats::monthly_sum(store, TxType::Income, &month)?;
    let expense = stats::monthly_sum(store, TxType::Expense, &month)?;
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Net"],
            vec![vec![
                month,
                format!("{:.2}", income),
                format!("{:.2}", expense),
                format!("{:.2}", income - expense),
            ]],
        )
    );
    Ok(())
}

fn daily(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let summaries = stats::daily_summaries(store, &month)?;
    let data: Vec<_> = summaries.values().cloned().collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|d| {
                vec![
                    d.date.clone(),
                    format!("{:.2}", d.income),
                    format!("{:.2}", d.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Income", "Expense"], rows));
    }
    Ok(())
}

fn categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let data = stats::category_stats(store, &month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    format!("{:.2}", s.amount),
                    format!("{:.1}%", s.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}
