// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use crate::db::Store;
use crate::models::DiaryEntry;
use crate::utils::{maybe_print_json, parse_date, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_diary_entry(id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let content = sub.get_one::<String>("content").unwrap();
    if content.trim().is_empty() {
        return Err(anyhow!("Entry content must not be empty"));
    }
    let title = sub.get_one::<String>("title").map(String::as_str);
    let mood = sub.get_one::<String>("mood").map(String::as_str).unwrap_or("");
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let id = store.add_diary_entry(&DiaryEntry::new(title, content, mood, date))?;
    println!("Added diary entry for {} (id {})", date, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = match sub.get_one::<String>("date") {
        Some(d) => store.diary_entries_by_date(parse_date(d)?)?,
        None => store.diary_entries()?,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.map(|i| i.to_string()).unwrap_or_default(),
                    e.date.to_string(),
                    e.title.clone().unwrap_or_default(),
                    e.mood_or_default().to_string(),
                    e.content.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Title", "Mood", "Content"], rows)
        );
    }
    Ok(())
}
