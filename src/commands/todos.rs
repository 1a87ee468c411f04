// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use crate::db::Store;
use crate::models::{Priority, TodoItem, TodoStatus};
use crate::utils::{maybe_print_json, parse_date, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("today", _)) => {
            print_items(&store.today_todos(today())?);
            Ok(())
        }
        Some(("status", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let status = TodoStatus::parse(sub.get_one::<String>("status").unwrap());
            if store.set_todo_status(id, status)? {
                println!("Task {} is now {}", id, status.as_str());
            } else {
                println!("No task with id {}", id);
            }
            Ok(())
        }
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_todo(id)?;
            println!("Deleted task {}", id);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    if title.is_empty() {
        return Err(anyhow!("Title must not be empty"));
    }
    let priority = match sub.get_one::<String>("priority") {
        Some(p) => Some(
            Priority::parse(p)
                .ok_or_else(|| anyhow!("Invalid priority '{}', expected high/medium/low", p))?,
        ),
        None => None,
    };

    let mut item = TodoItem::new(title, priority, today());
    if let Some(desc) = sub.get_one::<String>("description") {
        item.description = desc.clone();
    }
    if let Some(due) = sub.get_one::<String>("due") {
        item.due_date = Some(parse_date(due)?);
    }
    if let Some(tags) = sub.get_one::<String>("tags") {
        item.tags = tags.clone();
    }
    item.assignee = sub.get_one::<String>("assignee").cloned();

    let id = store.add_todo(&item)?;
    println!("Added task '{}' (id {})", title, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = match sub.get_one::<String>("status") {
        Some(s) => store.todos_by_status(TodoStatus::parse(s))?,
        None => store.todos()?,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print_items(&data);
    }
    Ok(())
}

fn print_items(items: &[TodoItem]) {
    let now = today();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|t| {
            let due = match t.due_date {
                Some(d) if t.is_overdue(now) => format!("{} (overdue)", d),
                Some(d) => d.to_string(),
                None => String::new(),
            };
            vec![
                t.id.map(|i| i.to_string()).unwrap_or_default(),
                t.title.clone(),
                t.status.as_str().to_string(),
                t.priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
                due,
                t.tags.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Title", "Status", "Priority", "Due", "Tags"], rows)
    );
}
