// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print results as pretty JSON")
        .action(ArgAction::SetTrue)
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .help("Print results as JSON lines")
        .action(ArgAction::SetTrue)
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (defaults to the current month)")
}

pub fn build_cli() -> Command {
    Command::new("daybook")
        .about("Personal ledger, task, and diary tracker with AI-assisted capture")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .value_parser(value_parser!(f64)),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category, optionally Parent-Child"),
                        )
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(Arg::new("date").long("date").help("Only this date"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("todo")
                .about("Track tasks")
                .subcommand(
                    Command::new("add")
                        .about("Add a task")
                        .arg(Arg::new("title").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("priority").long("priority").help("high, medium or low"))
                        .arg(Arg::new("due").long("due").help("Due date YYYY-MM-DD"))
                        .arg(Arg::new("tags").long("tags").help("Comma-joined tags"))
                        .arg(Arg::new("assignee").long("assignee")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List tasks, active work first")
                        .arg(Arg::new("status").long("status").help("Only this status"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(Command::new("today").about("Tasks created or due today"))
                .subcommand(
                    Command::new("status")
                        .about("Move a task to a new status")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(
                            Arg::new("status")
                                .required(true)
                                .help("not_started, in_progress or completed"),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a task by id")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("diary")
                .about("Keep a diary")
                .subcommand(
                    Command::new("add")
                        .about("Write an entry")
                        .arg(
                            Arg::new("content")
                                .long("content")
                                .required(true)
                                .help("Entry body, must not be empty"),
                        )
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("mood").long("mood"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List entries, most recent first")
                        .arg(Arg::new("date").long("date").help("Only this date"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete an entry by id")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived monthly views")
                .subcommand(
                    Command::new("summary")
                        .about("Income and expense totals for a month")
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("daily")
                        .about("Per-day income/expense totals for a month")
                        .arg(month_arg())
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("categories")
                        .about("Expense share per parent category for a month")
                        .arg(month_arg())
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from CSV")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions to CSV")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("assistant")
                .about("Turn free text into a transaction or task via the AI pipeline")
                .arg(Arg::new("text").required(true))
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Persist the parsed record")
                        .action(ArgAction::SetTrue),
                ),
        )
}
