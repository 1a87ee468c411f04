// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use crate::ai::{self, AiConfig, Route};
use crate::db::Store;

/// Route free text through the extraction pipeline. The parsed record is
/// only persisted when --save is given; the pipeline itself never writes.
pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let text = m.get_one::<String>("text").unwrap();
    let save = m.get_flag("save");
    let cfg = AiConfig::from_env();

    match ai::classify(text) {
        Route::Task => {
            let item = ai::parse_task(&cfg, text)
                .recv()
                .map_err(|_| anyhow!("AI worker exited without a result"))?
                .map_err(|e| anyhow!(e.to_string()))?;
            println!(
                "Task: {} (priority {}, due {})",
                item.title,
                item.priority.map(|p| p.as_str()).unwrap_or("-"),
                item.due_date.map(|d| d.to_string()).unwrap_or_default()
            );
            if save {
                let id = store.add_todo(&item)?;
                println!("Saved as task {}", id);
            }
        }
        Route::Bill => {
            let t = ai::parse_bill(&cfg, text)
                .recv()
                .map_err(|_| anyhow!("AI worker exited without a result"))?
                .map_err(|e| anyhow!(e.to_string()))?;
            println!(
                "{} {:.2} in '{}' on {}{}",
                t.kind.label(),
                t.amount,
                t.category,
                t.date,
                if t.note.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", t.note)
                }
            );
            if save {
                let id = store.add_transaction(&t)?;
                println!("Saved as transaction {}", id);
            }
        }
    }
    Ok(())
}
