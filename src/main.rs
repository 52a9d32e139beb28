// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use expense_tracker::db::{self, SqliteStore};
use expense_tracker::storage::LedgerStore;
use expense_tracker::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("expense_tracker=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let ledger = LedgerStore::new(SqliteStore::open(&path)?);
    tracing::debug!(path = %path.display(), "Opened ledger");

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&ledger, sub)?,
        Some(("balance", sub)) => commands::reports::balance(&ledger, sub)?,
        Some(("stats", sub)) => commands::reports::stats(&ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&ledger, sub)?,
        Some(("clear", _)) => commands::settings::clear(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
