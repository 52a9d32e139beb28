// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::{Language, Settings};
use crate::storage::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow, bail};

pub fn handle<S: KeyValueStore>(ledger: &LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = ledger.get_settings();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Language", "Currency"],
                        vec![vec![s.language.code().to_string(), s.currency]],
                    )
                );
            }
        }
        Some(("set", sub)) => {
            let saved = set(ledger, sub)?;
            println!(
                "Settings saved: language={}, currency={}",
                saved.language.code(),
                saved.currency
            );
        }
        _ => {}
    }
    Ok(())
}

fn parse_currency(s: &str) -> Result<String> {
    let ccy = s.trim().to_ascii_uppercase();
    if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("Invalid currency '{}', expected an ISO 4217 code like USD", s);
    }
    Ok(ccy)
}

/// Overwrites the stored settings with the current ones plus the given changes.
pub fn set<S: KeyValueStore>(ledger: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<Settings> {
    let current = ledger.get_settings();
    let language = match sub.get_one::<String>("language") {
        Some(l) => l.parse::<Language>().map_err(|e| anyhow!(e))?,
        None => current.language,
    };
    let currency = match sub.get_one::<String>("currency") {
        Some(c) => parse_currency(c)?,
        None => current.currency,
    };
    let saved = ledger
        .save_settings(Settings { language, currency })
        .context("Error saving settings")?;
    Ok(saved)
}

pub fn clear<S: KeyValueStore>(ledger: &LedgerStore<S>) -> Result<()> {
    if !ledger.clear_all() {
        bail!("Could not clear stored data");
    }
    println!("All transactions and settings removed");
    Ok(())
}
