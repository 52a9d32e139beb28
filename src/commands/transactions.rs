// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::db::KeyValueStore;
use crate::error::{LedgerError, ValidationError};
use crate::models::{Draft, Transaction, TransactionId, TransactionPatch, TransactionType};
use crate::stats::{self, Period};
use crate::storage::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};

pub fn handle<S: KeyValueStore>(ledger: &LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    match m.subcommand() {
        Some(("add", sub)) => {
            add(ledger, sub, today)?;
        }
        Some(("list", sub)) => list(ledger, sub, today)?,
        Some(("edit", sub)) => {
            edit(ledger, sub)?;
        }
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow!(e))
}

pub fn add<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Transaction> {
    let draft = Draft {
        r#type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    let new = draft.into_new_transaction(today)?;
    let shown_as = categories::resolve(&new.category, new.r#type);
    if shown_as.id != new.category {
        tracing::warn!(
            category = %new.category,
            shown_as = shown_as.id,
            "Category is not a known {} category",
            new.r#type
        );
    }
    let saved = ledger
        .save_transaction(new)
        .context("Error saving transaction")?;
    let ccy = ledger.get_settings().currency;
    println!(
        "Recorded {} {} on {} ({}) [id {}]",
        saved.r#type,
        fmt_money(&saved.amount, &ccy),
        saved.date,
        saved.category,
        saved.id
    );
    Ok(saved)
}

/// Snapshot narrowed by the list filters, still newest-inserted first.
pub fn query_rows<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<Transaction>> {
    let all = ledger.list_transactions();

    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let mut data = if from.is_some() || to.is_some() {
        stats::filter_by_date_range(
            &all,
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        )
    } else {
        let period = match sub.get_one::<String>("period") {
            Some(p) => p.parse::<Period>().map_err(|e| anyhow!(e))?,
            None => Period::All,
        };
        period.apply(&all, today)
    };

    if let Some(t) = sub.get_one::<String>("type") {
        let kind = parse_type(t)?;
        data.retain(|tx| tx.r#type == kind);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        let cat = cat.trim();
        data.retain(|tx| tx.category == cat);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn list<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub, today)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }

    let settings = ledger.get_settings();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            let sign = match t.r#type {
                TransactionType::Income => "+",
                TransactionType::Expense => "-",
            };
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.r#type.to_string(),
                categories::label(&t.category, settings.language),
                t.description.clone().unwrap_or_default(),
                format!("{} {}", sign, fmt_money(&t.amount, &settings.currency)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Category", "Description", "Amount"],
            rows
        )
    );
    println!(
        "Listed total: {}",
        fmt_money(&stats::balance(&data), &settings.currency)
    );
    println!(
        "Balance: {}",
        fmt_money(
            &stats::balance(&ledger.list_transactions()),
            &settings.currency
        )
    );
    Ok(())
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        r#type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        description: sub
            .get_one::<String>("description")
            .map(|s| Some(s.clone()).filter(|d| !d.trim().is_empty())),
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string()),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    })
}

pub fn edit<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let id = TransactionId::new(sub.get_one::<String>("id").map_or("", |s| s.trim()));
    let patch = if let Some(raw) = sub.get_one::<String>("patch") {
        let value: serde_json::Value =
            serde_json::from_str(raw).with_context(|| format!("Invalid JSON patch '{}'", raw))?;
        TransactionPatch::from_json(&value)?
    } else {
        patch_from_args(sub)?
    };
    if patch.is_empty() {
        bail!("Nothing to update for transaction '{}'", id);
    }

    // The merged record must pass the same checks as a new one.
    let mut merged = ledger
        .list_transactions()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
    merged.apply(patch.clone());
    let validation = stats::validate_draft(&Draft::from(&merged));
    if !validation.is_valid {
        return Err(ValidationError {
            errors: validation.errors,
        }
        .into());
    }

    let updated = ledger.update_transaction(&id, patch)?;
    println!("Updated transaction {}", updated.id);
    Ok(updated)
}

fn rm<S: KeyValueStore>(ledger: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = TransactionId::new(sub.get_one::<String>("id").map_or("", |s| s.trim()));
    if !ledger.delete_transaction(&id) {
        bail!("Could not delete transaction '{}'", id);
    }
    println!("Transaction deleted");
    Ok(())
}
