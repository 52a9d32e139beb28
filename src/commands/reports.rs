// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::db::KeyValueStore;
use crate::models::{Settings, Transaction};
use crate::stats::{self, CategoryShare, DateWindow, Period, Summary};
use crate::storage::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use serde::Serialize;

fn period_of(sub: &clap::ArgMatches, default: Period) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>().map_err(|e| anyhow!(e)),
        None => Ok(default),
    }
}

pub fn balance<S: KeyValueStore>(ledger: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = period_of(sub, Period::All)?;
    let today = Local::now().date_naive();
    let settings = ledger.get_settings();
    let snapshot = period.apply(&ledger.list_transactions(), today);
    let summary = Summary::from_transactions(&snapshot);

    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let data = vec![
            vec![
                "Income".to_string(),
                fmt_money(&summary.income, &settings.currency),
            ],
            vec![
                "Expenses".to_string(),
                fmt_money(&summary.expenses, &settings.currency),
            ],
            vec![
                "Balance".to_string(),
                fmt_money(&summary.balance, &settings.currency),
            ],
        ];
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub period: Period,
    pub window: Option<DateWindow>,
    pub summary: Summary,
    pub expenses_by_category: Vec<CategoryShare>,
}

pub fn build_report(transactions: &[Transaction], period: Period, today: NaiveDate) -> StatsReport {
    let snapshot = period.apply(transactions, today);
    StatsReport {
        period,
        window: period.window(today),
        summary: Summary::from_transactions(&snapshot),
        expenses_by_category: stats::expense_breakdown(&snapshot),
    }
}

fn print_report(report: &StatsReport, settings: &Settings) {
    if let Some(w) = report.window {
        println!("{} .. {}", w.start, w.end);
    }
    let ccy = &settings.currency;
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expenses", "Balance", "Transactions"],
            vec![vec![
                fmt_money(&report.summary.income, ccy),
                fmt_money(&report.summary.expenses, ccy),
                fmt_money(&report.summary.balance, ccy),
                report.summary.count.to_string(),
            ]],
        )
    );
    if report.expenses_by_category.is_empty() {
        return;
    }
    let rows: Vec<Vec<String>> = report
        .expenses_by_category
        .iter()
        .map(|c| {
            vec![
                categories::label(&c.category, settings.language),
                c.count.to_string(),
                fmt_money(&c.total, ccy),
                format!("{:.2}%", c.percent),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Count", "Spent", "Share"], rows)
    );
}

pub fn stats<S: KeyValueStore>(ledger: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = period_of(sub, Period::ThisMonth)?;
    let report = build_report(
        &ledger.list_transactions(),
        period,
        Local::now().date_naive(),
    );
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        print_report(&report, &ledger.get_settings());
    }
    Ok(())
}
