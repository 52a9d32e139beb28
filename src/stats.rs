// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure calculations over a ledger snapshot: totals, grouping, date windows and draft checks.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Draft, Transaction, TransactionType};

/// Signed sum: income adds, expense subtracts.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(Transaction::signed_amount).sum()
}

pub fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == kind)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub name: String,
    pub total: Decimal,
    pub count: usize,
    pub transactions: Vec<&'a Transaction>,
}

/// Groups by category in first-encounter order.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for t in transactions {
        let slot = *index.entry(t.category.as_str()).or_insert_with(|| {
            groups.push(CategoryGroup {
                name: t.category.clone(),
                total: Decimal::ZERO,
                count: 0,
                transactions: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total += t.amount;
        group.count += 1;
        group.transactions.push(t);
    }
    groups
}

/// Records whose `date` lies in `[start, end]`, both ends inclusive.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| start <= t.date && t.date <= end)
        .cloned()
        .collect()
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        filter_by_date_range(transactions, self.start, self.end)
    }
}

fn month_window(year: i32, month: u32) -> DateWindow {
    // Both dates exist for any month 1..=12 within chrono's year range.
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let next_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next_start.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX);
    DateWindow { start, end }
}

pub fn current_month_window(today: NaiveDate) -> DateWindow {
    month_window(today.year(), today.month())
}

pub fn previous_month_window(today: NaiveDate) -> DateWindow {
    if today.month() == 1 {
        month_window(today.year() - 1, 12)
    } else {
        month_window(today.year(), today.month() - 1)
    }
}

pub fn current_year_window(today: NaiveDate) -> DateWindow {
    DateWindow {
        start: month_window(today.year(), 1).start,
        end: month_window(today.year(), 12).end,
    }
}

pub fn current_month_window_now() -> DateWindow {
    current_month_window(Local::now().date_naive())
}

pub fn previous_month_window_now() -> DateWindow {
    previous_month_window(Local::now().date_naive())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    #[default]
    ThisMonth,
    LastMonth,
    ThisYear,
    All,
}

impl Period {
    pub fn window(&self, today: NaiveDate) -> Option<DateWindow> {
        match self {
            Period::ThisMonth => Some(current_month_window(today)),
            Period::LastMonth => Some(previous_month_window(today)),
            Period::ThisYear => Some(current_year_window(today)),
            Period::All => None,
        }
    }

    pub fn apply(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        match self.window(today) {
            Some(w) => w.filter(transactions),
            None => transactions.to_vec(),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "this-month" | "month" => Ok(Period::ThisMonth),
            "last-month" => Ok(Period::LastMonth),
            "this-year" | "year" => Ok(Period::ThisYear),
            "all" => Ok(Period::All),
            other => Err(format!(
                "Invalid period '{}', expected this-month|last-month|this-year|all",
                other
            )),
        }
    }
}

/// Income, expenses and balance for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub count: usize,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Summary {
            income: total_by_type(transactions, TransactionType::Income),
            expenses: total_by_type(transactions, TransactionType::Expense),
            balance: balance(transactions),
            count: transactions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    /// Share of all expenses, 0-100 with two decimals.
    pub percent: Decimal,
}

/// Expense-only category groups with their share of total spending.
pub fn expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let expenses: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
        .cloned()
        .collect();
    let spent = total_by_type(&expenses, TransactionType::Expense);
    group_by_category(&expenses)
        .into_iter()
        .map(|g| {
            let percent = if spent.is_zero() {
                Decimal::ZERO
            } else {
                (g.total * Decimal::ONE_HUNDRED / spent).round_dp(2)
            };
            CategoryShare {
                category: g.name,
                total: g.total,
                count: g.count,
                percent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, String>,
}

/// Structural checks a draft must pass before it is handed to the store.
pub fn validate_draft(draft: &Draft) -> Validation {
    let mut errors = BTreeMap::new();

    if draft.amount.is_none_or(|a| a <= Decimal::ZERO) {
        errors.insert("amount", "Amount must be greater than 0".to_string());
    }
    if draft.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
        errors.insert("category", "Category is required".to_string());
    }
    if draft.r#type.is_none() {
        errors.insert("type", "Type is required".to_string());
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}
