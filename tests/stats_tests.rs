// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use expense_tracker::models::{Draft, Transaction, TransactionId, TransactionType};
use expense_tracker::stats::{
    Period, Summary, balance, current_month_window, current_year_window, expense_breakdown,
    filter_by_date_range, group_by_category, previous_month_window, total_by_type, validate_draft,
};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(id: &str, kind: TransactionType, amount: &str, category: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id: TransactionId::from(id),
        r#type: kind,
        amount: dec(amount),
        description: None,
        category: category.to_string(),
        date,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn sample() -> Vec<Transaction> {
    use TransactionType::{Expense, Income};
    vec![
        tx("6", Expense, "0.10", "food", day(2025, 3, 31)),
        tx("5", Expense, "0.20", "food", day(2025, 3, 1)),
        tx("4", Income, "2500.00", "salary", day(2025, 3, 1)),
        tx("3", Expense, "45.5", "transport", day(2025, 2, 28)),
        tx("2", Expense, "12", "food", day(2025, 2, 10)),
        tx("1", Income, "300", "freelance", day(2024, 12, 31)),
    ]
}

#[test]
fn balance_of_empty_and_simple_ledgers() {
    assert_eq!(balance(&[]), Decimal::ZERO);
    let txs = vec![
        tx("1", TransactionType::Income, "100", "salary", day(2025, 1, 1)),
        tx("2", TransactionType::Expense, "30", "food", day(2025, 1, 2)),
    ];
    assert_eq!(balance(&txs), dec("70"));
}

#[test]
fn totals_by_type_reconcile_with_balance() {
    let txs = sample();
    let income = total_by_type(&txs, TransactionType::Income);
    let expense = total_by_type(&txs, TransactionType::Expense);
    assert_eq!(income, dec("2800"));
    assert_eq!(expense, dec("57.8"));
    assert_eq!(income - expense, balance(&txs));
    assert_eq!(total_by_type(&[], TransactionType::Income), Decimal::ZERO);
}

#[test]
fn decimal_sums_do_not_drift() {
    let txs = vec![
        tx("1", TransactionType::Expense, "0.1", "food", day(2025, 1, 1)),
        tx("2", TransactionType::Expense, "0.2", "food", day(2025, 1, 1)),
    ];
    assert_eq!(total_by_type(&txs, TransactionType::Expense), dec("0.3"));
}

#[test]
fn groups_follow_first_encounter_order() {
    let txs = sample();
    let groups = group_by_category(&txs);
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["food", "salary", "transport", "freelance"]);

    let food = &groups[0];
    assert_eq!(food.count, 3);
    assert_eq!(food.total, dec("12.30"));
    let ids: Vec<&str> = food.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "5", "2"]);

    let counted: usize = groups.iter().map(|g| g.count).sum();
    assert_eq!(counted, txs.len());
    for g in &groups {
        let expected: Decimal = txs
            .iter()
            .filter(|t| t.category == g.name)
            .map(|t| t.amount)
            .sum();
        assert_eq!(g.total, expected);
    }
    assert!(group_by_category(&[]).is_empty());
}

#[test]
fn date_filter_is_inclusive_at_both_ends() {
    let txs = sample();
    let hits = filter_by_date_range(&txs, day(2025, 3, 1), day(2025, 3, 31));
    let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "5", "4"]);

    let single = filter_by_date_range(&txs, day(2025, 2, 28), day(2025, 2, 28));
    assert_eq!(single.len(), 1);
    assert!(filter_by_date_range(&txs, day(2025, 4, 1), day(2025, 3, 1)).is_empty());
}

#[test]
fn month_windows_roll_over_year_boundaries() {
    let w = previous_month_window(day(2025, 1, 15));
    assert_eq!((w.start, w.end), (day(2024, 12, 1), day(2024, 12, 31)));

    let w = previous_month_window(day(2024, 3, 31));
    assert_eq!((w.start, w.end), (day(2024, 2, 1), day(2024, 2, 29)));

    let w = current_month_window(day(2025, 12, 5));
    assert_eq!((w.start, w.end), (day(2025, 12, 1), day(2025, 12, 31)));

    let w = current_month_window(day(2025, 2, 1));
    assert_eq!(w.end, day(2025, 2, 28));
    assert!(w.contains(day(2025, 2, 28)));
    assert!(!w.contains(day(2025, 3, 1)));

    let w = current_year_window(day(2025, 7, 4));
    assert_eq!((w.start, w.end), (day(2025, 1, 1), day(2025, 12, 31)));
}

#[test]
fn periods_select_expected_records() {
    let txs = sample();
    let today = day(2025, 3, 15);
    assert_eq!(Period::ThisMonth.apply(&txs, today).len(), 3);
    assert_eq!(Period::LastMonth.apply(&txs, today).len(), 2);
    assert_eq!(Period::ThisYear.apply(&txs, today).len(), 5);
    assert_eq!(Period::All.apply(&txs, today).len(), 6);
    assert_eq!("last-month".parse::<Period>().unwrap(), Period::LastMonth);
    assert!("fortnight".parse::<Period>().is_err());
}

#[test]
fn summary_and_breakdown_for_a_month() {
    let txs = Period::ThisMonth.apply(&sample(), day(2025, 3, 15));
    let summary = Summary::from_transactions(&txs);
    assert_eq!(summary.income, dec("2500"));
    assert_eq!(summary.expenses, dec("0.3"));
    assert_eq!(summary.balance, dec("2499.7"));
    assert_eq!(summary.count, 3);

    let all = sample();
    let shares = expense_breakdown(&all);
    let cats: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(cats, vec!["food", "transport"]);
    assert_eq!(shares[0].total, dec("12.3"));
    assert_eq!(shares[0].percent, dec("21.28"));
    assert_eq!(shares[1].percent, dec("78.72"));
    assert!(expense_breakdown(&[]).is_empty());
}

#[test]
fn validation_flags_missing_or_non_positive_fields() {
    let zero = Draft {
        amount: Some(Decimal::ZERO),
        category: Some("food".into()),
        r#type: Some(TransactionType::Expense),
        ..Draft::default()
    };
    let v = validate_draft(&zero);
    assert!(!v.is_valid);
    assert_eq!(v.errors.get("amount").map(String::as_str), Some("Amount must be greater than 0"));
    assert_eq!(v.errors.len(), 1);

    let ok = Draft {
        amount: Some(dec("25")),
        ..zero.clone()
    };
    let v = validate_draft(&ok);
    assert!(v.is_valid);
    assert!(v.errors.is_empty());

    let v = validate_draft(&Draft {
        category: Some("   ".into()),
        ..Draft::default()
    });
    assert!(!v.is_valid);
    let fields: Vec<&str> = v.errors.keys().copied().collect();
    assert_eq!(fields, vec!["amount", "category", "type"]);
}

#[test]
fn drafts_become_new_transactions_only_when_valid() {
    let today = day(2025, 6, 1);
    let draft = Draft {
        amount: Some(dec("-4")),
        category: Some("food".into()),
        r#type: Some(TransactionType::Expense),
        ..Draft::default()
    };
    let err = draft.into_new_transaction(today).unwrap_err();
    assert!(err.errors.contains_key("amount"));
    assert!(err.to_string().contains("Amount must be greater than 0"));

    let new = Draft {
        amount: Some(dec("4")),
        category: Some(" food ".into()),
        r#type: Some(TransactionType::Expense),
        description: Some(" ".into()),
        date: None,
    }
    .into_new_transaction(today)
    .unwrap();
    assert_eq!(new.date, today);
    assert_eq!(new.category, "food");
    assert_eq!(new.description, None);
}
