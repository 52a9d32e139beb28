// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LedgerError, ValidationError};

/// Opaque transaction identifier. Time based, but callers must not rely on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        TransactionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        TransactionId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Invalid type '{}', expected income|expense", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub r#type: TransactionType,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(deserialize_with = "de_calendar_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount with the sign implied by the type.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(t) = patch.r#type {
            self.r#type = t;
        }
        if let Some(a) = patch.amount {
            self.amount = a;
        }
        if let Some(d) = patch.description {
            self.description = d;
        }
        if let Some(c) = patch.category {
            self.category = c;
        }
        if let Some(d) = patch.date {
            self.date = d;
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as full RFC 3339 timestamps, keeping only the calendar date.
fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn de_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_calendar_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid transaction date '{}'", s)))
}

fn de_opt_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_calendar_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid transaction date '{}'", s))),
        None => Ok(None),
    }
}

impl From<&Transaction> for Draft {
    fn from(t: &Transaction) -> Self {
        Draft {
            r#type: Some(t.r#type),
            amount: Some(t.amount),
            description: t.description.clone(),
            category: Some(t.category.clone()),
            date: Some(t.date),
        }
    }
}

/// Everything a new record needs except the fields the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: String,
    pub date: NaiveDate,
}

/// Unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub r#type: Option<TransactionType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_calendar_date")]
    pub date: Option<NaiveDate>,
}

impl Draft {
    /// Validates the draft and fills in `today` when no date was given.
    pub fn into_new_transaction(self, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
        let validation = crate::stats::validate_draft(&self);
        match (validation.is_valid, self.r#type, self.amount, self.category) {
            (true, Some(r#type), Some(amount), Some(category)) => Ok(NewTransaction {
                r#type,
                amount,
                description: self.description.filter(|d| !d.trim().is_empty()),
                category: category.trim().to_string(),
                date: self.date.unwrap_or(today),
            }),
            _ => Err(ValidationError {
                errors: validation.errors,
            }),
        }
    }
}

/// Shallow field replacement for an existing record. `id` and `createdAt` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionPatch {
    #[serde(default)]
    pub r#type: Option<TransactionType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// `Some(None)` clears the description.
    #[serde(default, deserialize_with = "de_present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_calendar_date")]
    pub date: Option<NaiveDate>,
}

const IMMUTABLE_FIELDS: [&str; 2] = ["id", "createdAt"];

impl TransactionPatch {
    /// Parses a raw JSON object. Naming `id` or `createdAt` is an error, not a no-op.
    pub fn from_json(updates: &serde_json::Value) -> Result<Self, LedgerError> {
        let obj = updates
            .as_object()
            .ok_or_else(|| LedgerError::InvalidPatch("expected a JSON object".into()))?;
        if let Some(field) = IMMUTABLE_FIELDS.iter().find(|f| obj.contains_key(**f)) {
            return Err(LedgerError::ImmutableField(*field));
        }
        serde_json::from_value(updates.clone()).map_err(|e| LedgerError::InvalidPatch(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }
}

// Distinguishes an explicit `null` from an absent field.
fn de_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(format!("Unsupported language '{}', expected en|es", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::En,
            currency: "USD".to_string(),
        }
    }
}
