// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::TransactionId;

/// Failure of the underlying key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read '{key}': {source}")]
    Read {
        key: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("malformed data under '{key}': {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write '{key}': {source}")]
    Write {
        key: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Transaction '{0}' not found")]
    NotFound(TransactionId),
    #[error("Field '{0}' cannot be changed after creation")]
    ImmutableField(&'static str),
    #[error("Invalid update: {0}")]
    InvalidPatch(String),
}

/// Field-level problems found in a draft before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transaction ({})", join_errors(.errors))]
pub struct ValidationError {
    pub errors: BTreeMap<&'static str, String>,
}

fn join_errors(errors: &BTreeMap<&'static str, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}
