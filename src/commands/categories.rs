// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{self, CATEGORIES, CategoryInfo};
use crate::db::KeyValueStore;
use crate::models::TransactionType;
use crate::storage::LedgerStore;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};

pub fn handle<S: KeyValueStore>(ledger: &LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let language = ledger.get_settings().language;
        let kind = sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>().map_err(|e| anyhow!(e)))
            .transpose()?;
        let selected: Vec<&CategoryInfo> = match kind {
            Some(k) => categories::for_type(k).collect(),
            None => CATEGORIES.iter().collect(),
        };
        let data: Vec<Vec<String>> = selected
            .into_iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.kind.to_string(),
                    categories::label(c.id, language),
                    c.icon.to_string(),
                    c.color.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Type", "Name", "Icon", "Color"], data)
        );
    }
    Ok(())
}
