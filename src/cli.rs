// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(["this-month", "last-month", "this-year", "all"])
        .help("Restrict to a calendar period")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, list, edit and delete transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(type_arg().required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(period_arg())
                .arg(Arg::new("from").long("from").conflicts_with("period"))
                .arg(Arg::new("to").long("to").conflicts_with("period"))
                .arg(type_arg())
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of an existing transaction")
                .arg(Arg::new("id").long("id").required(true))
                .arg(type_arg())
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("date").long("date"))
                .arg(
                    Arg::new("patch")
                        .long("patch")
                        .help("JSON object of fields to replace")
                        .conflicts_with_all(["type", "amount", "category", "description", "date"]),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("expense-tracker")
        .about("Track income and expenses, balances and category statistics")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .env("EXPENSE_TRACKER_DB")
                .global(true)
                .help("Path to the SQLite data file"),
        )
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(tx_command())
        .subcommand(json_args(
            Command::new("balance")
                .about("Running balance over all transactions")
                .arg(period_arg()),
        ))
        .subcommand(json_args(
            Command::new("stats")
                .about("Income, expenses and spending by category")
                .arg(period_arg()),
        ))
        .subcommand(
            Command::new("category")
                .about("Built-in categories")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(type_arg())),
        )
        .subcommand(
            Command::new("settings")
                .about("Language and currency")
                .subcommand_required(true)
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("language")
                                .long("language")
                                .value_parser(["en", "es"]),
                        )
                        .arg(Arg::new("currency").long("currency"))
                        .group(
                            ArgGroup::new("changes")
                                .args(["language", "currency"])
                                .multiple(true)
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete all transactions and settings")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .required(true),
                ),
        )
}
