// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn period_args() -> [Arg; 3] {
    [
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Calendar year (default: current)"),
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32))
            .help("Calendar month 1-12 (default: current)"),
        Arg::new("mode")
            .long("mode")
            .value_parser(["monthly", "yearly"])
            .default_value("monthly")
            .help("Aggregate one month or a whole year"),
    ]
}

fn currency_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(["AED", "PKR", "aed", "pkr"])
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(clap::crate_version!())
        .about("Dual-currency (AED/PKR) personal finance tracker")
        .subcommand(Command::new("init").about("Create the data store and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record, browse and delete transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(currency_arg("currency").default_value("AED"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("food")
                                .help("Category key or name, see `category list`"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["expense", "income"])
                                .default_value("expense"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("Show transaction history, newest first")
                        .args(period_args())
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Ignore the period and show all history"),
                        )
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("rate")
                .about("Exchange rate (PKR per 1 AED)")
                .subcommand(Command::new("show").about("Print the current rate"))
                .subcommand(
                    Command::new("set")
                        .about("Replace the rate")
                        .arg(Arg::new("rate").required(true).allow_negative_numbers(true)),
                )
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount with the current rate")
                        .arg(Arg::new("amount").required(true).allow_negative_numbers(true))
                        .arg(currency_arg("from").default_value("AED")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards for a month or a year")
                .subcommand(
                    Command::new("summary")
                        .about("Income, expenses and balance in both currencies")
                        .args(period_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("categories")
                        .about("Spending by category")
                        .args(period_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("trend")
                        .about("Daily (monthly mode) or monthly (yearly mode) series")
                        .args(period_args())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("AI-generated spending insights")
                .arg(
                    Arg::new("refresh")
                        .long("refresh")
                        .action(ArgAction::SetTrue)
                        .help("Always request a new report"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(Command::new("list").about("List categories and their keys")),
        )
}
