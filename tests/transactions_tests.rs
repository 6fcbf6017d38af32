// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendwise::{cli, commands::transactions, db, ledger::Ledger};

fn setup() -> (Connection, Ledger) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let ledger = db::load_ledger(&conn).unwrap();
    (conn, ledger)
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some((_, m)) => m.clone(),
            None => panic!("no tx subcommand"),
        },
        _ => panic!("no tx command"),
    }
}

#[test]
fn add_persists_and_prepends() {
    let (conn, mut ledger) = setup();
    let args = [
        "spendwise",
        "tx",
        "add",
        "--amount",
        "765",
        "--currency",
        "PKR",
        "--category",
        "health",
        "--type",
        "expense",
        "--date",
        "2023-10-20",
        "--description",
        "Pharmacy",
    ];
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, &mut ledger, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
    assert_eq!(ledger.transactions().len(), 4);
    assert_eq!(ledger.transactions()[0].description, "Pharmacy");

    let stored = db::load_transactions(&conn).unwrap();
    assert_eq!(stored, ledger.transactions());

    let oct = ledger.stats(&spendwise::models::DateFilter::monthly(2023, 9).unwrap());
    // 120.50 + 45 + 765 PKR (10 AED)
    assert_eq!(oct.total_expenses, Decimal::new(17550, 2));
}

#[test]
fn add_rejects_non_positive_amount() {
    let (conn, mut ledger) = setup();
    let m = sub_matches(&[
        "spendwise", "tx", "add", "--amount", "0", "--description", "Nothing",
    ]);
    let input = transactions::new_transaction_from(&m).unwrap();
    assert!(ledger.add(input).is_err());
    assert_eq!(ledger.transactions().len(), 3);
    assert!(db::get_value(&conn, db::TRANSACTIONS_KEY).unwrap().is_none());
}

#[test]
fn rm_deletes_exactly_one() {
    let (conn, mut ledger) = setup();
    let matches = cli::build_cli().get_matches_from(["spendwise", "tx", "rm", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, &mut ledger, tx_m).unwrap();
    }
    let ids: Vec<String> = db::load_transactions(&conn)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["1", "3"]);

    let matches = cli::build_cli().get_matches_from(["spendwise", "tx", "rm", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(transactions::handle(&conn, &mut ledger, tx_m).is_err());
    }
}

#[test]
fn list_period_sorted_newest_first() {
    let (_conn, ledger) = setup();
    let m = sub_matches(&[
        "spendwise", "tx", "list", "--year", "2023", "--month", "10",
    ]);
    let rows = transactions::query_rows(&ledger, &m).unwrap();
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2023-10-25", "2023-10-24", "2023-10-01"]);
    assert_eq!(rows[0].amount_aed, "-120.50");
    assert_eq!(rows[0].amount_pkr, "-9218");
    assert_eq!(rows[2].amount_aed, "+3000.00");
    assert_eq!(rows[2].amount_pkr, "+229500");
}

#[test]
fn list_other_month_is_empty_unless_all() {
    let (_conn, ledger) = setup();
    let m = sub_matches(&[
        "spendwise", "tx", "list", "--year", "2023", "--month", "11",
    ]);
    assert!(transactions::query_rows(&ledger, &m).unwrap().is_empty());

    let m = sub_matches(&["spendwise", "tx", "list", "--all", "--limit", "2"]);
    let rows = transactions::query_rows(&ledger, &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2023-10-25");
}

#[test]
fn list_search_and_category() {
    let (_conn, ledger) = setup();
    let m = sub_matches(&["spendwise", "tx", "list", "--all", "--search", "GAS"]);
    let rows = transactions::query_rows(&ledger, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "2");

    let m = sub_matches(&[
        "spendwise",
        "tx",
        "list",
        "--year",
        "2023",
        "--mode",
        "yearly",
        "--category",
        "Others",
    ]);
    let rows = transactions::query_rows(&ledger, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Monthly Salary");
}

#[test]
fn list_rejects_bad_month() {
    let (_conn, ledger) = setup();
    let m = sub_matches(&["spendwise", "tx", "list", "--month", "13"]);
    assert!(transactions::query_rows(&ledger, &m).is_err());
}
