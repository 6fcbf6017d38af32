// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendwise::commands::fx;
use spendwise::models::{Currency, ExchangeRate};
use spendwise::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn convert_both_directions() {
    let rate = ExchangeRate::new(Decimal::new(765, 1)).unwrap();
    let (to, pkr) = fx::convert(rate, Decimal::new(2, 0), Currency::Aed);
    assert_eq!(to, Currency::Pkr);
    assert_eq!(format!("{:.2}", pkr), "153.00");

    // 76.5 PKR is one dirham
    let (to, aed) = fx::convert(rate, Decimal::new(765, 1), Currency::Pkr);
    assert_eq!(to, Currency::Aed);
    assert_eq!(format!("{:.2}", aed.round_dp(2)), "1.00");
}

#[test]
fn set_rate_persists_settings() {
    let conn = setup();
    let mut ledger = db::load_ledger(&conn).unwrap();
    let matches = cli::build_cli().get_matches_from(["spendwise", "rate", "set", "80.25"]);
    if let Some(("rate", rate_m)) = matches.subcommand() {
        fx::handle(&conn, &mut ledger, rate_m).unwrap();
    } else {
        panic!("no rate subcommand");
    }
    let stored = db::load_exchange(&conn).unwrap();
    assert_eq!(stored.rate.value(), Decimal::new(8025, 2));
    assert_eq!(stored, *ledger.exchange());
}

#[test]
fn set_rate_rejects_non_positive() {
    let conn = setup();
    let mut ledger = db::load_ledger(&conn).unwrap();
    for bad in ["0", "-3", "abc"] {
        let matches = cli::build_cli().get_matches_from(["spendwise", "rate", "set", bad]);
        if let Some(("rate", rate_m)) = matches.subcommand() {
            assert!(fx::handle(&conn, &mut ledger, rate_m).is_err(), "{}", bad);
        }
    }
    assert_eq!(ledger.rate(), ExchangeRate::default());
    assert!(db::get_value(&conn, db::EXCHANGE_KEY).unwrap().is_none());
}
