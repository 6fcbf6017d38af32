// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::Ledger;
use crate::models::{Currency, ExchangeRate};
use crate::utils::{fmt_money, parse_decimal};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let ex = ledger.exchange();
            println!(
                "1 AED = {} PKR (updated {})",
                ex.rate,
                ex.last_updated.format("%Y-%m-%d %H:%M UTC")
            );
        }
        Some(("set", sub)) => {
            let raw = sub.get_one::<String>("rate").map_or("", String::as_str);
            let rate = ExchangeRate::new(parse_decimal(raw)?)?;
            ledger.set_rate(rate);
            db::save_exchange(conn, ledger.exchange())?;
            println!("Exchange rate set: 1 AED = {} PKR", rate);
        }
        Some(("convert", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").map_or("", String::as_str))?;
            let from = match sub.get_one::<String>("from") {
                Some(c) => c.parse::<Currency>()?,
                None => Currency::BASE,
            };
            let (to, res) = convert(ledger.rate(), amount, from);
            println!("{} -> {}", fmt_money(amount, from), fmt_money(res, to));
        }
        _ => {}
    }
    Ok(())
}

/// Converts into whichever of the two currencies `from` is not.
pub fn convert(rate: ExchangeRate, amount: Decimal, from: Currency) -> (Currency, Decimal) {
    match from {
        Currency::Aed => (Currency::Pkr, rate.to_secondary(amount, from)),
        Currency::Pkr => (Currency::Aed, rate.to_base(amount, from)),
    }
}
