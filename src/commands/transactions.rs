// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_from;
use crate::db;
use crate::ledger::{HistoryQuery, Ledger};
use crate::models::{Category, Currency, NewTransaction, Transaction, TxKind};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, round_money};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => remove(conn, ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn new_transaction_from(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount = parse_decimal(sub.get_one::<String>("amount").map_or("", String::as_str))?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    let currency = match sub.get_one::<String>("currency") {
        Some(c) => c.parse::<Currency>()?,
        None => Currency::BASE,
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<Category>()?,
        None => Category::Food,
    };
    let kind = match sub.get_one::<String>("type") {
        Some(k) => k.parse::<TxKind>()?,
        None => TxKind::Expense,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    Ok(NewTransaction {
        amount,
        currency,
        category,
        description,
        date,
        kind,
    })
}

fn add(conn: &Connection, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let input = new_transaction_from(sub)?;
    let tx = ledger.add(input)?.clone();
    db::save_transactions(conn, ledger.transactions())?;
    println!(
        "Recorded {} {} {} on {} '{}' [{}] (id: {})",
        tx.kind.as_str(),
        tx.currency,
        tx.amount,
        tx.date,
        tx.description,
        tx.category,
        tx.id
    );
    Ok(())
}

fn remove(conn: &Connection, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map_or("", String::as_str);
    let removed = ledger.delete(id)?;
    db::save_transactions(conn, ledger.transactions())?;
    println!("Deleted '{}' ({})", removed.description, removed.id);
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount_aed.clone(),
                    r.amount_pkr.clone(),
                    r.currency.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "AED", "PKR", "Entered in"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub amount_aed: String,
    pub amount_pkr: String,
}

fn signed(t: &Transaction, amount: rust_decimal::Decimal, ccy: Currency) -> String {
    format!(
        "{}{:.*}",
        t.kind.sign(),
        ccy.decimals() as usize,
        round_money(amount, ccy)
    )
}

pub fn history_query_from(sub: &clap::ArgMatches) -> Result<HistoryQuery> {
    let period = if sub.get_flag("all") {
        None
    } else {
        Some(period_from(sub)?)
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => Some(c.parse::<Category>()?),
        None => None,
    };
    Ok(HistoryQuery {
        period,
        search: sub.get_one::<String>("search").cloned(),
        category,
        limit: sub.get_one::<usize>("limit").copied(),
    })
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let q = history_query_from(sub)?;
    let rate = ledger.rate();
    Ok(ledger
        .query(&q)
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.kind.as_str().to_string(),
            category: t.category.to_string(),
            description: t.description.clone(),
            amount: t.amount.to_string(),
            currency: t.currency.to_string(),
            amount_aed: signed(t, t.amount_in_base(rate), Currency::Aed),
            amount_pkr: signed(t, t.amount_in_secondary(rate), Currency::Pkr),
        })
        .collect())
}
