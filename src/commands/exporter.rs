// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::Transaction;
use anyhow::{bail, Context, Result};
use serde_json::json;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map_or("csv", String::as_str)
        .to_lowercase();
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?;

    let rate = ledger.rate();
    let mut rows: Vec<&Transaction> = ledger.transactions().iter().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "category",
                "description",
                "amount",
                "currency",
                "amount_aed",
            ])?;
            for t in rows {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.category.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.currency.to_string(),
                    t.amount_in_base(rate).round_dp(2).to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date.to_string(),
                        "type": t.kind.as_str(),
                        "category": t.category.label(),
                        "description": t.description,
                        "amount": t.amount.to_string(),
                        "currency": t.currency.code(),
                        "amount_aed": t.amount_in_base(rate).round_dp(2).to_string(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
