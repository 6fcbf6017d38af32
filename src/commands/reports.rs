// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::PeriodStats;
use crate::commands::period_from;
use crate::ledger::Ledger;
use crate::models::{Currency, DateFilter};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, round_money};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("categories", sub)) => categories(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub line: String,
    pub aed: Decimal,
    pub pkr: Decimal,
}

/// Income, expenses and balance; PKR is derived from the AED totals.
pub fn summary_rows(stats: &PeriodStats, ledger: &Ledger) -> Vec<SummaryRow> {
    let sec = stats.secondary(ledger.rate());
    vec![
        SummaryRow {
            line: "Total income".into(),
            aed: stats.total_income,
            pkr: sec.total_income,
        },
        SummaryRow {
            line: "Total expenses".into(),
            aed: stats.total_expenses,
            pkr: sec.total_expenses,
        },
        SummaryRow {
            line: "Balance".into(),
            aed: stats.balance,
            pkr: sec.balance,
        },
    ]
}

fn header(filter: &DateFilter, ledger: &Ledger) {
    println!("{} (1 AED = {} PKR)", filter.label(), ledger.rate());
}

fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let filter = period_from(sub)?;
    let stats = ledger.stats(&filter);
    let data = summary_rows(&stats, ledger);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        header(&filter, ledger);
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.line.clone(),
                    fmt_money(r.aed, Currency::Aed),
                    fmt_money(r.pkr, Currency::Pkr),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "AED", "PKR"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub aed: Decimal,
    pub share_pct: Decimal,
}

pub fn category_rows(stats: &PeriodStats) -> Vec<CategoryRow> {
    stats
        .categories
        .iter()
        .map(|c| CategoryRow {
            category: c.category.to_string(),
            aed: c.amount,
            share_pct: if stats.total_expenses.is_zero() {
                Decimal::ZERO
            } else {
                (c.amount / stats.total_expenses * Decimal::ONE_HUNDRED).round_dp(1)
            },
        })
        .collect()
}

fn categories(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let filter = period_from(sub)?;
    let stats = ledger.stats(&filter);
    let data = category_rows(&stats);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        header(&filter, ledger);
        if data.is_empty() {
            println!("No spending in this period.");
            return Ok(());
        }
        let rate = ledger.rate();
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_money(r.aed, Currency::Aed),
                    fmt_money(rate.to_secondary(r.aed, Currency::Aed), Currency::Pkr),
                    format!("{}%", r.share_pct),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent (AED)", "Spent (PKR)", "Share"], rows)
        );
    }
    Ok(())
}

fn trend(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let filter = period_from(sub)?;
    let stats = ledger.stats(&filter);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats.trend)? {
        header(&filter, ledger);
        let rows = stats
            .trend
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    format!("{:.2}", round_money(b.income, Currency::Aed)),
                    format!("{:.2}", round_money(b.expense, Currency::Aed)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Period", "Income (AED)", "Expense (AED)"], rows)
        );
    }
    Ok(())
}
