// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::db;
use crate::insights::{GeminiProvider, InsightCache, InsightProvider};
use crate::ledger::Ledger;
use crate::models::InsightReport;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(
    conn: &Connection,
    ledger: &Ledger,
    cfg: &Config,
    m: &clap::ArgMatches,
) -> Result<()> {
    let provider = GeminiProvider::from_config(cfg)?;
    let stored = db::load_insights(conn)?;
    let mut cache = InsightCache::new(stored.clone());
    run(&mut cache, &provider, ledger, m.get_flag("refresh"));
    let report = cache.into_report();
    if report != stored {
        db::save_insights(conn, report.as_ref())?;
    }
    match &report {
        Some(r) if m.get_flag("json") => println!("{}", serde_json::to_string_pretty(r)?),
        Some(r) => print_report(r),
        None => println!("No insights available right now. Try again later."),
    }
    Ok(())
}

pub fn run<'a>(
    cache: &'a mut InsightCache,
    provider: &dyn InsightProvider,
    ledger: &Ledger,
    refresh: bool,
) -> Option<&'a InsightReport> {
    if refresh {
        cache.refresh(provider, ledger.transactions(), ledger.rate())
    } else {
        cache.get_or_fetch(provider, ledger.transactions(), ledger.rate())
    }
}

fn print_report(r: &InsightReport) {
    println!("Summary\n-------\n{}\n", r.summary);
    println!("Recommendations\n---------------");
    for (i, rec) in r.recommendations.iter().enumerate() {
        println!("{}. {}", i + 1, rec);
    }
    println!("\nSaving tips\n-----------");
    for tip in &r.saving_tips {
        println!("- {}", tip);
    }
}
