// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendwise::commands::{period_from, reports};
use spendwise::ledger::Ledger;
use spendwise::models::{DateFilter, ViewMode};
use spendwise::cli;

fn report_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("report", r)) => match r.subcommand() {
            Some((_, m)) => m.clone(),
            None => panic!("no report subcommand"),
        },
        _ => panic!("no report command"),
    }
}

#[test]
fn period_flags_map_to_zero_based_month() {
    let m = report_matches(&[
        "spendwise", "report", "summary", "--year", "2023", "--month", "10",
    ]);
    let f = period_from(&m).unwrap();
    assert_eq!(f, DateFilter::monthly(2023, 9).unwrap());

    let m = report_matches(&[
        "spendwise", "report", "trend", "--year", "2022", "--mode", "yearly",
    ]);
    let f = period_from(&m).unwrap();
    assert_eq!(f.mode, ViewMode::Yearly);
    assert_eq!(f.year, 2022);
}

#[test]
fn summary_rows_show_both_currencies() {
    let ledger = Ledger::default();
    let stats = ledger.stats(&DateFilter::monthly(2023, 9).unwrap());
    let rows = reports::summary_rows(&stats, &ledger);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].aed, Decimal::new(3000, 0));
    assert_eq!(rows[0].pkr, Decimal::new(229500, 0));
    assert_eq!(rows[1].aed, Decimal::new(16550, 2));
    assert_eq!(rows[2].aed, Decimal::new(283450, 2));
    assert_eq!(rows[2].pkr, rows[2].aed * ledger.rate().value());
}

#[test]
fn category_rows_with_shares() {
    let ledger = Ledger::default();
    let stats = ledger.stats(&DateFilter::yearly(2023));
    let rows = reports::category_rows(&stats);
    let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(names, vec!["Food & Dining", "Transportation"]);
    // 120.50 / 165.50 and 45 / 165.50
    assert_eq!(rows[0].share_pct, Decimal::new(728, 1));
    assert_eq!(rows[1].share_pct, Decimal::new(272, 1));
}

#[test]
fn empty_period_has_no_category_rows() {
    let ledger = Ledger::default();
    let stats = ledger.stats(&DateFilter::monthly(2023, 10).unwrap());
    assert!(reports::category_rows(&stats).is_empty());
    assert_eq!(stats.trend.len(), 30);
}

#[test]
fn yearly_mode_ignores_month_flag() {
    let m = report_matches(&[
        "spendwise", "report", "summary", "--year", "2023", "--mode", "yearly", "--month", "13",
    ]);
    assert_eq!(period_from(&m).unwrap(), DateFilter::yearly(2023));

    let m = report_matches(&[
        "spendwise", "report", "summary", "--year", "2023", "--month", "13",
    ]);
    assert!(period_from(&m).is_err());
}
