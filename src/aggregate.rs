// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period aggregation: totals, spend by category and a gap-free trend series
//! for one month or one year, all expressed in the base currency.

use crate::models::{Category, DateFilter, ExchangeRate, Transaction, TxKind, ViewMode};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
}

/// One day (monthly view) or one month (yearly view) of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBucket {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendBucket>,
}

/// Totals re-expressed in the secondary currency with a single rate snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

impl PeriodStats {
    pub fn secondary(&self, rate: ExchangeRate) -> SecondaryTotals {
        let r = rate.value();
        SecondaryTotals {
            total_income: self.total_income * r,
            total_expenses: self.total_expenses * r,
            balance: self.balance * r,
        }
    }
}

/// Number of days in a zero-based month.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (ny, nm) = if month0 >= 11 {
        (year + 1, 1)
    } else {
        (year, month0 + 2)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

fn seed_buckets(filter: &DateFilter) -> Vec<TrendBucket> {
    let labels: Vec<String> = match filter.mode {
        ViewMode::Monthly => (1..=days_in_month(filter.year, filter.month))
            .map(|d| d.to_string())
            .collect(),
        ViewMode::Yearly => MONTH_ABBREV.iter().map(|m| m.to_string()).collect(),
    };
    labels
        .into_iter()
        .map(|label| TrendBucket {
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect()
}

fn bucket_index(mode: ViewMode, date: NaiveDate) -> usize {
    match mode {
        ViewMode::Monthly => date.day0() as usize,
        ViewMode::Yearly => date.month0() as usize,
    }
}

/// Aggregates the transactions that fall inside `filter`.
///
/// Every amount is normalized to the base currency before it is summed.
/// Categories with no spend are left out of the breakdown, while the trend
/// series always has one bucket per day of the month (or per month of the
/// year) even when nothing happened in it.
pub fn aggregate(
    transactions: &[Transaction],
    filter: &DateFilter,
    rate: ExchangeRate,
) -> PeriodStats {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut by_category = [Decimal::ZERO; Category::ALL.len()];
    let mut trend = seed_buckets(filter);

    for t in transactions.iter().filter(|t| filter.contains(t.date)) {
        let amt = t.amount_in_base(rate);
        let bucket = trend.get_mut(bucket_index(filter.mode, t.date));
        match t.kind {
            TxKind::Income => {
                total_income += amt;
                if let Some(b) = bucket {
                    b.income += amt;
                }
            }
            TxKind::Expense => {
                total_expenses += amt;
                if let Some(slot) = Category::ALL.iter().position(|c| *c == t.category) {
                    by_category[slot] += amt;
                }
                if let Some(b) = bucket {
                    b.expense += amt;
                }
            }
        }
    }

    let categories = Category::ALL
        .into_iter()
        .zip(by_category)
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();

    PeriodStats {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        categories,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2023, 11), 31);
        assert_eq!(days_in_month(2023, 3), 30);
    }

    #[test]
    fn yearly_labels_are_month_abbreviations() {
        let stats = aggregate(&[], &DateFilter::yearly(2022), ExchangeRate::default());
        let labels: Vec<&str> = stats.trend.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, MONTH_ABBREV.to_vec());
    }
}
