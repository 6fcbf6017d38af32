// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{aggregate, PeriodStats};
use crate::errors::{FinanceError, Result};
use crate::models::{
    seed_transactions, Category, DateFilter, ExchangeRate, ExchangeSettings, NewTransaction,
    Transaction,
};
use chrono::Utc;
use tracing::debug;

/// Options for browsing transaction history.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// `None` shows all history regardless of date.
    pub period: Option<DateFilter>,
    pub search: Option<String>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

/// Application state: the transaction list (newest entry first) and the
/// exchange settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    exchange: ExchangeSettings,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            transactions: seed_transactions(),
            exchange: ExchangeSettings::default(),
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..9].to_string()
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, exchange: ExchangeSettings) -> Self {
        Ledger {
            transactions,
            exchange,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn exchange(&self) -> &ExchangeSettings {
        &self.exchange
    }

    pub fn rate(&self) -> ExchangeRate {
        self.exchange.rate
    }

    pub fn add(&mut self, input: NewTransaction) -> Result<&Transaction> {
        let mut id = new_id();
        while self.transactions.iter().any(|t| t.id == id) {
            id = new_id();
        }
        let tx = input.into_transaction(id)?;
        debug!(id = %tx.id, amount = %tx.amount, currency = %tx.currency, "transaction added");
        self.transactions.insert(0, tx);
        Ok(&self.transactions[0])
    }

    pub fn delete(&mut self, id: &str) -> Result<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FinanceError::TransactionNotFound(id.to_string()))?;
        let removed = self.transactions.remove(pos);
        debug!(id, "transaction deleted");
        Ok(removed)
    }

    pub fn set_rate(&mut self, rate: ExchangeRate) {
        self.exchange = ExchangeSettings {
            rate,
            last_updated: Utc::now(),
        };
    }

    pub fn stats(&self, filter: &DateFilter) -> PeriodStats {
        aggregate(&self.transactions, filter, self.exchange.rate)
    }

    /// Matching transactions, most recent date first.
    pub fn query(&self, q: &HistoryQuery) -> Vec<&Transaction> {
        let needle = q.search.as_ref().map(|s| s.to_lowercase());
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| q.period.is_none_or(|p| p.contains(t.date)))
            .filter(|t| {
                needle
                    .as_deref()
                    .is_none_or(|n| t.description.to_lowercase().contains(n))
            })
            .filter(|t| q.category.is_none_or(|c| c == t.category))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = q.limit {
            rows.truncate(limit);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TxKind};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn input(amount: i64, description: &str) -> NewTransaction {
        NewTransaction {
            amount: Decimal::new(amount, 0),
            currency: Currency::Pkr,
            category: Category::Shopping,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            kind: TxKind::Expense,
        }
    }

    #[test]
    fn add_prepends_with_fresh_id() {
        let mut ledger = Ledger::default();
        let id = ledger.add(input(500, "Shoes")).unwrap().id.clone();
        assert_eq!(ledger.transactions().len(), 4);
        assert_eq!(ledger.transactions()[0].id, id);
        assert_eq!(id.len(), 9);
    }

    #[test]
    fn invalid_input_never_stored() {
        let mut ledger = Ledger::default();
        assert!(ledger.add(input(0, "Nothing")).is_err());
        assert!(ledger.add(input(10, "")).is_err());
        assert_eq!(ledger.transactions().len(), 3);
    }

    #[test]
    fn delete_unknown_id_is_error() {
        let mut ledger = Ledger::default();
        assert_eq!(
            ledger.delete("nope"),
            Err(FinanceError::TransactionNotFound("nope".into()))
        );
    }

    #[test]
    fn set_rate_updates_timestamp() {
        let mut ledger = Ledger::default();
        let before = ledger.exchange().last_updated;
        let rate = ExchangeRate::new(Decimal::new(80, 0)).unwrap();
        ledger.set_rate(rate);
        assert_eq!(ledger.rate(), rate);
        assert!(ledger.exchange().last_updated >= before);
    }
}
