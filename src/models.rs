// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::FinanceError;
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "AED")]
    Aed,
    #[serde(rename = "PKR")]
    Pkr,
}

impl Currency {
    /// Totals are always computed in this currency.
    pub const BASE: Currency = Currency::Aed;
    pub const SECONDARY: Currency = Currency::Pkr;

    pub fn code(self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Pkr => "PKR",
        }
    }

    /// Display precision: dirhams keep fils, rupees are shown whole.
    pub fn decimals(self) -> u32 {
        match self {
            Currency::Aed => 2,
            Currency::Pkr => 0,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AED" => Ok(Currency::Aed),
            "PKR" => Ok(Currency::Pkr),
            _ => Err(FinanceError::UnknownCurrency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    Food,
    #[serde(rename = "Transportation")]
    Transport,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Utilities & Bills")]
    Utilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Health & Fitness")]
    Health,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Others")]
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Housing,
        Category::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities & Bills",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health & Fitness",
            Category::Housing => "Housing",
            Category::Others => "Others",
        }
    }

    /// Short name accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Housing => "housing",
            Category::Others => "others",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Food => "#f87171",
            Category::Transport => "#60a5fa",
            Category::Shopping => "#fbbf24",
            Category::Utilities => "#34d399",
            Category::Entertainment => "#a78bfa",
            Category::Health => "#f472b6",
            Category::Housing => "#94a3b8",
            Category::Others => "#d1d5db",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == needle || c.label().to_lowercase() == needle)
            .ok_or_else(|| FinanceError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Expense,
    Income,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Expense => "expense",
            TxKind::Income => "income",
        }
    }

    pub fn sign(self) -> char {
        match self {
            TxKind::Expense => '-',
            TxKind::Income => '+',
        }
    }
}

impl FromStr for TxKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(TxKind::Expense),
            "income" => Ok(TxKind::Income),
            _ => Err(FinanceError::UnknownKind(s.to_string())),
        }
    }
}

/// Largest amount a single transaction may carry, in its own currency (10^12).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Upper bound on PKR per AED.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Stored as a JSON number, so values past f64 precision (about 15
    /// significant digits) do not survive a save and reload exactly.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    // Records written before dual-currency support carry no currency.
    #[serde(default)]
    pub currency: Currency,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
}

impl Transaction {
    pub fn amount_in_base(&self, rate: ExchangeRate) -> Decimal {
        rate.to_base(self.amount, self.currency)
    }

    pub fn amount_in_secondary(&self, rate: ExchangeRate) -> Decimal {
        rate.to_secondary(self.amount, self.currency)
    }
}

pub fn amount_in_range(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

/// User input for a transaction that has not been validated or given an id yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub currency: Currency,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TxKind,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), FinanceError> {
        if !amount_in_range(self.amount) {
            return Err(FinanceError::InvalidAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(FinanceError::MissingDescription);
        }
        Ok(())
    }

    pub fn into_transaction(self, id: String) -> Result<Transaction, FinanceError> {
        self.validate()?;
        Ok(Transaction {
            id,
            amount: self.amount,
            currency: self.currency,
            category: self.category,
            description: self.description.trim().to_string(),
            date: self.date,
            kind: self.kind,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Monthly,
    Yearly,
}

impl FromStr for ViewMode {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(ViewMode::Monthly),
            "yearly" | "year" => Ok(ViewMode::Yearly),
            _ => Err(FinanceError::UnknownMode(s.to_string())),
        }
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Selects the period a dashboard or history view covers.
///
/// `month` is zero-based (0 = January) and only consulted in monthly mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilter {
    pub year: i32,
    pub month: u32,
    pub mode: ViewMode,
}

impl DateFilter {
    pub fn new(year: i32, month: u32, mode: ViewMode) -> Result<Self, FinanceError> {
        if month > 11 {
            return Err(FinanceError::InvalidMonth(month));
        }
        Ok(DateFilter { year, month, mode })
    }

    pub fn monthly(year: i32, month: u32) -> Result<Self, FinanceError> {
        Self::new(year, month, ViewMode::Monthly)
    }

    pub fn yearly(year: i32) -> Self {
        DateFilter {
            year,
            month: 0,
            mode: ViewMode::Yearly,
        }
    }

    /// Current local month, the starting view of the dashboard.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        DateFilter {
            year: today.year(),
            month: today.month0(),
            mode: ViewMode::Monthly,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.mode {
            ViewMode::Monthly => date.year() == self.year && date.month0() == self.month,
            ViewMode::Yearly => date.year() == self.year,
        }
    }

    pub fn label(&self) -> String {
        match self.mode {
            ViewMode::Monthly => format!("{} {}", MONTH_NAMES[self.month as usize], self.year),
            ViewMode::Yearly => format!("FY {}", self.year),
        }
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::current()
    }
}

/// Units of PKR per one AED, in `(0, MAX_RATE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Result<Self, FinanceError> {
        if rate <= Decimal::ZERO || rate > MAX_RATE {
            return Err(FinanceError::InvalidRate(rate));
        }
        Ok(ExchangeRate(rate))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn to_base(self, amount: Decimal, from: Currency) -> Decimal {
        match from {
            Currency::Aed => amount,
            Currency::Pkr => amount / self.0,
        }
    }

    pub fn to_secondary(self, amount: Decimal, from: Currency) -> Decimal {
        match from {
            Currency::Pkr => amount,
            Currency::Aed => amount * self.0,
        }
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate(Decimal::new(765, 1))
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<f64> for ExchangeRate {
    type Error = FinanceError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        let d = Decimal::try_from(v).map_err(|_| FinanceError::InvalidRate(Decimal::ZERO))?;
        ExchangeRate::new(d)
    }
}

impl From<ExchangeRate> for f64 {
    fn from(r: ExchangeRate) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        r.0.to_f64().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSettings {
    #[serde(alias = "aedToPkr")]
    pub rate: ExchangeRate,
    pub last_updated: DateTime<Utc>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        ExchangeSettings {
            rate: ExchangeRate::default(),
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub saving_tips: Vec<String>,
}

/// The three sample records a fresh install starts with.
pub fn seed_transactions() -> Vec<Transaction> {
    let seed = [
        ("1", 12050, Category::Food, "Weekly Grocery", (2023, 10, 25), TxKind::Expense),
        ("2", 4500, Category::Transport, "Gas refill", (2023, 10, 24), TxKind::Expense),
        ("3", 300000, Category::Others, "Monthly Salary", (2023, 10, 1), TxKind::Income),
    ];
    seed.into_iter()
        .filter_map(|(id, cents, category, description, (y, m, d), kind)| {
            Some(Transaction {
                id: id.to_string(),
                amount: Decimal::new(cents, 2),
                currency: Currency::Aed,
                category,
                description: description.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_key_and_label() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(
            "utilities & bills".parse::<Category>().unwrap(),
            Category::Utilities
        );
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn transaction_without_currency_defaults_to_base() {
        let raw = r#"{"id":"9","amount":12.5,"category":"Housing","description":"Rent","date":"2024-02-01","type":"expense"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.currency, Currency::Aed);
        assert_eq!(tx.amount, Decimal::new(125, 1));
        assert_eq!(tx.kind, TxKind::Expense);
    }

    #[test]
    fn exchange_settings_accept_legacy_field() {
        let raw = r#"{"aedToPkr":80,"lastUpdated":"2024-01-01T00:00:00.000Z"}"#;
        let s: ExchangeSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(s.rate.value(), Decimal::new(80, 0));
    }

    #[test]
    fn non_positive_rate_rejected() {
        assert!(ExchangeRate::new(Decimal::ZERO).is_err());
        assert!(ExchangeRate::new(MAX_RATE).is_ok());
        assert!(ExchangeRate::new(MAX_RATE + Decimal::ONE).is_err());
        assert!(serde_json::from_str::<ExchangeRate>("-1").is_err());
    }

    #[test]
    fn bounds_are_round_numbers() {
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000, 0));
        assert_eq!(MAX_RATE, Decimal::new(1_000_000, 0));
    }

    #[test]
    fn month_out_of_range_rejected() {
        assert_eq!(
            DateFilter::monthly(2024, 12),
            Err(FinanceError::InvalidMonth(12))
        );
    }

    #[test]
    fn new_transaction_validation() {
        let mut n = NewTransaction {
            amount: Decimal::ZERO,
            currency: Currency::Aed,
            category: Category::Food,
            description: "Lunch".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            kind: TxKind::Expense,
        };
        assert!(matches!(n.validate(), Err(FinanceError::InvalidAmount(_))));
        n.amount = MAX_AMOUNT + Decimal::ONE;
        assert!(matches!(n.validate(), Err(FinanceError::InvalidAmount(_))));
        n.amount = MAX_AMOUNT;
        assert!(n.validate().is_ok());
        n.amount = Decimal::ONE;
        n.description = "   ".into();
        assert_eq!(n.validate(), Err(FinanceError::MissingDescription));
    }
}
