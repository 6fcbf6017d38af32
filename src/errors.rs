// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the domain layer before anything reaches storage.
#[derive(Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("Amount must be greater than zero and at most 1000000000000 (got {0})")]
    InvalidAmount(Decimal),

    #[error("Description is required")]
    MissingDescription,

    #[error("Exchange rate must be greater than zero and at most 1000000 (got {0})")]
    InvalidRate(Decimal),

    #[error("Invalid month {0}")]
    InvalidMonth(u32),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown currency '{0}', expected AED or PKR")]
    UnknownCurrency(String),

    #[error("Unknown transaction type '{0}', expected expense or income")]
    UnknownKind(String),

    #[error("Unknown view mode '{0}', expected monthly or yearly")]
    UnknownMode(String),

    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
