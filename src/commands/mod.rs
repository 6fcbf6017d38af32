// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod exporter;
pub mod fx;
pub mod insights;
pub mod reports;
pub mod transactions;

use crate::models::{DateFilter, ViewMode};
use crate::utils::parse_month;
use anyhow::Result;

/// Reads `--year/--month/--mode`, defaulting to the current month.
pub fn period_from(sub: &clap::ArgMatches) -> Result<DateFilter> {
    let current = DateFilter::current();
    let year = sub.get_one::<i32>("year").copied().unwrap_or(current.year);
    let mode = match sub.get_one::<String>("mode") {
        Some(m) => m.parse::<ViewMode>()?,
        None => ViewMode::Monthly,
    };
    if mode == ViewMode::Yearly {
        return Ok(DateFilter::yearly(year));
    }
    let month = match sub.get_one::<u32>("month") {
        Some(m) => parse_month(*m)?,
        None => current.month,
    };
    Ok(DateFilter::new(year, month, mode)?)
}
