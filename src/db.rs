// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{
    amount_in_range, seed_transactions, ExchangeSettings, InsightReport, Transaction,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "SpendWise", "spendwise"));

pub const TRANSACTIONS_KEY: &str = "spendwise_transactions";
pub const EXCHANGE_KEY: &str = "spendwise_exchange";
/// Last insight report. A cache, not part of the ledger state.
pub const INSIGHTS_KEY: &str = "spendwise_insights";

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let Some(raw) = get_value(conn, key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(key, error = %e, "stored value is malformed, using defaults");
            Ok(None)
        }
    }
}

/// Stored transactions, or the seed data when nothing usable is stored.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let Some(list) = load_json::<Vec<Transaction>>(conn, TRANSACTIONS_KEY)? else {
        return Ok(seed_transactions());
    };
    Ok(list
        .into_iter()
        .filter(|t| {
            let ok = amount_in_range(t.amount);
            if !ok {
                warn!(id = %t.id, amount = %t.amount, "dropping stored transaction with out-of-range amount");
            }
            ok
        })
        .collect())
}

pub fn save_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<()> {
    set_value(conn, TRANSACTIONS_KEY, &serde_json::to_string(transactions)?)
}

pub fn load_exchange(conn: &Connection) -> Result<ExchangeSettings> {
    Ok(load_json(conn, EXCHANGE_KEY)?.unwrap_or_default())
}

pub fn save_exchange(conn: &Connection, settings: &ExchangeSettings) -> Result<()> {
    set_value(conn, EXCHANGE_KEY, &serde_json::to_string(settings)?)
}

pub fn load_insights(conn: &Connection) -> Result<Option<InsightReport>> {
    Ok(load_json::<Option<InsightReport>>(conn, INSIGHTS_KEY)?.flatten())
}

pub fn save_insights(conn: &Connection, report: Option<&InsightReport>) -> Result<()> {
    set_value(conn, INSIGHTS_KEY, &serde_json::to_string(&report)?)
}

pub fn load_ledger(conn: &Connection) -> Result<Ledger> {
    Ok(Ledger::new(load_transactions(conn)?, load_exchange(conn)?))
}
