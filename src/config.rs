// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime settings read from the environment (a `.env` file is honoured).
//!
//! | Variable                      | Default                    |
//! |-------------------------------|----------------------------|
//! | `SPENDWISE_DB`                | platform data dir          |
//! | `GEMINI_API_KEY` / `API_KEY`  | unset (insights disabled)  |
//! | `SPENDWISE_MODEL`             | `gemini-3-flash-preview`   |
//! | `SPENDWISE_HTTP_TIMEOUT_SECS` | `15`                       |

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let http_timeout = match get("SPENDWISE_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid SPENDWISE_HTTP_TIMEOUT_SECS");
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Config {
            db_path: get("SPENDWISE_DB").map(PathBuf::from),
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("SPENDWISE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_timeout,
        }
    }
}
