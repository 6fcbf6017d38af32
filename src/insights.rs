// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Narrative spending insights from a generative model.
//!
//! Aggregation never depends on this module. Providers swallow every failure
//! and report it as "no insights".

use crate::config::Config;
use crate::models::{Currency, ExchangeRate, InsightReport, Transaction};
use crate::utils::{fmt_money, http_client};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub trait InsightProvider {
    /// Returns `None` on any failure; must not panic.
    fn fetch_insights(
        &self,
        transactions: &[Transaction],
        rate: ExchangeRate,
    ) -> Option<InsightReport>;
}

/// One line per transaction, each amount shown natively and approximately
/// in the other currency.
pub fn transaction_context(transactions: &[Transaction], rate: ExchangeRate) -> String {
    transactions
        .iter()
        .map(|t| {
            let approx = match t.currency {
                Currency::Aed => fmt_money(t.amount_in_secondary(rate), Currency::Pkr),
                Currency::Pkr => fmt_money(t.amount_in_base(rate), Currency::Aed),
            };
            format!(
                "{}: {}{} {} (Approx: {}) - {}: {}",
                t.date,
                t.kind.sign(),
                t.currency,
                t.amount.normalize(),
                approx,
                t.category,
                t.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(transactions: &[Transaction], rate: ExchangeRate) -> String {
    format!(
        "Analyze the following dual-currency (AED and PKR) transaction history.\n\
         The current exchange rate is 1 AED = {rate} PKR.\n\
         Provide financial insights. Help the user understand their spending patterns in both currencies if relevant.\n\n\
         Transactions:\n{}",
        transaction_context(transactions, rate)
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A high-level summary of the spending habits."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Actionable recommendations to improve financial health."
            },
            "savingTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Specific tips on how to save money based on categories."
            }
        },
        "required": ["summary", "recommendations", "savingTips"]
    })
}

pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text of the first candidate.
pub fn extract_text(body: &str) -> Result<String> {
    let resp: GenerateResponse =
        serde_json::from_str(body).context("Unexpected generateContent response")?;
    let content = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .context("Response has no candidates")?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        anyhow::bail!("Response candidate has no text");
    }
    Ok(text)
}

pub fn parse_report(text: &str) -> Option<InsightReport> {
    match serde_json::from_str::<InsightReport>(text.trim()) {
        Ok(r) => Some(r),
        Err(e) => {
            warn!(error = %e, "model returned malformed insight report");
            None
        }
    }
}

pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(GeminiProvider {
            client: http_client(cfg.http_timeout)?,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        debug!(%url, "requesting insights");
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt))
            .send()?
            .error_for_status()?;
        extract_text(&resp.text()?)
    }
}

impl InsightProvider for GeminiProvider {
    fn fetch_insights(
        &self,
        transactions: &[Transaction],
        rate: ExchangeRate,
    ) -> Option<InsightReport> {
        let Some(key) = self.api_key.as_deref() else {
            warn!("no API key configured, skipping insights");
            return None;
        };
        match self.generate(key, &build_prompt(transactions, rate)) {
            Ok(text) => parse_report(&text),
            Err(e) => {
                let msg = format!("{e:#}");
                warn!(error = %msg, "insight request failed");
                None
            }
        }
    }
}

/// Last report received, kept until explicitly refreshed.
#[derive(Debug, Clone, Default)]
pub struct InsightCache {
    report: Option<InsightReport>,
}

impl InsightCache {
    /// Starts from a previously stored snapshot.
    pub fn new(report: Option<InsightReport>) -> Self {
        InsightCache { report }
    }

    pub fn into_report(self) -> Option<InsightReport> {
        self.report
    }

    pub fn report(&self) -> Option<&InsightReport> {
        self.report.as_ref()
    }

    /// Asks the provider only when nothing is cached and there is data to analyse.
    pub fn get_or_fetch(
        &mut self,
        provider: &dyn InsightProvider,
        transactions: &[Transaction],
        rate: ExchangeRate,
    ) -> Option<&InsightReport> {
        if self.report.is_none() && !transactions.is_empty() {
            self.report = provider.fetch_insights(transactions, rate);
        }
        self.report.as_ref()
    }

    /// Replaces the snapshot with a fresh report. With no transactions the
    /// provider is not called and the snapshot is left as is.
    pub fn refresh(
        &mut self,
        provider: &dyn InsightProvider,
        transactions: &[Transaction],
        rate: ExchangeRate,
    ) -> Option<&InsightReport> {
        if transactions.is_empty() {
            return self.report.as_ref();
        }
        self.report = provider.fetch_insights(transactions, rate);
        self.report.as_ref()
    }
}
