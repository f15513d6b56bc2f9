//! Common types used across the application

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One tracked listing source, configured at startup
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub pattern: Regex,
}

/// One dated measurement of a target's prices and promotional state.
/// Immutable once appended to history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub apartment: String,
    pub date: NaiveDate,
    #[serde(rename = "minPrice")]
    pub min_price: u32,
    #[serde(rename = "maxPrice")]
    pub max_price: u32,
    pub special: Option<String>,
    #[serde(rename = "available1BR")]
    pub available_units: u32,
}

/// Durable append-only record of everything observed so far. Records and
/// alerts only ever grow; loaded once per run, persisted once at the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub records: Vec<Observation>,
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl History {
    /// Most recent observation for an apartment: maximum by calendar date,
    /// same-date ties broken by latest insertion order.
    pub fn latest_for(&self, apartment: &str) -> Option<&Observation> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.apartment == apartment)
            .max_by_key(|(idx, r)| (r.date, *idx))
            .map(|(_, r)| r)
    }
}
