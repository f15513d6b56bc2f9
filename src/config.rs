use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreCfg {
    pub history: String,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            history: "price-history.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsCfg {
    pub webhook: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetCfg {
    pub name: String,
    pub url: String,
    /// Currency-shape regex; falls back to the default pattern when omitted
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreCfg,
    #[serde(default)]
    pub alerts: AlertsCfg,
    pub targets: Vec<TargetCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse tracker.toml")?;
        Ok(cfg)
    }
}
