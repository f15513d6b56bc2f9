// src/app.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::change::ChangeDetector;
use crate::domain::extract::extract_prices;
use crate::domain::specials::SpecialDetector;
use crate::infrastructure::fetcher::{HttpPageFetcher, PageFetcher};
use crate::infrastructure::store::{FileHistoryStore, HistoryStore};
use crate::infrastructure::webhook::AlertDispatcher;
use crate::shared::types::{History, Observation, Target};

/// Currency shape used when a target does not carry its own pattern
pub const DEFAULT_PRICE_PATTERN: &str = r"\$[\d,]+(?:\.\d{2})?";

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub history_path: PathBuf,
    pub webhook_url: Option<String>,
    pub targets: Vec<Target>,
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Result<Self> {
        let mut targets = Vec::with_capacity(cfg.targets.len());
        for t in cfg.targets {
            let raw = t.pattern.as_deref().unwrap_or(DEFAULT_PRICE_PATTERN);
            let pattern = Regex::new(raw)
                .with_context(|| format!("invalid price pattern for target {}", t.name))?;
            targets.push(Target {
                name: t.name,
                url: t.url,
                pattern,
            });
        }

        Ok(Self {
            history_path: PathBuf::from(cfg.store.history),
            webhook_url: cfg.alerts.webhook,
            targets,
        })
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    if app_cfg.targets.is_empty() {
        return Err(anyhow::anyhow!("no targets configured"));
    }

    let fetcher = HttpPageFetcher::new().context("build HTTP client")?;
    let store = FileHistoryStore::new(&app_cfg.history_path);
    let dispatcher = AlertDispatcher::new(app_cfg.webhook_url.clone());

    run_pass(&app_cfg.targets, &fetcher, &store, &dispatcher).await
}

/// One full tracking pass: fetch every target, diff against history,
/// dispatch whatever alerts came up, persist exactly once at the end.
/// A failing target is logged and skipped; only a failed final persist
/// propagates out.
pub async fn run_pass<F, S>(
    targets: &[Target],
    fetcher: &F,
    store: &S,
    dispatcher: &AlertDispatcher,
) -> Result<()>
where
    F: PageFetcher,
    S: HistoryStore,
{
    info!("Starting price check for {} targets", targets.len());

    let mut history = match store.load().await {
        Ok(history) => history,
        Err(e) => {
            warn!("⚠️ Could not load history, starting empty: {}", e);
            History::default()
        }
    };

    let today = Utc::now().date_naive();
    let specials = SpecialDetector::new();
    let change_detector = ChangeDetector::default();
    let mut new_alerts: Vec<String> = Vec::new();

    for target in targets {
        info!("Checking {}...", target.name);

        let page = match fetcher.fetch(&target.url).await {
            Ok(page) => page,
            Err(e) => {
                error!("❌ Fetch failed for {}: {}", target.name, e);
                continue;
            }
        };

        let prices = extract_prices(&page, &target.pattern);
        if prices.is_empty() {
            info!("No prices found for {}", target.name);
            continue;
        }
        let special = specials.detect(&page);

        let observation = Observation {
            apartment: target.name.clone(),
            date: today,
            min_price: prices[0],
            max_price: prices[prices.len() - 1],
            special,
            available_units: prices.len() as u32,
        };

        let alerts = change_detector.detect(&history, &observation);
        for alert in &alerts {
            info!("ALERT: {}", alert);
        }
        new_alerts.extend(alerts);

        info!(
            "{}: ${}-${}, {} units, special: {}",
            observation.apartment,
            observation.min_price,
            observation.max_price,
            observation.available_units,
            observation.special.as_deref().unwrap_or("none"),
        );
        history.records.push(observation);
    }

    if !new_alerts.is_empty() {
        history
            .alerts
            .extend(new_alerts.iter().map(|a| format!("[{}] {}", today, a)));

        // Best effort: the alerts are already archived above
        if let Err(e) = dispatcher.send(&new_alerts).await {
            error!("❌ Alert delivery failed: {}", e);
        }
    }

    history.last_updated = Some(Utc::now());
    store.save(&history).await.context("persist price history")?;

    info!("✅ Price check complete, {} new alerts", new_alerts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::{FetchError, StoreError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    impl StaticFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, page)| (url.to_string(), page.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
        }
    }

    #[derive(Default)]
    struct MemStore {
        loaded: Mutex<History>,
        saved: Mutex<Option<History>>,
    }

    impl MemStore {
        fn seeded(history: History) -> Self {
            Self {
                loaded: Mutex::new(history),
                saved: Mutex::new(None),
            }
        }

        fn saved(&self) -> History {
            self.saved.lock().unwrap().clone().expect("run did not persist")
        }
    }

    #[async_trait]
    impl HistoryStore for MemStore {
        async fn load(&self) -> Result<History, StoreError> {
            Ok(self.loaded.lock().unwrap().clone())
        }

        async fn save(&self, history: &History) -> Result<(), StoreError> {
            *self.saved.lock().unwrap() = Some(history.clone());
            Ok(())
        }
    }

    fn target(name: &str, url: &str) -> Target {
        Target {
            name: name.to_string(),
            url: url.to_string(),
            pattern: Regex::new(DEFAULT_PRICE_PATTERN).unwrap(),
        }
    }

    fn record(name: &str, min_price: u32, special: Option<&str>) -> Observation {
        Observation {
            apartment: name.to_string(),
            date: "2026-01-01".parse().unwrap(),
            min_price,
            max_price: min_price + 400,
            special: special.map(str::to_string),
            available_units: 2,
        }
    }

    #[tokio::test]
    async fn first_run_appends_baselines_without_alerts() {
        let fetcher = StaticFetcher::new(&[("http://a", "1BR from $1,600 to $2,100")]);
        let store = MemStore::default();
        let dispatcher = AlertDispatcher::new(None);

        run_pass(&[target("A", "http://a")], &fetcher, &store, &dispatcher)
            .await
            .unwrap();

        let saved = store.saved();
        assert_eq!(saved.records.len(), 1);
        assert_eq!(saved.records[0].min_price, 1600);
        assert_eq!(saved.records[0].max_price, 2100);
        assert_eq!(saved.records[0].available_units, 2);
        assert!(saved.alerts.is_empty());
        assert!(saved.last_updated.is_some());
    }

    #[tokio::test]
    async fn price_drop_is_archived_with_date_prefix() {
        let fetcher = StaticFetcher::new(&[("http://a", "now from $1,500")]);
        let store = MemStore::seeded(History {
            last_updated: None,
            records: vec![record("A", 1600, None)],
            alerts: vec![],
        });
        let dispatcher = AlertDispatcher::new(None);

        run_pass(&[target("A", "http://a")], &fetcher, &store, &dispatcher)
            .await
            .unwrap();

        let saved = store.saved();
        assert_eq!(saved.records.len(), 2);
        assert_eq!(saved.alerts.len(), 1);
        assert!(saved.alerts[0].starts_with('['));
        assert!(saved.alerts[0].contains("Price dropped $100"));
    }

    #[tokio::test]
    async fn failing_target_does_not_abort_the_run() {
        let fetcher = StaticFetcher::new(&[("http://b", "2BR at $1,795")]);
        let store = MemStore::default();
        let dispatcher = AlertDispatcher::new(None);

        let targets = [target("A", "http://a-is-down"), target("B", "http://b")];
        run_pass(&targets, &fetcher, &store, &dispatcher).await.unwrap();

        let saved = store.saved();
        assert_eq!(saved.records.len(), 1);
        assert_eq!(saved.records[0].apartment, "B");
    }

    #[tokio::test]
    async fn priceless_page_skips_observation_but_still_persists() {
        let fetcher = StaticFetcher::new(&[("http://a", "now leasing, call for pricing")]);
        let store = MemStore::default();
        let dispatcher = AlertDispatcher::new(None);

        run_pass(&[target("A", "http://a")], &fetcher, &store, &dispatcher)
            .await
            .unwrap();

        let saved = store.saved();
        assert!(saved.records.is_empty());
        assert!(saved.last_updated.is_some());
    }

    #[tokio::test]
    async fn new_special_on_page_alerts_once() {
        let fetcher = StaticFetcher::new(&[("http://a", "$1,600 and get 2 months free!")]);
        let store = MemStore::seeded(History {
            last_updated: None,
            records: vec![record("A", 1600, None)],
            alerts: vec![],
        });
        let dispatcher = AlertDispatcher::new(None);

        run_pass(&[target("A", "http://a")], &fetcher, &store, &dispatcher)
            .await
            .unwrap();

        let saved = store.saved();
        assert_eq!(saved.alerts.len(), 1);
        assert!(saved.alerts[0].contains("New special detected"));
        assert_eq!(saved.records[1].special.as_deref(), Some("2 months free"));
    }
}
