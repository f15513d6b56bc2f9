use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use renttrack::app::{self, AppCfg};
use renttrack::config::Config;

#[derive(Parser, Debug)]
#[command(version, about = "Apartment price tracker - one tracking pass per invocation")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "tracker.toml")]
    config: PathBuf,

    /// History file location (overrides config)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Webhook endpoint for alerts (overrides config and PRICE_ALERT_WEBHOOK)
    #[arg(long)]
    webhook: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let cfg = Config::from_file(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let mut app_cfg = AppCfg::from_config(cfg)?;

    if let Some(history) = args.history {
        app_cfg.history_path = history;
    }

    // Webhook priority: CLI > environment > config file
    if let Some(webhook) = args.webhook {
        app_cfg.webhook_url = Some(webhook);
    } else if let Ok(webhook) = std::env::var("PRICE_ALERT_WEBHOOK") {
        if !webhook.is_empty() {
            app_cfg.webhook_url = Some(webhook);
        }
    }

    app::run(app_cfg).await
}
