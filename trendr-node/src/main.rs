use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};
use trendr_api::{
    context::ApiContext,
    server::{run_server, ApiConfig},
};
use trendr_config::NodeConfig;
use trendr_data::YahooChartProvider;
use trendr_normalizer::TrendNormalizer;

fn resolve_config_path() -> PathBuf {
    let config_path = std::env::var("TRENDR_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/etc/trendr/config.toml"));
    if config_path.exists() {
        return config_path;
    }
    let fallback = PathBuf::from("config/config.toml");
    if fallback.exists() {
        fallback
    } else {
        config_path
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_name = std::env::var("NODE_ENV").ok();
    let resolved_path = resolve_config_path();
    let (node_config, load_err) = match NodeConfig::load_with_env(&resolved_path, env_name) {
        Ok(cfg) => (cfg, None),
        Err(err) => (NodeConfig::from_env(), Some(err)),
    };

    trendr_log::init_tracing(
        &node_config.logging.level,
        node_config.logging.log_path.as_deref().map(Path::new),
    )?;
    if let Some(err) = load_err {
        warn!(
            ?err,
            ?resolved_path,
            "failed to load config file, using defaults"
        );
    }
    info!(config = ?node_config.redacted(), "configuration loaded");

    let provider = Arc::new(YahooChartProvider::from_config(
        &node_config.market_data,
        &node_config.net_profile,
    )?);
    let normalizer = TrendNormalizer::new(provider);
    info!(
        tickers = ?normalizer.tickers().symbols(),
        period = normalizer.window().period,
        interval = normalizer.window().interval,
        "trend normalizer ready"
    );

    let api_context = ApiContext::new(normalizer);
    let api_config = ApiConfig {
        bind: node_config.api.bind.clone(),
    };
    let api_handle = tokio::task::spawn_blocking(move || {
        actix_rt::System::new().block_on(run_server(api_context, api_config))
    });

    info!("trendr node online");

    tokio::select! {
        joined = api_handle => {
            joined??;
            info!("api server stopped");
        }
        interrupted = signal::ctrl_c() => {
            interrupted?;
            info!("shutdown requested");
        }
    }
    Ok(())
}
