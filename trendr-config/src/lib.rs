use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use trendr_data::MarketDataConfig;
use trendr_net::{NetMode, NetProfile};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_path: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    pub bind: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Process configuration. The tracked tickers and lookback window are fixed
/// and deliberately absent here.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeConfig {
    pub net_profile: NetProfile,
    pub logging: LoggingConfig,
    pub api: ApiSection,
    pub market_data: MarketDataConfig,
}

impl NodeConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let value = load_value(path)?;
        let mut cfg: NodeConfig = value.try_into()?;
        apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Loads `path`, deep-merges `config.<env>.toml` from the same directory
    /// when an environment is named (explicitly or through `NODE_ENV`), then
    /// applies `TRENDR_*` variables.
    pub fn load_with_env(base_path: &Path, env_name: Option<String>) -> Result<Self> {
        Self::load_with(base_path, env_name, |key| std::env::var(key).ok())
    }

    fn load_with<F>(base_path: &Path, env_name: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut merged = load_value(base_path)?;
        let env_overlay = env_name.or_else(|| lookup("NODE_ENV"));
        if let Some(env) = env_overlay {
            let env_path = env_config_path(base_path, &env);
            if env_path.exists() {
                let overlay = load_value(&env_path)?;
                merge_toml(&mut merged, overlay);
            }
        }

        let mut cfg: NodeConfig = merged.try_into()?;
        apply_env_overrides(&mut cfg, lookup);
        Ok(cfg)
    }

    /// Defaults plus `TRENDR_*` variables, for runs without a config file.
    pub fn from_env() -> Self {
        let mut cfg = NodeConfig::default();
        apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
        cfg
    }

    /// Copy safe to log: proxy URLs may carry credentials.
    pub fn redacted(&self) -> Self {
        let mut cloned = self.clone();
        if cloned.net_profile.proxy_url.is_some() {
            cloned.net_profile.proxy_url = Some("***".to_string());
        }
        cloned
    }
}

fn load_value(path: &Path) -> Result<toml::Value> {
    let contents = std::fs::read_to_string(path)?;
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        match ext {
            "yaml" | "yml" => {
                let json_value: JsonValue = serde_yaml::from_str(&contents)?;
                let toml_string = toml::to_string(&json_value)?;
                Ok(toml::from_str(&toml_string)?)
            }
            _ => Ok(toml::from_str(&contents)?),
        }
    } else {
        Ok(toml::from_str(&contents)?)
    }
}

fn env_config_path(base_path: &Path, env: &str) -> PathBuf {
    match base_path.parent() {
        Some(parent) => parent.join(format!("config.{}.toml", env)),
        None => PathBuf::from(format!("config.{}.toml", env)),
    }
}

fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    use toml::Value;
    match (base, overlay) {
        (Value::Table(base_map), Value::Table(overlay_map)) => {
            for (k, v) in overlay_map {
                match base_map.get_mut(&k) {
                    Some(base_val) => merge_toml(base_val, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (base_slot, overlay_val) => {
            *base_slot = overlay_val;
        }
    }
}

fn apply_env_overrides<F>(cfg: &mut NodeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bind) = lookup("TRENDR_API_BIND") {
        cfg.api.bind = bind;
    }
    if let Some(level) = lookup("TRENDR_LOG_LEVEL") {
        cfg.logging.level = level;
    }
    if let Some(path) = lookup("TRENDR_LOG_PATH") {
        cfg.logging.log_path = Some(path);
    }
    if let Some(url) = lookup("TRENDR_PROVIDER_URL") {
        cfg.market_data.base_url = url;
    }
    if let Some(net_mode) = lookup("TRENDR_NET_MODE") {
        if let Ok(parsed) = NetMode::from_str(&net_mode) {
            cfg.net_profile.mode = parsed;
        }
    }
    if let Some(proxy_url) = lookup("TRENDR_PROXY_URL") {
        cfg.net_profile.proxy_url = Some(proxy_url);
    }
}
