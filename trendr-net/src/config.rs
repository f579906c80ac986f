use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetMode {
    Direct,
    HttpProxy,
    Socks5Proxy,
    Tor,
}

impl Default for NetMode {
    fn default() -> Self {
        Self::Direct
    }
}

impl fmt::Display for NetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetMode::Direct => write!(f, "Direct"),
            NetMode::HttpProxy => write!(f, "HttpProxy"),
            NetMode::Socks5Proxy => write!(f, "Socks5Proxy"),
            NetMode::Tor => write!(f, "Tor"),
        }
    }
}

impl FromStr for NetMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "direct" => Ok(NetMode::Direct),
            "httpproxy" | "http_proxy" => Ok(NetMode::HttpProxy),
            "socks5" | "socks5proxy" | "socks5_proxy" => Ok(NetMode::Socks5Proxy),
            "tor" => Ok(NetMode::Tor),
            other => anyhow::bail!("unknown net mode: {other}"),
        }
    }
}

/// Outbound HTTP settings for the market-data client.
///
/// Timeouts are unset unless configured, leaving reqwest's own defaults in
/// charge.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetProfile {
    #[serde(default)]
    pub mode: NetMode,
    pub proxy_url: Option<String>,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub max_idle_per_host: Option<usize>,
    pub user_agent: Option<String>,
}

impl Default for NetProfile {
    fn default() -> Self {
        Self {
            mode: NetMode::Direct,
            proxy_url: None,
            request_timeout: None,
            connect_timeout: None,
            max_idle_per_host: Some(8),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

// Yahoo rejects requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; trendr/0.1)";
