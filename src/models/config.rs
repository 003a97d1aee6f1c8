//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_assets_dir() -> String {
    "./assets".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Base URL of the character API, without the `/character` suffix.
    pub upstream_url: String,
    /// Per-request timeout for upstream calls; expiry counts as a failed fetch.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}
