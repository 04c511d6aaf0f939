//! Application configuration

use std::time::Duration;

use atelier::selection::MissingSizePolicy;
use clap::Args;

use crate::gateway::HttpDocumentStoreConfig;

/// Atelier storefront configuration
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Document store address
    #[arg(long, env = "ATELIER_GATEWAY_URL")]
    pub gateway_url: String,

    /// Document store API key
    #[arg(long, env = "ATELIER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Public storefront URL used in the sitemap
    #[arg(long, env = "ATELIER_HOSTNAME")]
    pub hostname: Option<String>,

    /// Currency prices are displayed in
    #[arg(long, env = "ATELIER_CURRENCY", default_value = "INR")]
    pub currency: String,

    /// What to do when add-to-cart is attempted without a required size (ignore, reject)
    #[arg(
        long,
        env = "ATELIER_MISSING_SIZE_POLICY",
        default_value = "ignore",
        value_parser = parse_missing_size_policy
    )]
    pub missing_size_policy: MissingSizePolicy,

    /// Document store request timeout in seconds
    #[arg(long, env = "ATELIER_REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl AppConfig {
    /// Document store client settings.
    #[must_use]
    pub fn gateway(&self) -> HttpDocumentStoreConfig {
        HttpDocumentStoreConfig {
            base_url: self.gateway_url.clone(),
            api_key: self.api_key.clone().filter(|key| !key.trim().is_empty()),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

fn parse_missing_size_policy(value: &str) -> Result<MissingSizePolicy, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ignore" => Ok(MissingSizePolicy::Ignore),
        "reject" => Ok(MissingSizePolicy::Reject),
        other => Err(format!("unknown missing size policy: {other}")),
    }
}
