use crate::core::config::{ProviderConfig, ProvidersConfig};
use crate::core::error::{Result, StockError};
use anyhow::Context;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, error, instrument};

const USER_AGENT: &str = concat!("stocks/", env!("CARGO_PKG_VERSION"));

/// Named upstream data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Symbol search and company profiles.
    Finnhub,
    /// Latest quotes and daily price charts.
    Iex,
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Provider::Finnhub => "finnhub",
                Provider::Iex => "iex",
            }
        )
    }
}

struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ProviderClient {
    fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ProviderClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }
}

/// Pre-configured HTTP clients for each provider. Every upstream request in
/// the crate goes through [`ProviderGateway::get_data`].
pub struct ProviderGateway {
    finnhub: ProviderClient,
    iex: ProviderClient,
}

impl ProviderGateway {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Ok(ProviderGateway {
            finnhub: ProviderClient::new(&config.finnhub, timeout)?,
            iex: ProviderClient::new(&config.iex, timeout)?,
        })
    }

    fn client(&self, provider: Provider) -> &ProviderClient {
        match provider {
            Provider::Finnhub => &self.finnhub,
            Provider::Iex => &self.iex,
        }
    }

    /// API token for `provider`, for inclusion in relative URIs.
    pub fn token(&self, provider: Provider) -> &str {
        &self.client(provider).token
    }

    /// Issues a GET for `relative_uri` against the provider's base URL and
    /// returns the raw body of a 2xx response.
    #[instrument(
        name = "ProviderGet",
        skip(self, provider, relative_uri),
        fields(provider = %provider, uri = %redact_token(relative_uri))
    )]
    pub async fn get_data(&self, provider: Provider, relative_uri: &str) -> Result<String> {
        let provider_client = self.client(provider);
        let url = format!(
            "{}/{}",
            provider_client.base_url,
            relative_uri.trim_start_matches('/')
        );
        debug!("Requesting data from {}", redact_token(&url));

        let response = match provider_client.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                // The URL carries the token.
                let e = e.without_url();
                error!(error = %e, "Request to {} failed", provider);
                return Err(StockError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(
                method = "GET",
                reason = status.canonical_reason().unwrap_or("Unknown"),
                "Request to {} returned unexpected response '{}'",
                provider,
                status
            );
            return Err(StockError::Status {
                provider,
                uri: redact_token(relative_uri),
                status,
            });
        }

        response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "Failed to read response body from {}", provider);
            StockError::Transport(e)
        })
    }
}

/// Masks the value of any `token` query parameter in `uri`.
pub fn redact_token(uri: &str) -> String {
    let Some((path, query)) = uri.split_once('?') else {
        return uri.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("token", _)) => "token=***".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
