//! Aggregation of provider data into stock search results, details and
//! price history.

use crate::core::config::ProvidersConfig;
use crate::core::error::{Result, StockError};
use crate::core::{Currency, DateRange, Stock, StockDetail, StockHistory, StockPrice};
use crate::providers::finnhub::{self, Profile};
use crate::providers::{Provider, ProviderGateway, iex};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{debug, error, instrument};

/// Operations exposed to the front end. Each call either returns a fully
/// populated value or a single error; no partial results.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn search_stocks(&self, search_term: &str) -> Result<Vec<Stock>>;

    async fn get_stock_detail(&self, symbol: &str) -> Result<StockDetail>;

    async fn get_stock_history(&self, symbol: &str, range: DateRange) -> Result<StockHistory>;
}

/// [`StockService`] backed by Finnhub (search, profile) and IEX Cloud
/// (quote, chart).
pub struct ProviderStockService {
    gateway: ProviderGateway,
}

impl ProviderStockService {
    pub fn new(gateway: ProviderGateway) -> Self {
        ProviderStockService { gateway }
    }

    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self::new(ProviderGateway::new(config)?))
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<Profile> {
        let uri = finnhub::profile_uri(symbol, self.gateway.token(Provider::Finnhub));
        let body = self.gateway.get_data(Provider::Finnhub, &uri).await?;
        finnhub::parse_profile(symbol, &body)
    }

    async fn search(&self, search_term: &str) -> Result<Vec<Stock>> {
        let uri = finnhub::search_uri(search_term, self.gateway.token(Provider::Finnhub));
        let body = self.gateway.get_data(Provider::Finnhub, &uri).await?;
        finnhub::parse_search(&body)
    }

    async fn detail(&self, symbol: &str) -> Result<StockDetail> {
        let uri = iex::quote_uri(symbol, self.gateway.token(Provider::Iex));
        let body = self.gateway.get_data(Provider::Iex, &uri).await?;
        let price = iex::parse_latest_price(&body)?;
        debug!("Latest price for {}: {}", symbol, price);

        let profile = self.fetch_profile(symbol).await?;
        let currency = profile.currency.ok_or_else(|| {
            StockError::invalid(Provider::Finnhub, format!("No currency for {symbol}"))
        })?;

        Ok(StockDetail {
            stock: Stock::new(symbol, profile.name),
            quote: StockPrice {
                price,
                currency,
                date: today(),
            },
        })
    }

    async fn history(&self, symbol: &str, range: DateRange) -> Result<StockHistory> {
        let uri = iex::chart_uri(symbol, range, self.gateway.token(Provider::Iex));
        let body = self.gateway.get_data(Provider::Iex, &uri).await?;
        let points = iex::parse_chart(&body)?;
        debug!("Chart for {} over {} has {} points", symbol, range, points.len());

        let profile = self.fetch_profile(symbol).await?;
        // IEX charts are quoted in USD unless the profile says otherwise.
        let currency = profile.currency.unwrap_or(Currency::USD);

        Ok(StockHistory {
            stock: Stock::new(symbol, profile.name),
            price_history: points
                .into_iter()
                .map(|point| StockPrice {
                    price: point.close,
                    currency,
                    date: point.date,
                })
                .collect(),
        })
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn log_failure(operation: &str, err: &StockError) {
    error!(
        kind = ?err.kind(),
        error = %err,
        "StocksService.{} failed",
        operation
    );
}

#[async_trait]
impl StockService for ProviderStockService {
    #[instrument(name = "SearchStocks", skip(self))]
    async fn search_stocks(&self, search_term: &str) -> Result<Vec<Stock>> {
        self.search(search_term)
            .await
            .inspect_err(|e| log_failure("search_stocks", e))
    }

    #[instrument(name = "GetStockDetail", skip(self))]
    async fn get_stock_detail(&self, symbol: &str) -> Result<StockDetail> {
        self.detail(symbol)
            .await
            .inspect_err(|e| log_failure("get_stock_detail", e))
    }

    #[instrument(name = "GetStockHistory", skip(self, range), fields(range = %range))]
    async fn get_stock_history(&self, symbol: &str, range: DateRange) -> Result<StockHistory> {
        self.history(symbol, range)
            .await
            .inspect_err(|e| log_failure("get_stock_history", e))
    }
}
