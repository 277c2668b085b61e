//! Finnhub payloads: symbol search and company profile.

use super::Provider;
use crate::core::error::{Result, StockError};
use crate::core::{Currency, Stock};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchRecord {
    symbol: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Envelope { result: Vec<SearchRecord> },
    Records(Vec<SearchRecord>),
}

/// Company profile fields used for stock details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub currency: Option<Currency>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    name: Option<String>,
    currency: Option<String>,
}

pub fn search_uri(search_term: &str, token: &str) -> String {
    format!(
        "search?q={}&token={}",
        urlencoding::encode(search_term),
        urlencoding::encode(token)
    )
}

pub fn profile_uri(symbol: &str, token: &str) -> String {
    format!(
        "stock/profile2?symbol={}&token={}",
        urlencoding::encode(symbol),
        urlencoding::encode(token)
    )
}

fn from_json<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| StockError::Malformed {
        provider: Provider::Finnhub,
        source,
    })
}

/// Parses a search response into stocks, keeping provider order. Any record
/// without a symbol or description fails the whole response.
pub fn parse_search(body: &str) -> Result<Vec<Stock>> {
    let records = match from_json::<SearchResponse>(body)? {
        SearchResponse::Envelope { result } => result,
        SearchResponse::Records(records) => records,
    };
    debug!("Search returned {} records", records.len());

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match (record.symbol, record.description) {
            (Some(symbol), Some(description)) => Ok(Stock::new(symbol, description)),
            (None, _) => Err(StockError::invalid(
                Provider::Finnhub,
                format!("Search result {index} has no symbol"),
            )),
            (Some(symbol), None) => Err(StockError::invalid(
                Provider::Finnhub,
                format!("Search result {index} ({symbol}) has no description"),
            )),
        })
        .collect()
}

/// Parses a company profile. The name is required; a currency, when
/// present, must be one of the supported codes.
pub fn parse_profile(symbol: &str, body: &str) -> Result<Profile> {
    let response: ProfileResponse = from_json(body)?;

    let name = response.name.ok_or_else(|| {
        StockError::invalid(Provider::Finnhub, format!("No profile name for {symbol}"))
    })?;

    let currency = response
        .currency
        .map(|code| {
            code.parse::<Currency>()
                .map_err(|e| StockError::invalid(Provider::Finnhub, e.to_string()))
        })
        .transpose()?;

    Ok(Profile { name, currency })
}
