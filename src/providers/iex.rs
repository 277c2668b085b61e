//! IEX Cloud payloads: latest price and daily chart.

use super::Provider;
use crate::core::error::{Result, StockError};
use crate::core::DateRange;
use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// Closing price of one trading day, before currency is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

#[derive(Debug, Deserialize)]
struct ChartRecord {
    date: Option<String>,
    close: Option<Value>,
}

pub fn quote_uri(symbol: &str, token: &str) -> String {
    format!(
        "stock/{}/quote/latestPrice?token={}",
        urlencoding::encode(symbol),
        urlencoding::encode(token)
    )
}

pub fn chart_uri(symbol: &str, range: DateRange, token: &str) -> String {
    format!(
        "stock/{}/chart/{}?token={}",
        urlencoding::encode(symbol),
        range.to_short_str(),
        urlencoding::encode(token)
    )
}

/// Parses a non-negative decimal, accepting plain and scientific notation.
pub fn parse_price(text: &str) -> Result<Decimal> {
    let text = text.trim();
    let price = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| StockError::invalid(Provider::Iex, format!("Invalid price: '{text}'")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(StockError::invalid(
            Provider::Iex,
            format!("Negative price: '{text}'"),
        ));
    }
    Ok(price)
}

/// Parses the bare-text body of the latest price endpoint. A body that is
/// not a number at all is an internal failure; a negative number is invalid
/// upstream data.
pub fn parse_latest_price(body: &str) -> Result<Decimal> {
    let text = body.trim();
    if Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .is_err()
    {
        return Err(StockError::Internal(anyhow!(
            "Unparsable latest price from {}: '{}'",
            Provider::Iex,
            text
        )));
    }
    parse_price(text)
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| StockError::invalid(Provider::Iex, format!("Invalid date: '{text}'")))
}

fn parse_close(value: &Value) -> Result<Decimal> {
    match value {
        Value::String(text) => parse_price(text),
        Value::Number(number) => parse_price(&number.to_string()),
        other => Err(StockError::invalid(
            Provider::Iex,
            format!("Invalid close: {other}"),
        )),
    }
}

/// Parses a chart response, keeping provider order. Any record with a
/// missing or unparsable date or close fails the whole response.
pub fn parse_chart(body: &str) -> Result<Vec<ChartPoint>> {
    let records: Vec<ChartRecord> =
        serde_json::from_str(body).map_err(|source| StockError::Malformed {
            provider: Provider::Iex,
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let date = record.date.ok_or_else(|| {
                StockError::invalid(Provider::Iex, format!("Chart record {index} has no date"))
            })?;
            let close = record.close.ok_or_else(|| {
                StockError::invalid(Provider::Iex, format!("Chart record {index} has no close"))
            })?;
            Ok(ChartPoint {
                date: parse_date(&date)?,
                close: parse_close(&close)?,
            })
        })
        .collect()
}
