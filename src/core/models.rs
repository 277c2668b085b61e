//! Domain types shared by every stock operation

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// A tradable security, identified by its ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Stock {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Currency {
    EUR,
    GBP,
    USD,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Currency::EUR => "EUR",
                Currency::GBP => "GBP",
                Currency::USD => "USD",
            }
        )
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    /// Only the exact upstream codes are accepted; there is no fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "USD" => Ok(Currency::USD),
            _ => Err(anyhow!("Unsupported currency: '{}'", s)),
        }
    }
}

/// A single price observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPrice {
    pub price: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
}

/// A stock together with its latest known price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    #[serde(flatten)]
    pub stock: Stock,
    pub quote: StockPrice,
}

/// Daily closing prices for a stock, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHistory {
    pub stock: Stock,
    pub price_history: Vec<StockPrice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRange {
    FiveDay,
    OneMonth,
    ThreeMonth,
    SixMonth,
    OneYear,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::FiveDay,
        DateRange::OneMonth,
        DateRange::ThreeMonth,
        DateRange::SixMonth,
        DateRange::OneYear,
    ];

    /// Shorthand used by the chart endpoint, e.g. `5d`.
    pub fn to_short_str(&self) -> &'static str {
        match self {
            DateRange::FiveDay => "5d",
            DateRange::OneMonth => "1m",
            DateRange::ThreeMonth => "3m",
            DateRange::SixMonth => "6m",
            DateRange::OneYear => "1y",
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DateRange::FiveDay => "FIVEDAY",
                DateRange::OneMonth => "ONEMONTH",
                DateRange::ThreeMonth => "THREEMONTH",
                DateRange::SixMonth => "SIXMONTH",
                DateRange::OneYear => "ONEYEAR",
            }
        )
    }
}

impl FromStr for DateRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FIVEDAY" | "5D" => Ok(DateRange::FiveDay),
            "ONEMONTH" | "1M" => Ok(DateRange::OneMonth),
            "THREEMONTH" | "3M" => Ok(DateRange::ThreeMonth),
            "SIXMONTH" | "6M" => Ok(DateRange::SixMonth),
            "ONEYEAR" | "1Y" => Ok(DateRange::OneYear),
            _ => Err(anyhow!("Invalid date range: {}", s)),
        }
    }
}
