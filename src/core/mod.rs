//! Core domain types, configuration and failure contract

pub mod config;
pub mod error;
pub mod log;
pub mod models;

// Re-export main types for cleaner imports
pub use error::{FailureKind, StockError};
pub use models::{Currency, DateRange, Stock, StockDetail, StockHistory, StockPrice};
