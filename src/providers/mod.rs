pub mod finnhub;
pub mod gateway;
pub mod iex;

pub use gateway::{Provider, ProviderGateway};
