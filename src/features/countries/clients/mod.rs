//! Upstream data sources for the refresh cycle.

mod exchange_rate_client;
mod rest_countries_client;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::countries::models::{RateTable, RawCountry};

pub use exchange_rate_client::ExchangeRateClient;
pub use rest_countries_client::RestCountriesClient;

/// Source of raw country records.
///
/// Any failure must surface as `AppError::CountrySourceUnavailable`.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>>;
}

/// Source of the exchange rate table.
///
/// Any failure must surface as `AppError::RateSourceUnavailable`.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
