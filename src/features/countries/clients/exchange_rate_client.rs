use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::countries::clients::RateSource;
use crate::features::countries::models::RateTable;

/// Exchange rate payload (`open.er-api.com` style)
#[derive(Debug, Deserialize)]
pub struct ExchangeRatesResponse {
    #[serde(default)]
    pub base_code: Option<String>,
    /// Raw values; non-numeric entries are dropped, not rejected
    pub rates: HashMap<String, Value>,
}

impl ExchangeRatesResponse {
    pub fn into_rate_table(self) -> RateTable {
        self.rates
            .into_iter()
            .filter_map(|(code, value)| match value.as_f64() {
                Some(rate) => Some((code, rate)),
                None => {
                    tracing::debug!("Dropping non-numeric exchange rate {} = {}", code, value);
                    None
                }
            })
            .collect()
    }
}

/// HTTP client for the exchange rate API
pub struct ExchangeRateClient {
    client: reqwest::Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn fetch_rates(&self) -> Result<RateTable> {
        tracing::debug!("Fetching exchange rates from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("Exchange rate request failed: {:?}", e);
            AppError::RateSourceUnavailable(e.to_string())
        })?;

        if !response.status().is_success() {
            tracing::warn!("Exchange rate API returned status: {}", response.status());
            return Err(AppError::RateSourceUnavailable(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let payload: ExchangeRatesResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse exchange rate response: {:?}", e);
            AppError::RateSourceUnavailable(format!("invalid response body: {}", e))
        })?;

        tracing::debug!(
            "Exchange rates base {:?} with {} entries",
            payload.base_code,
            payload.rates.len()
        );

        Ok(payload.into_rate_table())
    }
}
