use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::countries::clients::CountrySource;
use crate::features::countries::models::RawCountry;

/// Fields requested from the RestCountries API
const REQUESTED_FIELDS: &str = "name,capital,region,population,flag,currencies";

/// RestCountries (v2) country payload
#[derive(Debug, Deserialize)]
pub struct RestCountry {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: Option<i64>,
    pub flag: Option<String>,
    #[serde(default)]
    pub currencies: Option<Vec<RestCurrency>>,
}

#[derive(Debug, Deserialize)]
pub struct RestCurrency {
    pub code: Option<String>,
    #[allow(dead_code)]
    pub name: Option<String>,
    #[allow(dead_code)]
    pub symbol: Option<String>,
}

impl From<RestCountry> for RawCountry {
    fn from(country: RestCountry) -> Self {
        // Only the first listed currency is relevant; a currency without a
        // code counts as no currency at all.
        let currency_codes = country
            .currencies
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.code)
            .filter(|code| !code.is_empty())
            .into_iter()
            .collect();

        Self {
            name: country.name,
            capital: country.capital.filter(|s| !s.is_empty()),
            region: country.region.filter(|s| !s.is_empty()),
            population: country.population.unwrap_or(0),
            currency_codes,
            flag_url: country.flag.filter(|s| !s.is_empty()),
        }
    }
}

/// HTTP client for the RestCountries API
pub struct RestCountriesClient {
    client: reqwest::Client,
    url: String,
}

impl RestCountriesClient {
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
impl CountrySource for RestCountriesClient {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
        tracing::debug!("Fetching countries from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("fields", REQUESTED_FIELDS)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("RestCountries request failed: {:?}", e);
                AppError::CountrySourceUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!("RestCountries returned status: {}", response.status());
            return Err(AppError::CountrySourceUnavailable(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let countries: Vec<RestCountry> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse RestCountries response: {:?}", e);
            AppError::CountrySourceUnavailable(format!("invalid response body: {}", e))
        })?;

        Ok(countries.into_iter().map(RawCountry::from).collect())
    }
}
