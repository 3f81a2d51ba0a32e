use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::countries::models::{
    Country, CountryFilters, CountrySort, CountryStatus, RefreshOutcome,
};

/// Query parameters for listing countries
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CountryListQuery {
    /// Filter by region (case-insensitive equality)
    #[param(example = "Africa")]
    pub region: Option<String>,
    /// Filter by currency code (case-insensitive equality)
    #[param(example = "NGN")]
    pub currency: Option<String>,
    /// One of gdp_desc, gdp_asc, population_desc, population_asc, name_asc,
    /// name_desc. Other values are ignored.
    #[param(example = "gdp_desc")]
    pub sort: Option<String>,
}

impl CountryListQuery {
    pub fn filters(&self) -> CountryFilters {
        CountryFilters {
            region: self.region.clone(),
            currency: self.currency.clone(),
        }
    }

    pub fn sort(&self) -> Option<CountrySort> {
        self.sort.as_deref().and_then(CountrySort::parse)
    }
}

/// Response DTO for a persisted country
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

impl From<Country> for CountryResponseDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            capital: country.capital,
            region: country.region,
            population: country.population,
            currency_code: country.currency_code,
            exchange_rate: country.exchange_rate,
            estimated_gdp: country.estimated_gdp,
            flag_url: country.flag_url,
            last_refreshed_at: country.last_refreshed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryStatusDto {
    pub total_countries: i64,
    pub last_refreshed_at: Option<String>,
}

impl From<CountryStatus> for CountryStatusDto {
    fn from(status: CountryStatus) -> Self {
        Self {
            total_countries: status.total_countries,
            last_refreshed_at: status.last_refreshed_at,
        }
    }
}

/// Result of a refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponseDto {
    pub message: String,
    pub total_countries: usize,
    pub successful_upserts: usize,
    pub failed_upserts: usize,
    /// ISO-8601 timestamp recorded as `last_refreshed_at`
    pub timestamp: String,
}

impl From<RefreshOutcome> for RefreshResponseDto {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            message: "Countries refreshed successfully".to_string(),
            total_countries: outcome.total,
            successful_upserts: outcome.successful,
            failed_upserts: outcome.failed,
            timestamp: outcome.timestamp,
        }
    }
}
