use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Country joined with its exchange rate, ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCountry {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
}

/// Persisted country row
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equality filters for listing countries; both are ANDed when present
#[derive(Debug, Clone, Default)]
pub struct CountryFilters {
    pub region: Option<String>,
    pub currency: Option<String>,
}

/// Recognized orderings for listing countries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySort {
    GdpDesc,
    GdpAsc,
    PopulationDesc,
    PopulationAsc,
    NameAsc,
    NameDesc,
}

impl CountrySort {
    /// Parse a `sort` query value. Unknown values yield `None` and are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gdp_desc" => Some(Self::GdpDesc),
            "gdp_asc" => Some(Self::GdpAsc),
            "population_desc" => Some(Self::PopulationDesc),
            "population_asc" => Some(Self::PopulationAsc),
            "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            _ => None,
        }
    }

    pub fn order_by_clause(&self) -> &'static str {
        match self {
            Self::GdpDesc => "estimated_gdp DESC NULLS LAST",
            Self::GdpAsc => "estimated_gdp ASC NULLS LAST",
            Self::PopulationDesc => "population DESC",
            Self::PopulationAsc => "population ASC",
            Self::NameAsc => "name ASC",
            Self::NameDesc => "name DESC",
        }
    }
}

/// Aggregate view served by the status endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CountryStatus {
    pub total_countries: i64,
    pub last_refreshed_at: Option<String>,
}

/// Counts reported by one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub timestamp: String,
}
