//! In-memory fakes for the refresh pipeline and the country endpoints.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::countries::clients::{CountrySource, RateSource};
use crate::features::countries::models::{
    Country, CountryFilters, CountrySort, EnrichedCountry, RateTable, RawCountry,
};
use crate::features::countries::services::CountryStore;
use crate::modules::summary::{RefreshSummary, SummaryRenderer};

pub fn raw_country(name: &str, population: i64, currency_codes: &[&str]) -> RawCountry {
    RawCountry {
        name: name.to_string(),
        capital: Some(format!("{} Capital", name)),
        region: Some("Africa".to_string()),
        population,
        currency_codes: currency_codes.iter().map(|c| c.to_string()).collect(),
        flag_url: Some(format!("https://flagcdn.com/{}.svg", name.to_lowercase())),
    }
}

pub fn enriched_country(
    name: &str,
    region: &str,
    currency_code: &str,
    population: i64,
    estimated_gdp: Option<f64>,
) -> EnrichedCountry {
    EnrichedCountry {
        name: name.to_string(),
        capital: None,
        region: Some(region.to_string()),
        population,
        currency_code: Some(currency_code.to_string()),
        exchange_rate: estimated_gdp.map(|_| 1.0),
        estimated_gdp,
        flag_url: None,
    }
}

pub fn sample_rates() -> RateTable {
    [
        ("NGN".to_string(), 1600.23),
        ("GHS".to_string(), 15.34),
        ("KES".to_string(), 129.5),
        ("EUR".to_string(), 0.92),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// SOURCES
// =============================================================================

pub struct StaticCountrySource {
    countries: Vec<RawCountry>,
}

impl StaticCountrySource {
    pub fn new(countries: Vec<RawCountry>) -> Self {
        Self { countries }
    }
}

#[async_trait]
impl CountrySource for StaticCountrySource {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
        Ok(self.countries.clone())
    }
}

pub struct FailingCountrySource;

#[async_trait]
impl CountrySource for FailingCountrySource {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
        Err(AppError::CountrySourceUnavailable(
            "connection refused".to_string(),
        ))
    }
}

pub struct StaticRateSource {
    rates: RateTable,
}

impl StaticRateSource {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch_rates(&self) -> Result<RateTable> {
        Ok(self.rates.clone())
    }
}

pub struct FailingRateSource;

#[async_trait]
impl RateSource for FailingRateSource {
    async fn fetch_rates(&self) -> Result<RateTable> {
        Err(AppError::RateSourceUnavailable("timed out".to_string()))
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Mirrors `PgCountryStore` semantics, optionally failing or slowing upserts
#[derive(Default)]
pub struct InMemoryCountryStore {
    countries: Mutex<Vec<Country>>,
    metadata: Mutex<HashMap<String, String>>,
    failing_names: HashSet<String>,
    upsert_delay: Option<Duration>,
    upsert_attempts: AtomicUsize,
}

impl InMemoryCountryStore {
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            failing_names: names.iter().map(|n| n.to_lowercase()).collect(),
            ..Self::default()
        }
    }

    pub fn with_upsert_delay(mut self, delay: Duration) -> Self {
        self.upsert_delay = Some(delay);
        self
    }

    pub fn upsert_attempts(&self) -> usize {
        self.upsert_attempts.load(AtomicOrdering::SeqCst)
    }

    pub fn metadata_value(&self, key: &str) -> Option<String> {
        self.metadata.lock().unwrap().get(key).cloned()
    }
}

/// `LOWER(a) = LOWER(b)`
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn matches_ci(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => value.is_some_and(|v| v.to_lowercase() == w.to_lowercase()),
    }
}

fn cmp_nulls_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl CountryStore for InMemoryCountryStore {
    async fn exists(&self, name: &str) -> Result<bool> {
        let countries = self.countries.lock().unwrap();
        Ok(countries.iter().any(|c| same_name(&c.name, name)))
    }

    async fn upsert(&self, country: &EnrichedCountry) -> Result<()> {
        if let Some(delay) = self.upsert_delay {
            tokio::time::sleep(delay).await;
        }
        self.upsert_attempts.fetch_add(1, AtomicOrdering::SeqCst);

        if self.failing_names.contains(&country.name.to_lowercase()) {
            return Err(AppError::Internal(format!(
                "simulated write failure for {}",
                country.name
            )));
        }

        let now = Utc::now();
        let mut countries = self.countries.lock().unwrap();
        match countries
            .iter_mut()
            .find(|c| same_name(&c.name, &country.name))
        {
            Some(existing) => {
                existing.capital = country.capital.clone();
                existing.region = country.region.clone();
                existing.population = country.population;
                existing.currency_code = country.currency_code.clone();
                existing.exchange_rate = country.exchange_rate;
                existing.estimated_gdp = country.estimated_gdp;
                existing.flag_url = country.flag_url.clone();
                existing.last_refreshed_at = now;
                existing.updated_at = now;
            }
            None => countries.push(Country {
                id: Uuid::now_v7(),
                name: country.name.clone(),
                capital: country.capital.clone(),
                region: country.region.clone(),
                population: country.population,
                currency_code: country.currency_code.clone(),
                exchange_rate: country.exchange_rate,
                estimated_gdp: country.estimated_gdp,
                flag_url: country.flag_url.clone(),
                last_refreshed_at: now,
                created_at: now,
                updated_at: now,
            }),
        }

        Ok(())
    }

    async fn get_all(
        &self,
        filters: &CountryFilters,
        sort: Option<CountrySort>,
    ) -> Result<Vec<Country>> {
        let mut countries: Vec<Country> = self
            .countries
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches_ci(c.region.as_deref(), filters.region.as_deref()))
            .filter(|c| matches_ci(c.currency_code.as_deref(), filters.currency.as_deref()))
            .cloned()
            .collect();

        match sort {
            Some(CountrySort::GdpDesc) => {
                countries.sort_by(|a, b| cmp_nulls_last(a.estimated_gdp, b.estimated_gdp, true))
            }
            Some(CountrySort::GdpAsc) => {
                countries.sort_by(|a, b| cmp_nulls_last(a.estimated_gdp, b.estimated_gdp, false))
            }
            Some(CountrySort::PopulationDesc) => {
                countries.sort_by(|a, b| b.population.cmp(&a.population))
            }
            Some(CountrySort::PopulationAsc) => countries.sort_by_key(|c| c.population),
            Some(CountrySort::NameAsc) => countries.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(CountrySort::NameDesc) => countries.sort_by(|a, b| b.name.cmp(&a.name)),
            None => {}
        }

        Ok(countries)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Country>> {
        let countries = self.countries.lock().unwrap();
        Ok(countries
            .iter()
            .find(|c| same_name(&c.name, name))
            .cloned())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let mut countries = self.countries.lock().unwrap();
        let before = countries.len();
        countries.retain(|c| !same_name(&c.name, name));
        Ok((before - countries.len()) as u64)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.countries.lock().unwrap().len() as i64)
    }

    async fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        Ok(self.metadata_value(key))
    }

    async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.metadata
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// RENDERER
// =============================================================================

/// Records every render request; optionally fails each one
#[derive(Default)]
pub struct RecordingRenderer {
    fail: bool,
    calls: AtomicUsize,
    last: Mutex<Option<RefreshSummary>>,
    image: Mutex<Option<Vec<u8>>>,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_image(bytes: &[u8]) -> Self {
        Self {
            image: Mutex::new(Some(bytes.to_vec())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    pub fn last_summary(&self) -> Option<RefreshSummary> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryRenderer for RecordingRenderer {
    async fn render(&self, summary: &RefreshSummary) -> Result<PathBuf> {
        *self.last.lock().unwrap() = Some(summary.clone());
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);

        if self.fail {
            return Err(AppError::Render("simulated render failure".to_string()));
        }

        *self.image.lock().unwrap() = Some(b"<svg/>".to_vec());
        Ok(PathBuf::from("memory://summary.svg"))
    }

    async fn latest(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.image.lock().unwrap().clone())
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}
