//! Joins raw country records with the exchange rate table.
//!
//! `estimated_gdp` follows a three-way rule, evaluated in order:
//!
//! 1. no currency code → `Some(0.0)`
//! 2. currency code without a usable rate → `None`
//! 3. otherwise → `population * U[1000, 2000) / exchange_rate`
//!
//! The multiplier is drawn independently per country, so the estimate is not
//! reproducible across refresh cycles.

use rand::Rng;

use crate::features::countries::models::{EnrichedCountry, RateTable, RawCountry};
use crate::shared::constants::{GDP_MULTIPLIER_MAX, GDP_MULTIPLIER_MIN};

/// Enrich every raw country against the full rate table.
pub fn enrich(raw_countries: &[RawCountry], rates: &RateTable) -> Vec<EnrichedCountry> {
    let mut rng = rand::thread_rng();
    enrich_with_rng(raw_countries, rates, &mut rng)
}

pub fn enrich_with_rng<R: Rng>(
    raw_countries: &[RawCountry],
    rates: &RateTable,
    rng: &mut R,
) -> Vec<EnrichedCountry> {
    raw_countries
        .iter()
        .map(|raw| enrich_one(raw, rates, rng))
        .collect()
}

fn enrich_one<R: Rng>(
    raw: &RawCountry,
    rates: &RateTable,
    rng: &mut R,
) -> EnrichedCountry {
    let currency_code = raw.currency_codes.first().cloned();
    let exchange_rate = currency_code.as_deref().and_then(|code| rates.get(code));

    let estimated_gdp = match (&currency_code, exchange_rate) {
        (None, _) => Some(0.0),
        (Some(_), None) => None,
        (Some(_), Some(rate)) => {
            let multiplier = rng.gen_range(GDP_MULTIPLIER_MIN..GDP_MULTIPLIER_MAX);
            Some(raw.population.max(0) as f64 * multiplier / rate)
        }
    };

    EnrichedCountry {
        name: raw.name.clone(),
        capital: raw.capital.clone(),
        region: raw.region.clone(),
        population: raw.population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url: raw.flag_url.clone(),
    }
}
