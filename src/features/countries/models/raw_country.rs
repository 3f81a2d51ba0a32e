use std::collections::HashMap;

/// Country record as delivered by the upstream country source
#[derive(Debug, Clone, PartialEq)]
pub struct RawCountry {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    /// Currency codes in upstream order; may be empty
    pub currency_codes: Vec<String>,
    pub flag_url: Option<String>,
}

/// Exchange rates keyed by currency code, fetched once per refresh cycle.
///
/// Only finite, strictly positive rates are kept.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(code, rate)| {
                let valid = rate.is_finite() && *rate > 0.0;
                if !valid {
                    tracing::debug!("Dropping unusable exchange rate {} = {}", code, rate);
                }
                valid
            })
            .collect();

        Self { rates }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
