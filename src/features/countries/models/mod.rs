mod country;
mod raw_country;

pub use country::{
    Country, CountryFilters, CountrySort, CountryStatus, EnrichedCountry, RefreshOutcome,
};
pub use raw_country::{RateTable, RawCountry};
