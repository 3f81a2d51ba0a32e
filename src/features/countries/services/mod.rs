mod country_service;
mod country_store;
pub mod enrichment;
mod refresh_service;

pub use country_service::CountryService;
pub use country_store::{CountryStore, PgCountryStore};
pub use refresh_service::RefreshService;
