//! Countries enriched with exchange rates.
//!
//! A refresh pulls country metadata and exchange rates from two upstream
//! sources, derives each country's currency, rate and a GDP estimate, and
//! upserts the result by case-insensitive name.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/countries/refresh` | Run a refresh cycle |
//! | GET | `/countries` | List countries (`region`, `currency`, `sort`) |
//! | GET | `/countries/status` | Total countries and last refresh time |
//! | GET | `/countries/image` | Latest summary image |
//! | GET | `/countries/{name}` | Get country by name |
//! | DELETE | `/countries/{name}` | Delete country by name |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use clients::{ExchangeRateClient, RestCountriesClient};
pub use services::{CountryService, PgCountryStore, RefreshService};
