use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::countries::models::{
    Country, CountryFilters, CountrySort, CountryStatus, EnrichedCountry,
};
use crate::shared::constants::LAST_REFRESHED_AT_KEY;

const COUNTRY_COLUMNS: &str = "id, name, capital, region, population, currency_code, \
     exchange_rate, estimated_gdp, flag_url, last_refreshed_at, created_at, updated_at";

/// Persistence contract for countries and refresh metadata.
///
/// Country identity is the case-insensitive name.
#[async_trait]
pub trait CountryStore: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Update the row matching `country.name` (case-insensitive) or insert a
    /// new one. The existence check and the write are not atomic.
    async fn upsert(&self, country: &EnrichedCountry) -> Result<()>;

    /// List countries matching all given filters. `None` keeps insertion order.
    async fn get_all(
        &self,
        filters: &CountryFilters,
        sort: Option<CountrySort>,
    ) -> Result<Vec<Country>>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Country>>;

    /// Returns the number of removed rows (0 or 1).
    async fn delete_by_name(&self, name: &str) -> Result<u64>;

    async fn count(&self) -> Result<i64>;

    async fn get_metadata(&self, key: &str) -> Result<Option<String>>;

    async fn set_metadata(&self, key: &str, value: &str) -> Result<()>;

    async fn status(&self) -> Result<CountryStatus> {
        let total_countries = self.count().await?;
        let last_refreshed_at = self.get_metadata(LAST_REFRESHED_AT_KEY).await?;

        Ok(CountryStatus {
            total_countries,
            last_refreshed_at,
        })
    }
}

/// Postgres-backed [`CountryStore`]
pub struct PgCountryStore {
    pool: PgPool,
}

impl PgCountryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn update(&self, country: &EnrichedCountry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE countries
            SET capital = $1,
                region = $2,
                population = $3,
                currency_code = $4,
                exchange_rate = $5,
                estimated_gdp = $6,
                flag_url = $7,
                last_refreshed_at = NOW(),
                updated_at = NOW()
            WHERE LOWER(name) = LOWER($8)
            "#,
        )
        .bind(&country.capital)
        .bind(&country.region)
        .bind(country.population)
        .bind(&country.currency_code)
        .bind(country.exchange_rate)
        .bind(country.estimated_gdp)
        .bind(&country.flag_url)
        .bind(&country.name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update country {}: {:?}", country.name, e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn insert(&self, country: &EnrichedCountry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO countries
                (id, name, capital, region, population, currency_code,
                 exchange_rate, estimated_gdp, flag_url, last_refreshed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&country.name)
        .bind(&country.capital)
        .bind(&country.region)
        .bind(country.population)
        .bind(&country.currency_code)
        .bind(country.exchange_rate)
        .bind(country.estimated_gdp)
        .bind(&country.flag_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert country {}: {:?}", country.name, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}

#[async_trait]
impl CountryStore for PgCountryStore {
    async fn exists(&self, name: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM countries WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check country {}: {:?}", name, e);
            AppError::Database(e)
        })?;

        Ok(exists)
    }

    async fn upsert(&self, country: &EnrichedCountry) -> Result<()> {
        if self.exists(&country.name).await? {
            self.update(country).await
        } else {
            self.insert(country).await
        }
    }

    async fn get_all(
        &self,
        filters: &CountryFilters,
        sort: Option<CountrySort>,
    ) -> Result<Vec<Country>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM countries", COUNTRY_COLUMNS));
        let mut has_condition = false;

        if let Some(region) = filters.region.as_deref().filter(|r| !r.is_empty()) {
            builder.push(" WHERE LOWER(region) = LOWER(");
            builder.push_bind(region.to_owned());
            builder.push(")");
            has_condition = true;
        }

        if let Some(currency) = filters.currency.as_deref().filter(|c| !c.is_empty()) {
            builder.push(if has_condition { " AND " } else { " WHERE " });
            builder.push("LOWER(currency_code) = LOWER(");
            builder.push_bind(currency.to_owned());
            builder.push(")");
        }

        builder.push(" ORDER BY ");
        builder.push(sort.map_or("created_at ASC", |s| s.order_by_clause()));

        let countries = builder
            .build_query_as::<Country>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list countries: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(countries)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(&format!(
            "SELECT {} FROM countries WHERE LOWER(name) = LOWER($1)",
            COUNTRY_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch country {}: {:?}", name, e);
            AppError::Database(e)
        })?;

        Ok(country)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM countries WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete country {}: {:?}", name, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM countries")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count countries: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, Option<String>>(
            "SELECT value FROM metadata WHERE key_name = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read metadata {}: {:?}", key, e);
            AppError::Database(e)
        })?;

        Ok(value.flatten())
    }

    async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO metadata (key_name, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key_name)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write metadata {}: {:?}", key, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
