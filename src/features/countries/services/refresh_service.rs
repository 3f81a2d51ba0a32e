use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::countries::clients::{CountrySource, RateSource};
use crate::features::countries::models::RefreshOutcome;
use crate::features::countries::services::enrichment;
use crate::features::countries::services::CountryStore;
use crate::modules::summary::{RefreshSummary, SummaryRenderer};
use crate::shared::constants::LAST_REFRESHED_AT_KEY;

/// Drives one refresh cycle: fetch, enrich, upsert, stamp metadata, render.
///
/// Upstream failures abort before anything is persisted. Individual upsert
/// failures are counted and never stop the batch. The summary image is
/// rendered in a detached task whose outcome is only logged.
pub struct RefreshService {
    country_source: Arc<dyn CountrySource>,
    rate_source: Arc<dyn RateSource>,
    store: Arc<dyn CountryStore>,
    renderer: Arc<dyn SummaryRenderer>,
}

impl RefreshService {
    pub fn new(
        country_source: Arc<dyn CountrySource>,
        rate_source: Arc<dyn RateSource>,
        store: Arc<dyn CountryStore>,
        renderer: Arc<dyn SummaryRenderer>,
    ) -> Self {
        Self {
            country_source,
            rate_source,
            store,
            renderer,
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        tracing::info!("Starting countries refresh");

        let raw_countries = self.country_source.fetch_countries().await?;
        tracing::info!("Fetched {} countries", raw_countries.len());

        let rates = self.rate_source.fetch_rates().await?;
        tracing::info!("Fetched {} exchange rates", rates.len());

        let enriched = enrichment::enrich(&raw_countries, &rates);

        let mut successful = 0;
        let mut failed = 0;
        for country in &enriched {
            match self.store.upsert(country).await {
                Ok(()) => successful += 1,
                Err(e) => {
                    tracing::error!("Failed to upsert {}: {}", country.name, e);
                    failed += 1;
                }
            }
        }

        // Stamped even when every upsert failed
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.store
            .set_metadata(LAST_REFRESHED_AT_KEY, &timestamp)
            .await?;

        tracing::info!(
            "Refresh completed: {} successful, {} failed",
            successful,
            failed
        );

        let total = enriched.len();
        self.spawn_summary_render(RefreshSummary {
            countries: enriched,
            total_countries: total,
            last_refreshed_at: timestamp.clone(),
        });

        Ok(RefreshOutcome {
            total,
            successful,
            failed,
            timestamp,
        })
    }

    fn spawn_summary_render(&self, summary: RefreshSummary) {
        let renderer = Arc::clone(&self.renderer);

        tokio::spawn(async move {
            match renderer.render(&summary).await {
                Ok(path) => tracing::debug!("Summary image rendered at {}", path.display()),
                Err(e) => tracing::error!("Summary image generation failed: {}", e),
            }
        });
    }
}
