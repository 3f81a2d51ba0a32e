use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::countries::dtos::{
    CountryListQuery, CountryResponseDto, CountryStatusDto, RefreshResponseDto,
};
use crate::features::countries::services::{CountryService, RefreshService};
use crate::modules::summary::SummaryRenderer;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Fetch, enrich and persist all countries
#[utoipa::path(
    post,
    path = "/countries/refresh",
    responses(
        (status = 200, description = "Refresh completed (individual upserts may have failed)", body = RefreshResponseDto),
        (status = 503, description = "Country or exchange rate source unavailable", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn refresh_countries(
    State(service): State<Arc<RefreshService>>,
) -> Result<Json<RefreshResponseDto>> {
    // Runs to completion even if the client disconnects
    let outcome = tokio::spawn(async move { service.refresh().await })
        .await
        .map_err(|e| AppError::Internal(format!("Refresh task failed: {}", e)))??;

    Ok(Json(outcome.into()))
}

/// List countries with optional filters and sorting
#[utoipa::path(
    get,
    path = "/countries",
    params(CountryListQuery),
    responses(
        (status = 200, description = "List of countries", body = Vec<CountryResponseDto>),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn list_countries(
    State(service): State<Arc<CountryService>>,
    Query(query): Query<CountryListQuery>,
) -> Result<Json<Vec<CountryResponseDto>>> {
    let countries = service.list(&query.filters(), query.sort()).await?;
    let dtos: Vec<CountryResponseDto> = countries.into_iter().map(Into::into).collect();
    Ok(Json(dtos))
}

/// Total persisted countries and the last refresh timestamp
#[utoipa::path(
    get,
    path = "/countries/status",
    responses(
        (status = 200, description = "Refresh status", body = CountryStatusDto)
    ),
    tag = "countries"
)]
pub async fn get_status(
    State(service): State<Arc<CountryService>>,
) -> Result<Json<CountryStatusDto>> {
    let status = service.status().await?;
    Ok(Json(status.into()))
}

/// Serve the most recent summary image
#[utoipa::path(
    get,
    path = "/countries/image",
    responses(
        (status = 200, description = "Summary image (image/svg+xml)"),
        (status = 404, description = "No summary image generated yet", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn get_summary_image(
    State(renderer): State<Arc<dyn SummaryRenderer>>,
) -> Result<Response> {
    let bytes = renderer
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("Summary image not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, renderer.content_type())], bytes).into_response())
}

/// Get a country by name (case-insensitive)
#[utoipa::path(
    get,
    path = "/countries/{name}",
    params(
        ("name" = String, Path, description = "Country name (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Country details", body = CountryResponseDto),
        (status = 404, description = "Country not found", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn get_country(
    State(service): State<Arc<CountryService>>,
    Path(name): Path<String>,
) -> Result<Json<CountryResponseDto>> {
    let country = service.get_by_name(&name).await?;
    Ok(Json(country.into()))
}

/// Delete a country by name (case-insensitive)
#[utoipa::path(
    delete,
    path = "/countries/{name}",
    params(
        ("name" = String, Path, description = "Country name (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Country deleted", body = MessageResponse),
        (status = 404, description = "Country not found", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn delete_country(
    State(service): State<Arc<CountryService>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete_by_name(&name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Country '{}' deleted successfully",
        name
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::countries::services::CountryStore;
    use crate::shared::constants::LAST_REFRESHED_AT_KEY;
    use crate::shared::test_helpers::{
        raw_country, sample_rates, InMemoryCountryStore, RecordingRenderer, StaticCountrySource,
        StaticRateSource,
    };
    use std::time::Duration;

    #[tokio::test]
    async fn test_refresh_completes_after_client_disconnect() {
        let store =
            Arc::new(InMemoryCountryStore::default().with_upsert_delay(Duration::from_millis(50)));
        let service = Arc::new(RefreshService::new(
            Arc::new(StaticCountrySource::new(vec![
                raw_country("Nigeria", 206_139_589, &["NGN"]),
                raw_country("Ghana", 31_072_940, &["GHS"]),
                raw_country("Kenya", 53_771_300, &["KES"]),
            ])),
            Arc::new(StaticRateSource::new(sample_rates())),
            store.clone(),
            Arc::new(RecordingRenderer::default()),
        ));

        // Request future is dropped partway through the batch
        let dropped = tokio::time::timeout(
            Duration::from_millis(80),
            refresh_countries(State(service)),
        )
        .await;
        assert!(dropped.is_err());

        tokio::time::timeout(Duration::from_secs(2), async {
            while store.metadata_value(LAST_REFRESHED_AT_KEY).is_none() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("refresh never stamped last_refreshed_at");

        assert_eq!(store.upsert_attempts(), 3);
        assert_eq!(store.count().await.unwrap(), 3);
    }
}
