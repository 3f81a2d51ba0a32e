use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::countries::handlers;
use crate::features::countries::services::{CountryService, RefreshService};
use crate::modules::summary::SummaryRenderer;

/// Create routes for the countries feature
pub fn routes(
    country_service: Arc<CountryService>,
    refresh_service: Arc<RefreshService>,
    renderer: Arc<dyn SummaryRenderer>,
) -> Router {
    let refresh = Router::new()
        .route("/countries/refresh", post(handlers::refresh_countries))
        .with_state(refresh_service);

    let image = Router::new()
        .route("/countries/image", get(handlers::get_summary_image))
        .with_state(renderer);

    // Static paths take precedence over the {name} capture
    let countries = Router::new()
        .route("/countries", get(handlers::list_countries))
        .route("/countries/status", get(handlers::get_status))
        .route(
            "/countries/{name}",
            get(handlers::get_country).delete(handlers::delete_country),
        )
        .with_state(country_service);

    Router::new().merge(refresh).merge(image).merge(countries)
}
