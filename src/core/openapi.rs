use utoipa::{Modify, OpenApi};

use crate::features::countries::{dtos as countries_dtos, handlers as countries_handlers};
use crate::features::health;
use crate::shared::types::{ErrorResponse, HealthResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Countries
        countries_handlers::refresh_countries,
        countries_handlers::list_countries,
        countries_handlers::get_status,
        countries_handlers::get_summary_image,
        countries_handlers::get_country,
        countries_handlers::delete_country,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            HealthResponse,
            // Countries
            countries_dtos::CountryResponseDto,
            countries_dtos::CountryStatusDto,
            countries_dtos::RefreshResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "countries", description = "Countries enriched with exchange rates and GDP estimates"),
    ),
    info(
        title = "Country Exchange API",
        version = "0.1.0",
        description = "Country metadata enriched with exchange rates and GDP estimates",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_country_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/countries",
            "/countries/refresh",
            "/countries/status",
            "/countries/image",
            "/countries/{name}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
