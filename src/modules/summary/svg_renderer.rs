use async_trait::async_trait;
use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use std::cmp::Ordering;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::countries::models::EnrichedCountry;
use crate::modules::summary::{RefreshSummary, SummaryRenderer};
use crate::shared::constants::SUMMARY_TOP_COUNTRIES;

const TEMPLATE_NAME: &str = "summary.svg.jinja";
const TEMPLATE_SOURCE: &str = include_str!("../../../templates/summary/summary.svg.jinja");

#[derive(Debug, Serialize)]
struct TopCountry<'a> {
    name: &'a str,
    gdp: String,
}

/// Renders the refresh summary as an SVG file on local disk
pub struct SvgSummaryRenderer {
    env: Environment<'static>,
    output_path: PathBuf,
}

impl SvgSummaryRenderer {
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let mut env = Environment::new();
        // Country names are user-visible text inside XML
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::Render(e.to_string()))?;

        Ok(Self {
            env,
            output_path: output_path.into(),
        })
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Unique sibling of the output file
    fn staging_path(&self) -> PathBuf {
        let file_name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "summary.svg".to_string());

        self.output_path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }

    pub fn render_svg(&self, summary: &RefreshSummary) -> Result<String> {
        let top_countries: Vec<TopCountry<'_>> = top_by_gdp(&summary.countries)
            .into_iter()
            .map(|(country, gdp)| TopCountry {
                name: &country.name,
                gdp: format_gdp(gdp),
            })
            .collect();

        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| AppError::Render(e.to_string()))?;

        template
            .render(context! {
                total_countries => summary.total_countries,
                last_refreshed_at => summary.last_refreshed_at,
                top_limit => SUMMARY_TOP_COUNTRIES,
                top_countries => top_countries,
            })
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

#[async_trait]
impl SummaryRenderer for SvgSummaryRenderer {
    async fn render(&self, summary: &RefreshSummary) -> Result<PathBuf> {
        let svg = self.render_svg(summary)?;

        if let Some(parent) = self
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Render(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        // Readers only ever see a complete image
        let staging = self.staging_path();
        tokio::fs::write(&staging, svg).await.map_err(|e| {
            AppError::Render(format!("Failed to write {}: {}", staging.display(), e))
        })?;

        if let Err(e) = tokio::fs::rename(&staging, &self.output_path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(AppError::Render(format!(
                "Failed to replace {}: {}",
                self.output_path.display(),
                e
            )));
        }

        tracing::info!("Summary image saved to {}", self.output_path.display());
        Ok(self.output_path.clone())
    }

    async fn latest(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.output_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read summary image {}: {}",
                self.output_path.display(),
                e
            ))),
        }
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

/// Countries with a GDP estimate, highest first, capped at the summary size
fn top_by_gdp(countries: &[EnrichedCountry]) -> Vec<(&EnrichedCountry, f64)> {
    let mut ranked: Vec<(&EnrichedCountry, f64)> = countries
        .iter()
        .filter_map(|c| c.estimated_gdp.map(|gdp| (c, gdp)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(SUMMARY_TOP_COUNTRIES);
    ranked
}

/// Two decimals with comma thousands separators, e.g. `1,234,567.89`
fn format_gdp(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
