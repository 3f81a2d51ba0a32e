//! Summary image produced after every refresh cycle.

mod svg_renderer;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::core::error::Result;
use crate::features::countries::models::EnrichedCountry;

pub use svg_renderer::SvgSummaryRenderer;

/// Data needed to draw the summary of one refresh cycle
#[derive(Debug, Clone)]
pub struct RefreshSummary {
    pub countries: Vec<EnrichedCountry>,
    pub total_countries: usize,
    pub last_refreshed_at: String,
}

#[async_trait]
pub trait SummaryRenderer: Send + Sync {
    /// Render and store the image, replacing any previous one.
    async fn render(&self, summary: &RefreshSummary) -> Result<PathBuf>;

    /// Bytes of the most recently stored image, if any.
    async fn latest(&self) -> Result<Option<Vec<u8>>>;

    fn content_type(&self) -> &'static str;
}
