mod difficulty;
mod jackets;

pub use difficulty::{DifficultyCatalog, LevelNotFoundError};
pub use jackets::{HttpJacketSource, JacketCatalog, JacketLink, JacketSource, JACKET_BASE_URL};

use eyre::WrapErr;

pub const DEFAULT_CATALOG_URL: &str = "https://dp4p6x0xfi5o9.cloudfront.net/chunithm/data.json";
pub const DEFAULT_JACKET_CATALOG_URL: &str = "https://otoge-db.net/chunithm/data/music-ex.json";

/// Downloads the chart-difficulty catalog. Failure here ends the run.
pub async fn fetch_difficulty_catalog(
    client: &reqwest::Client,
    url: &str,
) -> eyre::Result<DifficultyCatalog> {
    tracing::info!("Fetching difficulty catalog from {url}");
    let bytes = chuni_http_client::get_bytes(client, url)
        .await
        .wrap_err("fetch difficulty catalog")?;
    let catalog = DifficultyCatalog::from_json(&bytes).wrap_err("parse difficulty catalog")?;
    tracing::info!("Difficulty catalog loaded: {} songs", catalog.len());
    Ok(catalog)
}
