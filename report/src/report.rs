use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use eyre::WrapErr;

use chuni_http_client::ChuniClient;
use chuni_parsers::{parse_player_profile_html, MalformedPolicy, ProfileLookup};
use chuni_songdb::{DifficultyCatalog, JacketSource};
use models::{EnrichedRecord, ReportData};

use crate::config::CatalogLocation;
use crate::pipeline::Pipeline;

pub const HOME_PATH: &str = "home/";
pub const BEST_PATH: &str = "home/playerData/ratingDetailBest/";
pub const RECENT_PATH: &str = "home/playerData/ratingDetailRecent/";

/// Source of logged-in CHUNITHM-NET pages, addressed relative to the mobile root.
pub trait PageSource {
    fn get_page(&self, path: &str) -> impl Future<Output = eyre::Result<String>> + Send;
}

impl PageSource for ChuniClient {
    async fn get_page(&self, path: &str) -> eyre::Result<String> {
        ChuniClient::get_page(self, path).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub include_recent: bool,
    pub allow_missing_profile: bool,
    pub malformed_policy: MalformedPolicy,
}

/// Loads the difficulty catalog once for the whole process.
pub async fn load_catalog(
    http: &reqwest::Client,
    location: &CatalogLocation,
) -> eyre::Result<Arc<DifficultyCatalog>> {
    let catalog = match location {
        CatalogLocation::Url(url) => chuni_songdb::fetch_difficulty_catalog(http, url).await?,
        CatalogLocation::File(path) => {
            tracing::info!("Loading difficulty catalog from {}", path.display());
            DifficultyCatalog::load_from_path(path)?
        }
    };
    if catalog.is_empty() {
        tracing::warn!("Difficulty catalog has no songs; every record will lack a level");
    }
    Ok(Arc::new(catalog))
}

pub async fn build_report<P, J>(
    pages: &P,
    catalog: Arc<DifficultyCatalog>,
    jackets: J,
    options: ReportOptions,
) -> eyre::Result<ReportData>
where
    P: PageSource,
    J: JacketSource + Clone,
{
    tracing::info!("Fetching player data");
    let home = pages.get_page(HOME_PATH).await.wrap_err("fetch home page")?;
    let profile = parse_player_profile_html(&home).wrap_err("parse player profile")?;
    if let ProfileLookup::NotFound = profile {
        if !options.allow_missing_profile {
            return Err(eyre::eyre!(
                "player profile not found on the home page; is the session still logged in?"
            ));
        }
        tracing::warn!("player profile not found; continuing without it");
    }

    tracing::info!("Fetching best songs");
    let best_html = pages.get_page(BEST_PATH).await.wrap_err("fetch best page")?;
    let best = Pipeline::new(catalog.clone(), jackets.clone(), options.malformed_policy)
        .run(&best_html)
        .await
        .wrap_err("aggregate best records")?;
    log_summary("best", &best);

    let recent = if options.include_recent {
        tracing::info!("Fetching recent songs");
        let recent_html = pages
            .get_page(RECENT_PATH)
            .await
            .wrap_err("fetch recent page")?;
        let recent = Pipeline::new(catalog, jackets, options.malformed_policy)
            .run(&recent_html)
            .await
            .wrap_err("aggregate recent records")?;
        log_summary("recent", &recent);
        Some(recent)
    } else {
        None
    };

    Ok(ReportData {
        player_data: profile.into_vec(),
        best,
        recent,
    })
}

/// Writes pretty JSON to `output`, or to stdout when `output` is `-`.
pub fn write_json<T: serde::Serialize>(value: &T, output: &Path) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).wrap_err("serialize json")?;
    if output == Path::new("-") {
        println!("{json}");
        return Ok(());
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).wrap_err("create output directory")?;
        }
    }
    std::fs::write(output, json)
        .wrap_err_with(|| format!("write json: {}", output.display()))?;
    Ok(())
}

fn log_summary(label: &str, records: &[EnrichedRecord]) {
    let degraded = records.iter().filter(|r| r.is_degraded()).count();
    let without_jacket = records.iter().filter(|r| r.jacket_url.is_none()).count();
    tracing::info!(
        "{label}: {} records ({} without level, {} without jacket)",
        records.len(),
        degraded,
        without_jacket
    );
}
