use std::path::PathBuf;
use std::time::Duration;

use eyre::WrapErr;

use chuni_http_client::CHUNI_NET_ROOT;
use chuni_parsers::MalformedPolicy;
use chuni_songdb::{DEFAULT_CATALOG_URL, DEFAULT_JACKET_CATALOG_URL};

use crate::cli::RootArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub base_url: String,
    pub cookie_path: PathBuf,
    pub catalog: CatalogLocation,
    pub jacket_catalog_url: String,
    pub http_timeout: Duration,
    pub malformed_policy: MalformedPolicy,
}

impl ReportConfig {
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        Self::from_vars_and_args(args, |key| std::env::var(key).ok())
    }

    pub fn from_vars_and_args(
        args: &RootArgs,
        var: impl Fn(&str) -> Option<String>,
    ) -> eyre::Result<Self> {
        let base_url = var("CHUNI_NET_BASE_URL").unwrap_or_else(|| CHUNI_NET_ROOT.to_string());
        let cookie_path = match &args.cookie_path {
            Some(path) => path.clone(),
            None => var("CHUNI_COOKIE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/cookies.json")),
        };
        let catalog = match &args.catalog_file {
            Some(path) => CatalogLocation::File(path.clone()),
            None => CatalogLocation::Url(
                var("CHUNI_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            ),
        };
        let jacket_catalog_url = var("CHUNI_JACKET_CATALOG_URL")
            .unwrap_or_else(|| DEFAULT_JACKET_CATALOG_URL.to_string());
        let http_timeout = var("CHUNI_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .wrap_err("CHUNI_HTTP_TIMEOUT_SECS must be a whole number of seconds")?;
        let malformed_policy = if args.abort_on_malformed {
            MalformedPolicy::Abort
        } else {
            var("CHUNI_MALFORMED_POLICY")
                .map(|v| v.parse::<MalformedPolicy>())
                .transpose()
                .wrap_err("CHUNI_MALFORMED_POLICY must be \"skip\" or \"abort\"")?
                .unwrap_or_default()
        };

        Ok(Self {
            base_url,
            cookie_path,
            catalog,
            jacket_catalog_url,
            http_timeout,
            malformed_policy,
        })
    }
}
