use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use eyre::WrapErr;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use thiserror::Error;

pub const CHUNI_NET_ROOT: &str = "https://chunithm-net-eng.com/mobile/";
const JAPANESE_HOST: &str = "new.chunithm-net.com";
const INTERNATIONAL_HOST: &str = "chunithm-net-eng.com";

/// A page or catalog could not be fetched. Always fatal for the run.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("non-success status {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("CHUNITHM-NET session is not established (landed on {url})")]
    SessionExpired { url: String },
}

/// GETs `url` and fails on anything but a 2xx answer.
pub async fn get_checked(
    client: &reqwest::Client,
    url: &str,
) -> Result<reqwest::Response, TransportError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: resp.url().to_string(),
            status,
        });
    }
    Ok(resp)
}

pub async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, TransportError> {
    let resp = get_checked(client, url).await?;
    let bytes = resp.bytes().await.map_err(|source| TransportError::Body {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}

/// Client for the logged-in CHUNITHM-NET pages. The session cookies are read
/// from a cookie jar exported beforehand; this client never logs in.
#[derive(Debug, Clone)]
pub struct ChuniClient {
    base_url: Url,
    client: Arc<reqwest::Client>,
}

impl ChuniClient {
    pub fn new(base_url: &str, cookie_path: &Path, timeout: Duration) -> eyre::Result<Self> {
        let base_url = validate_net_base_url(base_url)?;
        let cookie_store = load_cookie_store(cookie_path).wrap_err("load cookie store")?;
        let cookie_store = Arc::new(CookieStoreMutex::new(cookie_store));

        let client = Arc::new(
            reqwest::Client::builder()
                .default_headers(default_headers())
                .redirect(reqwest::redirect::Policy::limited(10))
                .cookie_provider(cookie_store)
                .timeout(timeout)
                .build()
                .wrap_err("build reqwest client")?,
        );

        Ok(Self { base_url, client })
    }

    /// Resolves a path such as `home/playerData/ratingDetailBest/` against the base URL.
    pub fn page_url(&self, path: &str) -> eyre::Result<Url> {
        self.base_url
            .join(path)
            .wrap_err_with(|| format!("resolve page url: {path}"))
    }

    pub async fn get_page(&self, path: &str) -> eyre::Result<String> {
        let url = self.page_url(path)?;
        tracing::debug!(%url, "fetching page");
        let resp = get_checked(&self.client, url.as_str()).await?;
        let final_url = resp.url().clone();
        let body = resp.text().await.map_err(|source| TransportError::Body {
            url: final_url.to_string(),
            source,
        })?;
        if looks_like_login_or_expired(&final_url, &body) {
            return Err(TransportError::SessionExpired {
                url: final_url.to_string(),
            }
            .into());
        }
        Ok(body)
    }
}

/// Only the international CHUNITHM-NET is supported.
pub fn validate_net_base_url(base_url: &str) -> eyre::Result<Url> {
    let url = Url::parse(base_url).wrap_err_with(|| format!("invalid base url: {base_url}"))?;
    match url.host_str() {
        Some(JAPANESE_HOST) => Err(eyre::eyre!(
            "Japanese CHUNITHM-NET ({JAPANESE_HOST}) is not supported"
        )),
        Some(INTERNATIONAL_HOST) => {
            if url.path().ends_with('/') {
                Ok(url)
            } else {
                let path = format!("{}/", url.path());
                let mut url = url;
                url.set_path(&path);
                Ok(url)
            }
        }
        _ => Err(eyre::eyre!("{base_url} is not CHUNITHM-NET")),
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,ja;q=0.8"),
    );
    headers
}

fn looks_like_login_or_expired(final_url: &Url, body: &str) -> bool {
    if final_url.path().starts_with("/mobile/error") {
        return true;
    }
    let url_str = final_url.as_str();
    if url_str.contains("lng-tgk-aime-gw.am-all.net") || url_str.contains("/common_auth/") {
        return true;
    }
    body.contains("ERROR CODE")
}

fn load_cookie_store(path: &Path) -> eyre::Result<CookieStore> {
    if !path.exists() {
        tracing::warn!(
            "cookie file {} not found; requests will be anonymous",
            path.display()
        );
        return Ok(CookieStore::default());
    }
    let file = File::open(path).wrap_err("open cookie file")?;
    let reader = BufReader::new(file);
    cookie_store::serde::json::load_all(reader).map_err(|e| eyre::eyre!("parse cookie json: {e}"))
}
