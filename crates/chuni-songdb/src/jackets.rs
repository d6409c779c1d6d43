use std::collections::HashMap;
use std::future::Future;

use eyre::WrapErr;
use serde::{Deserialize, Deserializer};

pub const JACKET_BASE_URL: &str = "https://otoge-db.net/chunithm/jacket/";

#[derive(Debug, Clone, Deserialize)]
struct JacketEntry {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    image: String,
}

/// Jacket artwork by song id. Fetched fresh for every pipeline run.
#[derive(Debug, Clone, Default)]
pub struct JacketCatalog {
    by_id: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JacketLink {
    pub song_id: String,
    /// `None` means no artwork is available, not an error.
    pub url: Option<String>,
}

impl JacketCatalog {
    pub fn from_json(bytes: &[u8]) -> eyre::Result<Self> {
        let entries: Vec<JacketEntry> =
            serde_json::from_slice(bytes).wrap_err("decode jacket catalog json")?;
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_id.entry(entry.id).or_insert(entry.image);
        }
        Ok(Self { by_id })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn url_for(&self, song_id: &str) -> Option<String> {
        self.by_id
            .get(song_id)
            .map(|image| format!("{JACKET_BASE_URL}{image}"))
    }

    /// Resolves every id in one pass, keeping input order and duplicates.
    pub fn resolve<S: AsRef<str>>(&self, song_ids: &[S]) -> Vec<JacketLink> {
        song_ids
            .iter()
            .map(|id| JacketLink {
                song_id: id.as_ref().to_string(),
                url: self.url_for(id.as_ref()),
            })
            .collect()
    }
}

/// Where the pipeline gets its jacket catalog from.
pub trait JacketSource {
    fn fetch_jacket_catalog(&self) -> impl Future<Output = eyre::Result<JacketCatalog>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpJacketSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJacketSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl JacketSource for HttpJacketSource {
    async fn fetch_jacket_catalog(&self) -> eyre::Result<JacketCatalog> {
        tracing::info!("Fetching jacket catalog from {}", self.url);
        let bytes = chuni_http_client::get_bytes(&self.client, &self.url)
            .await
            .wrap_err("fetch jacket catalog")?;
        let catalog = JacketCatalog::from_json(&bytes)?;
        if catalog.is_empty() {
            tracing::warn!("Jacket catalog is empty; no record will have artwork");
        } else {
            tracing::info!("Jacket catalog loaded: {} entries", catalog.len());
        }
        Ok(catalog)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_order_and_marks_misses() {
        let catalog = JacketCatalog::from_json(
            br#"[
                { "id": "180", "image": "9f3c.jpg", "title": "Garakuta Doll Play" },
                { "id": 71, "image": "0b1e.jpg" }
            ]"#,
        )
        .unwrap();

        let links = catalog.resolve(&["71", "404", "180", "71"]);
        assert_eq!(links.len(), 4);
        assert_eq!(
            links[0].url.as_deref(),
            Some("https://otoge-db.net/chunithm/jacket/0b1e.jpg")
        );
        assert_eq!(links[1].song_id, "404");
        assert_eq!(links[1].url, None);
        assert_eq!(
            links[2].url.as_deref(),
            Some("https://otoge-db.net/chunithm/jacket/9f3c.jpg")
        );
        assert_eq!(links[3], links[0]);
    }

    #[test]
    fn first_entry_for_an_id_wins() {
        let catalog = JacketCatalog::from_json(
            br#"[{ "id": "1", "image": "a.jpg" }, { "id": "1", "image": "b.jpg" }]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.url_for("1").as_deref(),
            Some("https://otoge-db.net/chunithm/jacket/a.jpg")
        );
    }
}
