//! Score page -> enriched records.
//!
//! A run extracts the raw records, resolves all jackets with a single catalog
//! fetch, then resolves level and rating record by record. A level miss
//! degrades that record only; it is still emitted, with `level` and `rating`
//! left empty, so counts stay accurate.

use std::sync::Arc;

use eyre::WrapErr;

use chuni_parsers::{parse_scores_html, MalformedPolicy};
use chuni_songdb::{DifficultyCatalog, JacketSource, LevelNotFoundError};
use models::{EnrichedRecord, RawScoreRecord};

use crate::rating::rating;

/// Result of enriching one raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub record: EnrichedRecord,
    pub level_error: Option<LevelNotFoundError>,
}

pub fn enrich_record(
    catalog: &DifficultyCatalog,
    raw: RawScoreRecord,
    jacket_url: Option<String>,
) -> RecordOutcome {
    let (level, level_error) = match catalog.internal_level(&raw.title, raw.diff) {
        Ok(level) => (Some(level), None),
        Err(e) => (None, Some(e)),
    };
    let rating = level.map(|level| rating(level, raw.score));

    RecordOutcome {
        record: EnrichedRecord {
            raw,
            level,
            rating,
            jacket_url,
        },
        level_error,
    }
}

pub struct Pipeline<J> {
    catalog: Arc<DifficultyCatalog>,
    jackets: J,
    policy: MalformedPolicy,
}

impl<J: JacketSource> Pipeline<J> {
    pub fn new(catalog: Arc<DifficultyCatalog>, jackets: J, policy: MalformedPolicy) -> Self {
        Self {
            catalog,
            jackets,
            policy,
        }
    }

    pub async fn run(&self, html: &str) -> eyre::Result<Vec<EnrichedRecord>> {
        let raws = parse_scores_html(html, self.policy).wrap_err("extract score records")?;
        tracing::info!("Extracted {} score records", raws.len());
        if raws.is_empty() {
            return Ok(Vec::new());
        }

        let song_ids = raws.iter().map(|r| r.song_id.as_str()).collect::<Vec<_>>();
        let jacket_catalog = self
            .jackets
            .fetch_jacket_catalog()
            .await
            .wrap_err("load jacket catalog")?;
        let links = jacket_catalog.resolve(&song_ids);

        let mut enriched = Vec::with_capacity(raws.len());
        let mut degraded = 0usize;
        for (raw, link) in raws.into_iter().zip(links) {
            debug_assert_eq!(raw.song_id, link.song_id);
            let outcome = enrich_record(&self.catalog, raw, link.url);
            if let Some(e) = &outcome.level_error {
                degraded += 1;
                tracing::warn!("level lookup failed: {e}");
            }
            tracing::debug!(
                title = %outcome.record.raw.title,
                difficulty = ?outcome.record.raw.difficulty(),
                level = ?outcome.record.level,
                rating = ?outcome.record.rating,
                "record enriched"
            );
            enriched.push(outcome.record);
        }

        if degraded > 0 {
            tracing::warn!(
                "{} of {} records have no internal level",
                degraded,
                enriched.len()
            );
        }
        Ok(enriched)
    }
}
