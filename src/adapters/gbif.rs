use crate::adapters::http::{endpoint, get_json, Timeouts};
use crate::core::taxon::TaxonResolver;
use crate::domain::model::{Coordinate, ObservedAt, OccurrenceRecord, Provenance, TaxonKey};
use crate::domain::ports::{OccurrenceSource, TaxonMatcher};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const GBIF_BASE_URL: &str = "https://api.gbif.org/v1";

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OccurrenceItem {
    decimal_latitude: Option<f64>,
    decimal_longitude: Option<f64>,
    year: Option<i32>,
    #[serde(default)]
    media: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    identifier: Option<String>,
}

impl OccurrenceItem {
    fn into_record(self) -> Option<OccurrenceRecord> {
        Some(OccurrenceRecord {
            coordinate: Coordinate::new(self.decimal_latitude?, self.decimal_longitude?),
            observed: self.year.map(ObservedAt::Year),
            provenance: Provenance::Gbif,
        })
    }
}

/// GBIF `species/match` lookup.
pub struct GbifTaxonMatcher {
    client: Client,
    base_url: String,
    timeouts: Timeouts,
}

impl GbifTaxonMatcher {
    pub fn new(client: Client, base_url: impl Into<String>, timeouts: Timeouts) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeouts,
        }
    }
}

#[async_trait]
impl TaxonMatcher for GbifTaxonMatcher {
    async fn match_name(&self, clean_name: &str) -> Result<Option<TaxonKey>> {
        let url = endpoint(&self.base_url, "species/match");
        let body: serde_json::Value = get_json(
            &self.client,
            &url,
            &[("name", clean_name.to_string())],
            self.timeouts.lookup,
        )
        .await?;

        Ok(body.get("usageKey").and_then(TaxonKey::from_json))
    }
}

/// Occurrence records from GBIF, keyed by the memoized taxon lookup.
pub struct GbifOccurrenceSource {
    client: Client,
    base_url: String,
    taxa: Arc<TaxonResolver>,
    limit: usize,
    timeouts: Timeouts,
}

impl GbifOccurrenceSource {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        taxa: Arc<TaxonResolver>,
        limit: usize,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            taxa,
            limit,
            timeouts,
        }
    }

    async fn search(&self, query: &[(&str, String)], timeout: Duration) -> Result<Vec<OccurrenceItem>> {
        let url = endpoint(&self.base_url, "occurrence/search");
        let page: SearchPage = get_json(&self.client, &url, query, timeout).await?;

        // 無法解析的單筆資料直接略過
        Ok(page
            .results
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    /// URL of the first still image attached to any GBIF occurrence of the species.
    pub async fn species_image(&self, species_name: &str) -> Option<String> {
        let key = self.taxa.resolve(species_name).await?;
        let query = [
            ("taxonKey", key.as_str().to_owned()),
            ("mediaType", "StillImage".to_string()),
            ("limit", "1".to_string()),
        ];

        // 圖片查詢沿用名稱查詢的短逾時
        let items = match self.search(&query, self.timeouts.lookup).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("⚠️ GBIF image lookup for '{}' failed: {}", species_name, e);
                return None;
            }
        };

        items
            .into_iter()
            .next()?
            .media
            .into_iter()
            .find(|m| m.kind.as_deref() == Some("StillImage"))
            .and_then(|m| m.identifier)
    }
}

#[async_trait]
impl OccurrenceSource for GbifOccurrenceSource {
    fn provenance(&self) -> Provenance {
        Provenance::Gbif
    }

    async fn fetch_occurrences(&self, species_name: &str) -> Result<Vec<OccurrenceRecord>> {
        let Some(key) = self.taxa.lookup(species_name).await? else {
            tracing::info!("🌍 GBIF has no taxon for '{}'", species_name);
            return Ok(Vec::new());
        };

        let query = [
            ("taxonKey", key.as_str().to_owned()),
            ("limit", self.limit.to_string()),
            ("hasCoordinate", "true".to_string()),
        ];
        let items = self.search(&query, self.timeouts.fetch).await?;

        Ok(items
            .into_iter()
            .filter_map(OccurrenceItem::into_record)
            .collect())
    }
}
