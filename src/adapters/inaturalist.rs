use crate::adapters::http::{endpoint, get_json, Timeouts};
use crate::core::taxon::clean_species_name;
use crate::domain::model::{Coordinate, ObservedAt, OccurrenceRecord, Provenance};
use crate::domain::ports::OccurrenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

pub const INATURALIST_BASE_URL: &str = "https://api.inaturalist.org/v1";

#[derive(Debug, Deserialize)]
struct ResultPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    location: Option<String>,
    observed_on: Option<String>,
}

/// Parse iNaturalist's `"lat,lon"` location string.
pub fn parse_location(location: &str) -> Option<Coordinate> {
    let mut parts = location.split(',');
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    let lon = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(lat, lon))
}

impl Observation {
    fn into_record(self) -> Option<OccurrenceRecord> {
        let coordinate = parse_location(self.location.as_deref()?)?;
        let observed = self
            .observed_on
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .map(ObservedAt::Date);
        Some(OccurrenceRecord {
            coordinate,
            observed,
            provenance: Provenance::INaturalist,
        })
    }
}

/// Geo-tagged observations from iNaturalist.
///
/// iNaturalist taxon ids are unrelated to GBIF keys, so this source runs its
/// own name search instead of using the shared taxon resolver.
pub struct INaturalistSource {
    client: Client,
    base_url: String,
    limit: usize,
    timeouts: Timeouts,
}

impl INaturalistSource {
    pub fn new(client: Client, base_url: impl Into<String>, limit: usize, timeouts: Timeouts) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            limit,
            timeouts,
        }
    }

    /// Id of the first species-rank taxon matching `clean_name`.
    async fn find_taxon_id(&self, clean_name: &str) -> Result<Option<String>> {
        let url = endpoint(&self.base_url, "taxa");
        let page: ResultPage = get_json(
            &self.client,
            &url,
            &[("q", clean_name.to_string()), ("rank", "species".to_string())],
            self.timeouts.lookup,
        )
        .await?;

        Ok(page
            .results
            .first()
            .and_then(|taxon| taxon.get("id"))
            .and_then(|id| match id {
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::String(s) => Some(s.clone()),
                _ => None,
            }))
    }
}

#[async_trait]
impl OccurrenceSource for INaturalistSource {
    fn provenance(&self) -> Provenance {
        Provenance::INaturalist
    }

    async fn fetch_occurrences(&self, species_name: &str) -> Result<Vec<OccurrenceRecord>> {
        let clean_name = clean_species_name(species_name);
        if clean_name.is_empty() {
            return Ok(Vec::new());
        }

        let Some(taxon_id) = self.find_taxon_id(&clean_name).await? else {
            tracing::info!("🦋 iNaturalist has no taxon for '{}'", clean_name);
            return Ok(Vec::new());
        };

        let url = endpoint(&self.base_url, "observations");
        let page: ResultPage = get_json(
            &self.client,
            &url,
            &[
                ("taxon_id", taxon_id),
                ("per_page", self.limit.to_string()),
                ("has[]", "geo".to_string()),
            ],
            self.timeouts.fetch,
        )
        .await?;

        Ok(page
            .results
            .into_iter()
            .filter_map(|item| serde_json::from_value::<Observation>(item).ok())
            .filter_map(Observation::into_record)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{build_client, DEFAULT_USER_AGENT};
    use httpmock::prelude::*;

    fn source_for(server: &MockServer) -> INaturalistSource {
        INaturalistSource::new(
            build_client(DEFAULT_USER_AGENT).unwrap(),
            server.base_url(),
            200,
            Timeouts::default(),
        )
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location("38.42,27.14"), Some(Coordinate::new(38.42, 27.14)));
        assert_eq!(parse_location(" 38.42 , 27.14 "), Some(Coordinate::new(38.42, 27.14)));
        assert_eq!(parse_location("38.42"), None);
        assert_eq!(parse_location("38.42,abc"), None);
        assert_eq!(parse_location("1,2,3"), None);
        assert_eq!(parse_location(""), None);
    }

    #[tokio::test]
    async fn test_two_step_fetch_drops_unparseable_items() {
        let server = MockServer::start();
        let taxa_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/taxa")
                .query_param("q", "Procambarus clarkii")
                .query_param("rank", "species");
            then.status(200).json_body(serde_json::json!({
                "total_results": 2,
                "results": [{"id": 47507, "name": "Procambarus clarkii"}, {"id": 1}]
            }));
        });
        let obs_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/observations")
                .query_param("taxon_id", "47507")
                .query_param("per_page", "200");
            then.status(200).json_body(serde_json::json!({
                "results": [
                    {"location": "38.4237,27.1428", "observed_on": "2023-05-12"},
                    {"location": "not,a-number"},
                    {"location": null},
                    {"location": 12},
                    {"location": "36.8969,30.7133", "observed_on": "sometime"}
                ]
            }));
        });

        let records = source_for(&server)
            .fetch_occurrences("Procambarus clarkii (Girard, 1852)")
            .await
            .unwrap();

        taxa_mock.assert();
        obs_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].coordinate, Coordinate::new(38.4237, 27.1428));
        assert_eq!(
            records[0].observed,
            Some(ObservedAt::Date(NaiveDate::from_ymd_opt(2023, 5, 12).unwrap()))
        );
        assert_eq!(records[1].observed, None);
        assert!(records.iter().all(|r| r.provenance == Provenance::INaturalist));
    }

    #[tokio::test]
    async fn test_no_taxon_candidate_skips_observations() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/taxa");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });
        let obs_mock = server.mock(|when, then| {
            when.method(GET).path("/observations");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });

        let records = source_for(&server).fetch_occurrences("Nonexistus fictus").await.unwrap();

        assert!(records.is_empty());
        obs_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_observation_failure_is_reported_to_caller() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/taxa");
            then.status(200).json_body(serde_json::json!({"results": [{"id": 5}]}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/observations");
            then.status(429);
        });

        assert!(source_for(&server).fetch_occurrences("Vespa velutina").await.is_err());
    }
}
