use crate::domain::model::{OccurrenceRecord, Provenance, TaxonKey};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One request against a registry's name-matching endpoint.
#[async_trait]
pub trait TaxonMatcher: Send + Sync {
    /// `Ok(None)` means the registry answered but knows no such name.
    async fn match_name(&self, clean_name: &str) -> Result<Option<TaxonKey>>;
}

/// Fetch geo-tagged occurrences of a species from one remote source.
///
/// Implementations return `Err` on transport or payload failures; the
/// aggregator turns those into an unavailable layer, so errors never reach
/// the rendering side.
#[async_trait]
pub trait OccurrenceSource: Send + Sync {
    fn provenance(&self) -> Provenance;

    async fn fetch_occurrences(&self, species_name: &str) -> Result<Vec<OccurrenceRecord>>;
}
