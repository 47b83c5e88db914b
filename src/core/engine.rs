use crate::adapters::gbif::{GbifOccurrenceSource, GbifTaxonMatcher};
use crate::adapters::http::build_client;
use crate::adapters::inaturalist::INaturalistSource;
use crate::config::AtlasConfig;
use crate::core::aggregator::GeoAggregator;
use crate::core::gazetteer::Gazetteer;
use crate::core::location::LocationResolver;
use crate::core::taxon::{clean_species_name, TaxonCache, TaxonResolver};
use crate::domain::model::{MapReport, SourceSelection, SpeciesRecord};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Wires configuration, HTTP adapters and the aggregator together.
///
/// One engine should live for the whole process so the taxon cache is
/// shared across species selections.
pub struct AtlasEngine {
    aggregator: GeoAggregator,
    gbif: Arc<GbifOccurrenceSource>,
    taxon_cache: Arc<TaxonCache>,
}

impl AtlasEngine {
    pub fn new(config: &AtlasConfig) -> Result<Self> {
        Self::with_gazetteer(config, Gazetteer::builtin())
    }

    pub fn with_gazetteer(config: &AtlasConfig, gazetteer: Arc<Gazetteer>) -> Result<Self> {
        config.validate()?;

        let client = build_client(&config.http.user_agent)?;
        let timeouts = config.timeouts();
        let limit = config.sources.occurrence_limit;

        let taxon_cache = Arc::new(TaxonCache::new());
        let matcher = Arc::new(GbifTaxonMatcher::new(
            client.clone(),
            config.sources.gbif_base_url.clone(),
            timeouts,
        ));
        let taxa = Arc::new(TaxonResolver::new(matcher, taxon_cache.clone()));

        let gbif = Arc::new(GbifOccurrenceSource::new(
            client.clone(),
            config.sources.gbif_base_url.clone(),
            taxa,
            limit,
            timeouts,
        ));
        let inaturalist = Arc::new(INaturalistSource::new(
            client,
            config.sources.inaturalist_base_url.clone(),
            limit,
            timeouts,
        ));

        tracing::debug!(
            "🔧 Engine ready: {} gazetteer entries, occurrence limit {}",
            gazetteer.len(),
            limit
        );

        Ok(Self {
            aggregator: GeoAggregator::new(LocationResolver::new(gazetteer), gbif.clone(), inaturalist),
            gbif,
            taxon_cache,
        })
    }

    pub fn taxon_cache(&self) -> &TaxonCache {
        &self.taxon_cache
    }

    pub async fn map_species(
        &self,
        record: &SpeciesRecord,
        sources: SourceSelection,
        with_image: bool,
    ) -> MapReport {
        tracing::info!("🗺️ Mapping '{}' with {:?}", record.species, sources);

        let layers_fut = self.aggregator.aggregate(record, sources);
        let (layers, image_url) = if with_image {
            tokio::join!(layers_fut, self.gbif.species_image(&record.species))
        } else {
            (layers_fut.await, None)
        };

        for layer in &layers {
            tracing::info!(
                "📊 {} - {} point(s), status {:?}",
                layer.name,
                layer.len(),
                layer.status
            );
        }

        MapReport {
            species: record.species.clone(),
            cleaned_name: clean_species_name(&record.species),
            image_url,
            layers,
        }
    }
}
