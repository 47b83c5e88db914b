use crate::core::location::LocationResolver;
use crate::domain::model::{
    LayerPoint, LayerStatus, Provenance, SourceSelection, SpatialLayer, SpeciesRecord,
};
use crate::domain::ports::OccurrenceSource;
use std::sync::Arc;

/// Builds the layered map dataset for one species.
///
/// Layers always come back in the order local, GBIF, iNaturalist, with
/// disabled sources omitted. The two remote sources are queried
/// concurrently and a failure in one never affects the other.
pub struct GeoAggregator {
    locations: LocationResolver,
    registry: Arc<dyn OccurrenceSource>,
    observations: Arc<dyn OccurrenceSource>,
}

impl GeoAggregator {
    pub fn new(
        locations: LocationResolver,
        registry: Arc<dyn OccurrenceSource>,
        observations: Arc<dyn OccurrenceSource>,
    ) -> Self {
        Self {
            locations,
            registry,
            observations,
        }
    }

    pub async fn aggregate(
        &self,
        record: &SpeciesRecord,
        sources: SourceSelection,
    ) -> Vec<SpatialLayer> {
        let mut layers = Vec::with_capacity(3);

        if sources.local {
            layers.push(self.local_layer(&record.places));
        }

        let species = record.species.as_str();
        let registry = async {
            if sources.gbif {
                Some(occurrence_layer(self.registry.as_ref(), species).await)
            } else {
                None
            }
        };
        let observations = async {
            if sources.inaturalist {
                Some(occurrence_layer(self.observations.as_ref(), species).await)
            } else {
                None
            }
        };

        let (registry, observations) = tokio::join!(registry, observations);
        layers.extend(registry);
        layers.extend(observations);

        layers
    }

    /// One point per place-name line that the gazetteer can place.
    pub fn local_layer(&self, places: &str) -> SpatialLayer {
        let mut requested = 0usize;
        let mut points = Vec::new();

        for line in places.lines() {
            if line.trim().is_empty() {
                continue;
            }
            requested += 1;
            match self.locations.resolve(line) {
                Some(point) => points.push(LayerPoint::Resolved(point)),
                None => tracing::debug!("📍 No gazetteer match for '{}'", line.trim()),
            }
        }

        let mut layer = SpatialLayer::from_points(Provenance::Local, points);
        if layer.is_empty() && requested > 0 {
            tracing::warn!(
                "⚠️ None of {} place name(s) could be placed on the map",
                requested
            );
            layer.status = LayerStatus::Unavailable;
        }
        layer
    }
}

/// Run one remote source and fold any failure into an unavailable layer.
pub async fn occurrence_layer(source: &dyn OccurrenceSource, species: &str) -> SpatialLayer {
    let provenance = source.provenance();
    match source.fetch_occurrences(species).await {
        Ok(records) => {
            tracing::info!("🌍 {}: {} occurrence(s) for '{}'", provenance, records.len(), species);
            SpatialLayer::from_points(
                provenance,
                records.into_iter().map(LayerPoint::Occurrence).collect(),
            )
        }
        Err(e) => {
            tracing::warn!("⚠️ {} unavailable for '{}': {}", provenance, species, e);
            SpatialLayer::unavailable(provenance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gazetteer::Gazetteer;
    use crate::domain::model::{Coordinate, OccurrenceRecord};
    use crate::utils::error::{AtlasError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        provenance: Provenance,
        records: Vec<Coordinate>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(provenance: Provenance, records: Vec<Coordinate>) -> Arc<Self> {
            Arc::new(Self {
                provenance,
                records,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl OccurrenceSource for FixedSource {
        fn provenance(&self) -> Provenance {
            self.provenance
        }

        async fn fetch_occurrences(&self, _species_name: &str) -> Result<Vec<OccurrenceRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .iter()
                .map(|c| OccurrenceRecord {
                    coordinate: *c,
                    observed: None,
                    provenance: self.provenance,
                })
                .collect())
        }
    }

    struct BrokenSource(Provenance);

    #[async_trait]
    impl OccurrenceSource for BrokenSource {
        fn provenance(&self) -> Provenance {
            self.0
        }

        async fn fetch_occurrences(&self, _species_name: &str) -> Result<Vec<OccurrenceRecord>> {
            Err(AtlasError::MalformedPayload {
                message: "truncated body".to_string(),
            })
        }
    }

    fn izmir_resolver() -> LocationResolver {
        LocationResolver::new(Arc::new(Gazetteer::from_entries([(
            "İzmir", 38.4237, 27.1428,
        )])))
    }

    fn record(places: &str) -> SpeciesRecord {
        SpeciesRecord::new("Procambarus clarkii (Girard, 1852)", places)
    }

    fn aggregator_with(
        registry: Arc<dyn OccurrenceSource>,
        observations: Arc<dyn OccurrenceSource>,
    ) -> GeoAggregator {
        GeoAggregator::new(izmir_resolver(), registry, observations)
    }

    fn provenances(layers: &[SpatialLayer]) -> Vec<Provenance> {
        layers.iter().map(|l| l.provenance).collect()
    }

    #[tokio::test]
    async fn test_local_layer_keeps_resolved_tokens_only() {
        let aggregator = aggregator_with(
            FixedSource::new(Provenance::Gbif, vec![]),
            FixedSource::new(Provenance::INaturalist, vec![]),
        );

        let layers = aggregator
            .aggregate(&record("İzmir\nUnknownTown"), SourceSelection::local_only())
            .await;

        assert_eq!(layers.len(), 1);
        let local = &layers[0];
        assert_eq!(local.status, LayerStatus::Populated);
        assert_eq!(local.len(), 1);
        match &local.points[0] {
            LayerPoint::Resolved(point) => {
                assert_eq!(point.coordinate, Coordinate::new(38.4237, 27.1428));
                assert_eq!(point.token, "İzmir");
                assert_eq!(point.provenance, Provenance::Local);
            }
            other => panic!("unexpected point {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_local_layer_distinguishes_no_input_from_no_match() {
        let aggregator = aggregator_with(
            FixedSource::new(Provenance::Gbif, vec![]),
            FixedSource::new(Provenance::INaturalist, vec![]),
        );

        let no_input = aggregator.local_layer(" \n\n  ");
        assert_eq!(no_input.status, LayerStatus::Empty);

        let no_match = aggregator.local_layer("UnknownTown\nNowhere, Province");
        assert_eq!(no_match.status, LayerStatus::Unavailable);
        assert!(no_match.is_empty());
    }

    #[tokio::test]
    async fn test_layer_order_is_fixed_for_any_subset() {
        let aggregator = aggregator_with(
            FixedSource::new(Provenance::Gbif, vec![Coordinate::new(1.0, 1.0)]),
            FixedSource::new(Provenance::INaturalist, vec![Coordinate::new(2.0, 2.0)]),
        );
        let rec = record("İzmir");

        let only_gbif = SourceSelection {
            local: false,
            gbif: true,
            inaturalist: false,
        };
        let local_and_inat = SourceSelection {
            local: true,
            gbif: false,
            inaturalist: true,
        };

        assert_eq!(
            provenances(&aggregator.aggregate(&rec, SourceSelection::local_only()).await),
            vec![Provenance::Local]
        );
        assert_eq!(
            provenances(&aggregator.aggregate(&rec, only_gbif).await),
            vec![Provenance::Gbif]
        );
        assert_eq!(
            provenances(&aggregator.aggregate(&rec, local_and_inat).await),
            vec![Provenance::Local, Provenance::INaturalist]
        );
        assert_eq!(
            provenances(&aggregator.aggregate(&rec, SourceSelection::all()).await),
            vec![Provenance::Local, Provenance::Gbif, Provenance::INaturalist]
        );
    }

    #[tokio::test]
    async fn test_disabled_sources_are_not_called() {
        let gbif = FixedSource::new(Provenance::Gbif, vec![]);
        let inat = FixedSource::new(Provenance::INaturalist, vec![]);
        let aggregator = aggregator_with(gbif.clone(), inat.clone());

        aggregator
            .aggregate(&record("İzmir"), SourceSelection::local_only())
            .await;

        assert_eq!(gbif.calls.load(Ordering::SeqCst), 0);
        assert_eq!(inat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_registry_failure_does_not_affect_observations() {
        let aggregator = aggregator_with(
            Arc::new(BrokenSource(Provenance::Gbif)),
            FixedSource::new(
                Provenance::INaturalist,
                vec![Coordinate::new(38.4, 27.1), Coordinate::new(36.9, 30.7)],
            ),
        );

        let layers = aggregator
            .aggregate(&record("İzmir"), SourceSelection::all())
            .await;

        assert_eq!(layers.len(), 3);
        let gbif = &layers[1];
        assert_eq!(gbif.provenance, Provenance::Gbif);
        assert!(gbif.is_empty());
        assert_eq!(gbif.status, LayerStatus::Unavailable);

        let inat = &layers[2];
        assert_eq!(inat.status, LayerStatus::Populated);
        assert_eq!(inat.len(), 2);
        assert!(inat
            .points
            .iter()
            .all(|p| p.provenance() == Provenance::INaturalist));
    }

    #[tokio::test]
    async fn test_empty_remote_result_is_empty_not_unavailable() {
        let source = FixedSource::new(Provenance::INaturalist, vec![]);
        let layer = occurrence_layer(&*source, "Procambarus clarkii").await;
        assert_eq!(layer.status, LayerStatus::Empty);
        assert_eq!(layer.name, "iNaturalist");
    }
}
