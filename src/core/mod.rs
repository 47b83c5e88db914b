pub mod aggregator;
pub mod engine;
pub mod gazetteer;
pub mod location;
pub mod taxon;

pub use crate::domain::model::{
    Coordinate, LayerPoint, LayerStatus, MapReport, OccurrenceRecord, Provenance, ResolvedPoint,
    SourceSelection, SpatialLayer, SpeciesRecord, TaxonKey,
};
pub use crate::domain::ports::{OccurrenceSource, TaxonMatcher};
pub use crate::utils::error::Result;
