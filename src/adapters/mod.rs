// Adapters layer: concrete implementations for external systems (http registries, record files).

pub mod gbif;
pub mod http;
pub mod inaturalist;
pub mod records;
