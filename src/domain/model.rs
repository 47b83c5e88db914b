use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Which source produced a point. Every point in every layer carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Local,
    Gbif,
    #[serde(rename = "inaturalist")]
    INaturalist,
}

impl Provenance {
    pub fn layer_name(&self) -> &'static str {
        match self {
            Provenance::Local => "Local records",
            Provenance::Gbif => "GBIF",
            Provenance::INaturalist => "iNaturalist",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layer_name())
    }
}

/// Gazetteer lookup tier that produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    CommaQualified,
    HyphenQualified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    pub coordinate: Coordinate,
    pub provenance: Provenance,
    /// The place-name line as it appeared in the record, trimmed.
    pub token: String,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservedAt {
    Year(i32),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub coordinate: Coordinate,
    pub observed: Option<ObservedAt>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerPoint {
    Resolved(ResolvedPoint),
    Occurrence(OccurrenceRecord),
}

impl LayerPoint {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            LayerPoint::Resolved(p) => p.coordinate,
            LayerPoint::Occurrence(o) => o.coordinate,
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            LayerPoint::Resolved(p) => p.provenance,
            LayerPoint::Occurrence(o) => o.provenance,
        }
    }
}

/// `Unavailable` covers both a failed upstream call and, for the local
/// layer, input lines of which none could be placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerStatus {
    Populated,
    Empty,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialLayer {
    pub name: String,
    pub provenance: Provenance,
    pub points: Vec<LayerPoint>,
    pub status: LayerStatus,
}

impl SpatialLayer {
    /// Status follows the point count: `Populated` when non-empty, `Empty` otherwise.
    pub fn from_points(provenance: Provenance, points: Vec<LayerPoint>) -> Self {
        let status = if points.is_empty() {
            LayerStatus::Empty
        } else {
            LayerStatus::Populated
        };
        Self {
            name: provenance.layer_name().to_string(),
            provenance,
            points,
            status,
        }
    }

    pub fn unavailable(provenance: Provenance) -> Self {
        Self {
            name: provenance.layer_name().to_string(),
            provenance,
            points: Vec::new(),
            status: LayerStatus::Unavailable,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The slice of a catalog row the map engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub species: String,
    /// Newline-separated place names.
    pub places: String,
}

impl SpeciesRecord {
    pub fn new(species: impl Into<String>, places: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            places: places.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSelection {
    pub local: bool,
    pub gbif: bool,
    pub inaturalist: bool,
}

impl SourceSelection {
    pub fn all() -> Self {
        Self {
            local: true,
            gbif: true,
            inaturalist: true,
        }
    }

    pub fn local_only() -> Self {
        Self {
            local: true,
            gbif: false,
            inaturalist: false,
        }
    }
}

impl Default for SourceSelection {
    fn default() -> Self {
        Self::local_only()
    }
}

/// Opaque identifier handed out by the taxon registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonKey(pub String);

impl TaxonKey {
    /// Registries return keys as JSON numbers or strings; anything else is not a key.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload handed to the rendering side for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    pub species: String,
    pub cleaned_name: String,
    pub image_url: Option<String>,
    pub layers: Vec<SpatialLayer>,
}
