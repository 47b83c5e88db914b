use crate::core::gazetteer::Gazetteer;
use crate::domain::model::{Coordinate, MatchTier, Provenance, ResolvedPoint};
use std::sync::Arc;

/// Collapse `" - "` to `"-"` and trim.
pub fn normalize_token(token: &str) -> String {
    token.replace(" - ", "-").trim().to_string()
}

/// Resolves free-text place names against a fixed gazetteer.
///
/// The lookup is a fixed fallback chain, first hit wins:
///
/// 1. the normalized token verbatim,
/// 2. the part before the first comma (`"District, Province"`),
/// 3. the part before the first hyphen (`"District-Landmark"`).
///
/// Only the left-hand segment of the first delimiter is tried in each tier.
/// A miss is a regular outcome and yields `None`.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
}

impl LocationResolver {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    pub fn lookup(&self, token: &str) -> Option<(Coordinate, MatchTier)> {
        let normalized = normalize_token(token);
        if normalized.is_empty() {
            return None;
        }

        if let Some(coordinate) = self.gazetteer.get(&normalized) {
            return Some((coordinate, MatchTier::Exact));
        }

        if let Some((left, _)) = normalized.split_once(',') {
            if let Some(coordinate) = self.gazetteer.get(left.trim()) {
                return Some((coordinate, MatchTier::CommaQualified));
            }
        }

        if let Some((left, _)) = normalized.split_once('-') {
            if let Some(coordinate) = self.gazetteer.get(left.trim()) {
                return Some((coordinate, MatchTier::HyphenQualified));
            }
        }

        None
    }

    pub fn resolve(&self, token: &str) -> Option<ResolvedPoint> {
        let (coordinate, tier) = self.lookup(token)?;
        tracing::trace!("📍 '{}' resolved via {:?}", token.trim(), tier);
        Some(ResolvedPoint {
            coordinate,
            provenance: Provenance::Local,
            token: token.trim().to_string(),
            tier,
        })
    }
}
