//! Relevance ranking of a candidate pool against the current location.

use crate::embedding::EmbeddingStore;
use crate::error::{ExplorerError, Result};
use crate::geometry::cosine_similarity;
use crate::types::ItemId;
use ndarray::ArrayView1;
use std::str::FromStr;

/// Ranking sharpness. Higher exponents concentrate results near the
/// location's direction; `Wide` keeps the ranking exploratory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breadth {
    Wide,
    Medium,
    Narrow,
}

impl Breadth {
    /// Exponent applied to the cosine term of the score.
    pub fn exponent(self) -> i32 {
        match self {
            Breadth::Wide => 1,
            Breadth::Medium => 2,
            Breadth::Narrow => 3,
        }
    }
}

impl FromStr for Breadth {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(Breadth::Wide),
            "medium" => Ok(Breadth::Medium),
            "narrow" => Ok(Breadth::Narrow),
            other => Err(ExplorerError::InvalidBreadth(other.to_string())),
        }
    }
}

/// Reorder a candidate pool by descending relevance score.
///
/// Score per item: `dot(v, location) * cos(v, location)^p`. The sort
/// is stable, so ties keep their original pool order.
pub struct RankItems;

impl RankItems {
    pub fn execute(
        location: ArrayView1<f32>,
        items: &[ItemId],
        breadth: Breadth,
        store: &EmbeddingStore,
    ) -> Result<Vec<ItemId>> {
        let exponent = breadth.exponent();
        let mut scored: Vec<(ItemId, f32)> = Vec::with_capacity(items.len());
        for &item in items {
            let vector = store.vector_of(item)?;
            let score =
                vector.dot(&location) * cosine_similarity(vector, location).powi(exponent);
            scored.push((item, score));
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        Ok(scored.into_iter().map(|(item, _)| item).collect())
    }
}
