//! Per-round candidate generation policy.
//!
//! Decides pool size, ranking breadth, and the three-tier diversity
//! schedule from the round index, then composes ranking and diverse
//! selection into one 10-item batch. Early rounds rank a small pool of
//! popular items broadly; later rounds open the whole catalog and rank
//! it narrowly around the location.

use crate::catalog::Catalog;
use crate::diversity::SelectDiverseItems;
use crate::embedding::EmbeddingStore;
use crate::error::{ExplorerError, Result};
use crate::ranking::{Breadth, RankItems};
use crate::types::{ExcludedItems, ItemId};
use ndarray::ArrayView1;
use rand::Rng;
use tracing::{debug, info};

const DROPOUT_PROBABILITY: f64 = 0.5;

/// Tier schedule per round: (items to pick, candidate-window fraction).
/// Window fractions scale with the catalog exactly like pool sizes.
const TIERS_ROUND_ONE: [(usize, usize); 3] = [(3, 20), (3, 80), (4, 200)];
const TIERS_ROUND_TWO: [(usize, usize); 3] = [(3, 10), (3, 40), (4, 100)];
const TIERS_LATER: [(usize, usize); 3] = [(3, 5), (3, 20), (4, 50)];

/// Linear catalog-fraction scaling shared by pool sizes and candidate
/// windows: `⌊v × catalog_size / 10000⌋`.
pub fn frac(v: usize, catalog_size: usize) -> usize {
    v * catalog_size / 10000
}

/// Produce the next 10-item candidate batch around a location.
pub struct GenerateCandidates;

impl GenerateCandidates {
    pub fn execute(
        location: ArrayView1<f32>,
        excluded: &ExcludedItems,
        round: u32,
        store: &EmbeddingStore,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<ItemId>> {
        let (pool_fraction, breadth, tiers) = match round {
            0 => return Err(ExplorerError::InvalidRoundIndex(round)),
            1 => (1000, Breadth::Wide, TIERS_ROUND_ONE),
            2 => (2000, Breadth::Medium, TIERS_ROUND_TWO),
            _ => (10000, Breadth::Narrow, TIERS_LATER),
        };
        info!(round, ?breadth, "generating candidate batch");

        // Restrict to the most popular slice of the catalog, minus
        // everything already shown or excluded.
        let pool: Vec<ItemId> = catalog
            .top_items(frac(pool_fraction, catalog.len()))
            .into_iter()
            .filter(|item| !excluded.contains(item))
            .collect();
        let ranked = RankItems::execute(location, &pool, breadth, store)?;

        let mut selected = Vec::with_capacity(10);
        for (count, window_fraction) in tiers {
            let window = frac(window_fraction, catalog.len());
            debug!(count, window, "selecting diversity tier");
            SelectDiverseItems::execute(
                &mut selected,
                &ranked,
                count,
                window,
                DROPOUT_PROBABILITY,
                store,
                rng,
            )?;
        }
        Ok(selected)
    }
}
