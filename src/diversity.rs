//! Greedy diverse sampling from a ranked pool.
//!
//! Each pick scans the ranking in order, randomly drops survivors to
//! vary the window between otherwise-identical requests, and keeps the
//! candidate farthest (minimum L1 distance) from everything already
//! selected.

use crate::embedding::EmbeddingStore;
use crate::error::{ExplorerError, Result};
use crate::geometry::l1_distance;
use crate::types::ItemId;
use rand::Rng;

pub struct SelectDiverseItems;

impl SelectDiverseItems {
    /// Extend `selected` by exactly `n` items from `ranked`.
    ///
    /// Per pick: walk `ranked` in rank order, skip items already
    /// selected, drop each survivor independently with probability
    /// `dropout`, and stop collecting once `limit` candidates survive.
    /// The candidate with the largest minimum L1 distance to the
    /// selected set wins; ties go to the earlier-ranked candidate.
    pub fn execute(
        selected: &mut Vec<ItemId>,
        ranked: &[ItemId],
        n: usize,
        limit: usize,
        dropout: f64,
        store: &EmbeddingStore,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let stop_size = selected.len() + n;
        while selected.len() < stop_size {
            let mut candidates: Vec<(ItemId, f32)> = Vec::with_capacity(limit);
            let mut eligible = 0_usize;
            for &item in ranked {
                if selected.contains(&item) {
                    continue;
                }
                eligible += 1;
                if rng.gen::<f64>() < dropout {
                    continue;
                }
                candidates.push((item, Self::min_distance(item, selected, store, rng)?));
                if candidates.len() == limit {
                    break;
                }
            }

            if candidates.is_empty() {
                // An unlucky dropout pass can empty the window even
                // though eligible items remain; rescan in that case.
                if eligible == 0 || limit == 0 {
                    return Err(ExplorerError::PoolExhausted {
                        needed: stop_size - selected.len(),
                        available: eligible,
                    });
                }
                continue;
            }

            let mut best = candidates[0];
            for &candidate in &candidates[1..] {
                if candidate.1 > best.1 {
                    best = candidate;
                }
            }
            selected.push(best.0);
        }
        Ok(())
    }

    /// Minimum L1 distance from `item` to the selected set. With
    /// nothing selected yet, a small negative random sentinel makes
    /// the first pick an unbiased draw from the window.
    fn min_distance(
        item: ItemId,
        selected: &[ItemId],
        store: &EmbeddingStore,
        rng: &mut impl Rng,
    ) -> Result<f32> {
        if selected.is_empty() {
            return Ok(-rng.gen::<f32>());
        }
        let vector = store.vector_of(item)?;
        let mut min = f32::INFINITY;
        for &other in selected {
            min = min.min(l1_distance(vector, store.vector_of(other)?));
        }
        Ok(min)
    }
}
