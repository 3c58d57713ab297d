//! Feedback-to-location update.
//!
//! Converts one round of signed item feedback into a movement of the
//! unit-norm taste location. Positive items pull the location toward
//! them, negative items push it away with closer items pushing harder,
//! and the step size is scaled by a confidence term that blends a
//! decaying per-round floor with the share of the round's movement
//! that came from decisively scored items.

use crate::embedding::EmbeddingStore;
use crate::error::{ExplorerError, Result};
use crate::geometry::{delta_vector, delta_vectors, norm};
use crate::types::{FeedbackRound, ItemId};
use ndarray::{Array1, ArrayView1, Axis};

const NEGATIVE_WEIGHT_FACTOR: f32 = 0.5;
const CONFIDENCE_EXPONENT: f32 = 0.33;

/// Fold one round of feedback into the taste location.
///
/// Returns a unit-norm location, or the input unchanged when the round
/// carries no usable signal (no positive and no negative items, or
/// degenerate accumulator sums).
pub struct UpdateLocation;

impl UpdateLocation {
    pub fn execute(
        location: ArrayView1<f32>,
        feedback: &FeedbackRound,
        round: u32,
        store: &EmbeddingStore,
    ) -> Result<Array1<f32>> {
        if round < 1 {
            return Err(ExplorerError::InvalidRoundIndex(round));
        }
        if feedback.is_empty() {
            return Ok(location.to_owned());
        }

        // Delta norms over every feedback item regardless of sign.
        // Neutral items enter this total and nothing else: their only
        // effect is diluting the confidence term below.
        let items: Vec<ItemId> = feedback.keys().copied().collect();
        let all_deltas = delta_vectors(store.vectors_of(&items)?.view(), location)?;
        let all_norms: Vec<f32> = all_deltas
            .axis_iter(Axis(0))
            .map(|delta| norm(delta))
            .collect();
        let total_norm: f32 = all_norms.iter().sum();
        let min_norm = all_norms.iter().copied().fold(f32::INFINITY, f32::min);
        let max_norm = all_norms.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut direction_num = Array1::<f32>::zeros(location.len());
        let mut direction_den = 0.0_f32;
        let mut distance_num = 0.0_f32;
        let mut distance_den = 0.0_f32;
        let mut selected_norm = 0.0_f32;

        // Positive feedback pulls toward the items.
        let positive: Vec<ItemId> = feedback
            .iter()
            .filter(|&(_, &score)| score == 1)
            .map(|(&item, _)| item)
            .collect();
        if !positive.is_empty() {
            let pos_weight = (positive.len() as f32).sqrt();
            let mut pos_sum = Array1::<f32>::zeros(location.len());
            let mut pos_norm_sum = 0.0_f32;
            for &item in &positive {
                let delta = delta_vector(store.vector_of(item)?, location)?;
                pos_norm_sum += norm(delta.view());
                pos_sum += &delta;
            }
            direction_num += &(pos_sum * pos_weight);
            direction_den += pos_norm_sum * pos_weight;
            distance_num += pos_norm_sum;
            distance_den += positive.len() as f32;
            selected_norm += pos_norm_sum;
        }

        // Negative feedback pushes away. The rescale factor both
        // reverses each delta and inverts the relative magnitude
        // ordering, so negative items close to the location repel
        // harder than distant ones. Accumulated norms stay pre-rescale.
        let negative: Vec<ItemId> = feedback
            .iter()
            .filter(|&(_, &score)| score == -1)
            .map(|(&item, _)| item)
            .collect();
        if !negative.is_empty() {
            let neg_weight = NEGATIVE_WEIGHT_FACTOR * (negative.len() as f32).sqrt();
            let mut neg_sum = Array1::<f32>::zeros(location.len());
            let mut neg_norm_sum = 0.0_f32;
            for &item in &negative {
                let delta = delta_vector(store.vector_of(item)?, location)?;
                let delta_norm = norm(delta.view());
                let rescale = (delta_norm - max_norm - min_norm) / delta_norm;
                neg_sum += &(delta * rescale);
                neg_norm_sum += delta_norm;
            }
            direction_num += &(neg_sum * neg_weight);
            direction_den += neg_norm_sum * neg_weight;
            distance_num += neg_norm_sum;
            distance_den += negative.len() as f32;
            selected_norm += neg_norm_sum;
        }

        if direction_den == 0.0 || distance_den == 0.0 {
            return Ok(location.to_owned());
        }

        let direction = direction_num / direction_den;
        let distance = distance_num / distance_den;
        let rounds = round as f32;
        let confidence = 1.0 / rounds
            + (selected_norm / total_norm).min(1.0).powf(CONFIDENCE_EXPONENT)
                * ((rounds - 1.0) / rounds);

        let moved = &location + &(direction * (distance * confidence));
        let moved_norm = norm(moved.view());
        Ok(moved / moved_norm)
    }
}
