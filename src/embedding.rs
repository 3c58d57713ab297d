//! Read-only item vector store.
//!
//! Holds the fixed latent vectors for every catalog item plus the
//! normalized starting location for new sessions. Loaded once at
//! startup and shared immutably across requests.

use crate::error::{ExplorerError, Result};
use crate::types::ItemId;
use anyhow::Context;
use ndarray::{Array1, Array2, ArrayView1};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct EmbeddingStore {
    vectors: Array2<f32>,
    starting_location: Array1<f32>,
}

impl EmbeddingStore {
    /// Builds a store from in-memory tables. The starting location is
    /// normalized to unit length, matching the invariant every later
    /// location update maintains.
    pub fn from_parts(vectors: Array2<f32>, starting_location: Array1<f32>) -> Self {
        let norm = starting_location.dot(&starting_location).sqrt();
        let starting_location = if norm > 0.0 {
            starting_location / norm
        } else {
            starting_location
        };
        Self {
            vectors,
            starting_location,
        }
    }

    /// Loads the bincode-encoded vector tables produced by the offline
    /// training pipeline.
    pub fn load(vectors_path: &Path, starting_path: &Path) -> anyhow::Result<Self> {
        let rows: Vec<Vec<f32>> = bincode::deserialize_from(BufReader::new(
            File::open(vectors_path)
                .with_context(|| format!("opening {}", vectors_path.display()))?,
        ))
        .context("Failed to deserialize item vectors")?;
        let starting: Vec<f32> = bincode::deserialize_from(BufReader::new(
            File::open(starting_path)
                .with_context(|| format!("opening {}", starting_path.display()))?,
        ))
        .context("Failed to deserialize starting location")?;

        anyhow::ensure!(!rows.is_empty(), "item vector table is empty");
        let dim = starting.len();
        let mut vectors = Array2::zeros((rows.len(), dim));
        for (i, row) in rows.iter().enumerate() {
            anyhow::ensure!(
                row.len() == dim,
                "item {} has dimension {} (expected {})",
                i,
                row.len(),
                dim
            );
            vectors
                .row_mut(i)
                .assign(&ArrayView1::from_shape(dim, row)?);
        }

        Ok(Self::from_parts(vectors, Array1::from_vec(starting)))
    }

    pub fn vector_of(&self, item: ItemId) -> Result<ArrayView1<'_, f32>> {
        if item >= self.vectors.nrows() {
            return Err(ExplorerError::UnknownItem(item));
        }
        Ok(self.vectors.row(item))
    }

    /// Row-stacked vectors for a batch of items, in input order.
    pub fn vectors_of(&self, items: &[ItemId]) -> Result<Array2<f32>> {
        let mut out = Array2::zeros((items.len(), self.dim()));
        for (i, &item) in items.iter().enumerate() {
            out.row_mut(i).assign(&self.vector_of(item)?);
        }
        Ok(out)
    }

    /// Unit-norm starting location for a fresh session.
    pub fn starting_location(&self) -> ArrayView1<'_, f32> {
        self.starting_location.view()
    }

    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_starting_location_normalized_on_construction() {
        let store = EmbeddingStore::from_parts(array![[1.0_f32, 0.0]], array![3.0_f32, 4.0]);
        let start = store.starting_location();
        assert!((start[0] - 0.6).abs() < 1e-6);
        assert!((start[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_vector_lookup() {
        let store = EmbeddingStore::from_parts(
            array![[1.0_f32, 2.0], [3.0, 4.0]],
            array![1.0_f32, 0.0],
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.dim(), 2);
        assert_eq!(store.vector_of(1).unwrap()[0], 3.0);

        let batch = store.vectors_of(&[1, 0]).unwrap();
        assert_eq!(batch[[0, 1]], 4.0);
        assert_eq!(batch[[1, 0]], 1.0);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let store = EmbeddingStore::from_parts(array![[1.0_f32, 0.0]], array![1.0_f32, 0.0]);
        assert!(matches!(
            store.vector_of(5),
            Err(ExplorerError::UnknownItem(5))
        ));
        assert!(store.vectors_of(&[0, 5]).is_err());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let vectors_path = dir.path().join("vectors.bin");
        let starting_path = dir.path().join("starting.bin");

        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let starting: Vec<f32> = vec![2.0, 0.0];
        std::fs::write(&vectors_path, bincode::serialize(&rows).unwrap()).unwrap();
        std::fs::write(&starting_path, bincode::serialize(&starting).unwrap()).unwrap();

        let store = EmbeddingStore::load(&vectors_path, &starting_path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.vector_of(1).unwrap()[1], 4.0);
        // Normalized at load
        assert!((store.starting_location()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let vectors_path = dir.path().join("vectors.bin");
        let starting_path = dir.path().join("starting.bin");

        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
        let starting: Vec<f32> = vec![1.0, 0.0];
        std::fs::write(&vectors_path, bincode::serialize(&rows).unwrap()).unwrap();
        std::fs::write(&starting_path, bincode::serialize(&starting).unwrap()).unwrap();

        assert!(EmbeddingStore::load(&vectors_path, &starting_path).is_err());
    }
}
