//! Vector-geometry primitives shared by the location update, ranking,
//! and diversity code paths.

use crate::error::{ExplorerError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Vector from `location` to the point where the ray through `v`
/// crosses the hyperplane at unit projection onto `location`:
/// `v / dot(v, location) - location`.
///
/// Undefined when `v` is orthogonal to `location`.
pub fn delta_vector(v: ArrayView1<f32>, location: ArrayView1<f32>) -> Result<Array1<f32>> {
    let projection = v.dot(&location);
    if projection == 0.0 {
        return Err(ExplorerError::DegenerateGeometry);
    }
    Ok(v.mapv(|x| x / projection) - &location)
}

/// Row-wise [`delta_vector`] over a batch of item vectors.
pub fn delta_vectors(vs: ArrayView2<f32>, location: ArrayView1<f32>) -> Result<Array2<f32>> {
    let mut deltas = Array2::zeros((vs.nrows(), vs.ncols()));
    for (i, row) in vs.axis_iter(Axis(0)).enumerate() {
        deltas.row_mut(i).assign(&delta_vector(row, location)?);
    }
    Ok(deltas)
}

/// Euclidean norm.
pub fn norm(v: ArrayView1<f32>) -> f32 {
    v.dot(&v).sqrt()
}

pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(&b) / (norm_a * norm_b)
    }
}

/// L1 (taxicab) distance, the metric behind the diversity score.
pub fn l1_distance(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
