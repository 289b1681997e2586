use ndarray::{ArrayView2, ArrayViewMut1, Zip};

use super::Weights;
use crate::error::{PipelineErr, Result};

/// Single-output affine projection over a feature buffer:
/// `scores[i] = bias + features[i, :] . weights`.
///
/// Records are projected in parallel; the inner dot product runs sequentially
/// within each row and its summation order is unspecified.
pub fn project(
    features: ArrayView2<'_, f32>,
    weights: &Weights,
    mut scores: ArrayViewMut1<'_, f32>,
) -> Result<()> {
    if features.ncols() != weights.width() {
        return Err(PipelineErr::SizeMismatch {
            a: "feature columns",
            b: "weight vector",
            got: features.ncols(),
            expected: weights.width(),
        });
    }
    if features.nrows() != scores.len() {
        return Err(PipelineErr::SizeMismatch {
            a: "feature rows",
            b: "score buffer",
            got: features.nrows(),
            expected: scores.len(),
        });
    }

    let w = weights.view();
    let bias = weights.bias();
    Zip::from(&mut scores)
        .and(features.rows())
        .par_for_each(|score, row| *score = bias + row.dot(&w));
    Ok(())
}
