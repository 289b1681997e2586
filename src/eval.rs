use rayon::prelude::*;

use crate::error::{PipelineErr, Result};

/// Outcome of scoring one subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    correct: usize,
    total: usize,
}

impl Evaluation {
    #[inline]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of records whose predicted class matched the ground truth.
    #[inline]
    pub fn accuracy(&self) -> f32 {
        self.correct as f32 / self.total as f32
    }
}

/// Thresholds squashed scores into class codes and counts matches against the
/// ground-truth labels. A score strictly above `threshold` predicts
/// `positive`; exactly at the threshold predicts `negative`.
///
/// The correct-count is an integer sum reduction, safe under any lane order.
/// Zero records is a precondition violation, rejected before any ratio is
/// formed.
pub fn evaluate(
    scores: &[f32],
    labels: &[i32],
    threshold: f32,
    positive: i32,
    negative: i32,
) -> Result<Evaluation> {
    if scores.is_empty() {
        return Err(PipelineErr::DegenerateEvaluation);
    }
    if scores.len() != labels.len() {
        return Err(PipelineErr::SizeMismatch {
            a: "score buffer",
            b: "label buffer",
            got: scores.len(),
            expected: labels.len(),
        });
    }

    let correct = scores
        .par_iter()
        .zip(labels.par_iter())
        .filter(|&(&score, &label)| {
            let predicted = if score > threshold { positive } else { negative };
            predicted == label
        })
        .count();

    Ok(Evaluation {
        correct,
        total: scores.len(),
    })
}
