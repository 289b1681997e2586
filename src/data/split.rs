use rand::{Rng, seq::SliceRandom};

use super::Record;

/// Shuffles the whole record store uniformly, then splits it into disjoint
/// (training, evaluation) subsets. The split is destructive: the input vector
/// is consumed and every record lands in exactly one subset.
///
/// The training subset receives `(len * fraction)` records, floored in f64
/// arithmetic; the evaluation subset receives the remainder. An empty input
/// yields two empty subsets, which the orchestrator treats as fatal.
pub fn shuffle_split<R: Rng>(
    mut records: Vec<Record>,
    fraction: f64,
    rng: &mut R,
) -> (Vec<Record>, Vec<Record>) {
    records.shuffle(rng);

    let cut = (records.len() as f64 * fraction) as usize;
    let test = records.split_off(cut.min(records.len()));
    (records, test)
}
