use log::debug;
use ndarray::{Array2, ArrayView2, ArrayViewMut1, ArrayViewMut2};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{data::Record, error::Result};

/// The parallel execution space the bulk kernels run on.
///
/// Stands in for an accelerator under a unified-memory strategy: kernels are
/// dispatched onto a dedicated lane pool with no ordering guarantee across
/// lanes, while buffers live in `ResidentSet`s for the duration of a pass.
pub struct DevicePool {
    pool: ThreadPool,
}

impl DevicePool {
    /// Builds the lane pool. `None` lets the host pick its default width.
    pub fn new(lanes: Option<usize>) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(lanes.unwrap_or(0))
            .build()?;
        Ok(Self { pool })
    }

    #[inline]
    pub fn lanes(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs a bulk operation on the device lanes, blocking until it finishes.
    pub fn run<OP, T>(&self, op: OP) -> T
    where
        OP: FnOnce() -> T + Send,
        T: Send,
    {
        self.pool.install(op)
    }
}

/// One subset's device-resident buffers: a zero-filled `[rows, width]`
/// feature buffer, a `[rows]` score buffer, and the copied ground-truth
/// labels. The training and evaluation sets are entirely disjoint
/// allocations; nothing here is shared between passes.
pub struct ResidentSet {
    features: Array2<f32>,
    scores: Vec<f32>,
    labels: Vec<i32>,
}

impl ResidentSet {
    /// Stages a subset: allocates the numeric buffers and uploads the labels.
    /// Feature rows must stay zero until the embedder writes them.
    pub fn stage(records: &[Record], width: usize) -> Self {
        let rows = records.len();
        let set = Self {
            features: Array2::zeros((rows, width)),
            scores: vec![0.0; rows],
            labels: records.iter().map(Record::label).collect(),
        };
        debug!(rows = rows, width = width; "resident set staged");
        set
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    #[inline]
    pub fn features_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.features.view_mut()
    }

    /// Borrows the feature buffer read-only and the score buffer writable in
    /// one call, for kernels that read rows and write one scalar per row.
    #[inline]
    pub fn projection_views(&mut self) -> (ArrayView2<'_, f32>, ArrayViewMut1<'_, f32>) {
        (
            self.features.view(),
            ArrayViewMut1::from(&mut self.scores[..]),
        )
    }

    #[inline]
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    #[inline]
    pub fn scores_mut(&mut self) -> ArrayViewMut1<'_, f32> {
        ArrayViewMut1::from(&mut self.scores[..])
    }

    #[inline]
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Releases every buffer of this set. Teardown is an explicit pipeline
    /// step, not something left to scope exit.
    pub fn release(self) {
        debug!(rows = self.rows(); "resident set released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_zero_fills_numeric_buffers_and_copies_labels() {
        let records = [Record::new("abc", 4), Record::new("de", 0)];
        let set = ResidentSet::stage(&records, 16);

        assert_eq!(set.rows(), 2);
        assert!(set.features().iter().all(|&x| x == 0.0));
        assert!(set.scores().iter().all(|&x| x == 0.0));
        assert_eq!(set.labels(), &[4, 0]);
        set.release();
    }

    #[test]
    fn pool_runs_closures_on_its_lanes() {
        let device = DevicePool::new(Some(2)).unwrap();
        assert_eq!(device.lanes(), 2);
        assert_eq!(device.run(|| 2 + 2), 4);
    }
}
