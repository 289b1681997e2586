use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::{
    config::PipelineConfig,
    data::{Record, shuffle_split},
    device::{DevicePool, ResidentSet},
    error::{PipelineErr, Result},
    eval::{Evaluation, evaluate},
    model::{Sigmoid, Weights, embed_into, project},
};

/// Accuracy of the two passes of one batch run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub train: Evaluation,
    pub test: Evaluation,
}

/// Drives one batch run through its stages, strictly forward:
/// partition the store, stage the training subset, score it, stage the
/// evaluation subset, score it, tear both down.
///
/// Weights are initialized once and borrowed read-only by both passes; the
/// two subsets never share a mutable buffer.
pub struct Pipeline {
    cfg: PipelineConfig,
    device: DevicePool,
}

impl Pipeline {
    /// Validates the configuration and builds the device pool.
    pub fn new(cfg: PipelineConfig) -> Result<Self> {
        cfg.validate()?;
        let device = DevicePool::new(cfg.device_lanes)?;
        debug!(lanes = device.lanes(); "device pool ready");
        Ok(Self { cfg, device })
    }

    /// Runs the full pipeline over a loaded record store.
    ///
    /// # Errors
    /// `EmptyDataset` when the store is empty, `EmptyPartition` when either
    /// subset comes out empty after the split; both are fatal configuration
    /// conditions, surfaced before any buffer is staged.
    pub fn run<R: Rng>(&self, records: Vec<Record>, rng: &mut R) -> Result<RunSummary> {
        if records.is_empty() {
            return Err(PipelineErr::EmptyDataset);
        }
        info!(records = records.len(); "record store loaded");

        let started = Instant::now();
        let (train, test) = shuffle_split(records, self.cfg.train_fraction, rng);
        if train.is_empty() || test.is_empty() {
            return Err(PipelineErr::EmptyPartition {
                train: train.len(),
                test: test.len(),
            });
        }
        info!(
            train = train.len(),
            test = test.len(),
            elapsed_s = started.elapsed().as_secs_f64();
            "record store partitioned"
        );

        let weights = Weights::xavier(self.cfg.feature_width, rng);

        let (train_eval, train_set) = self.score_subset(&train, &weights, "train")?;
        let (test_eval, test_set) = self.score_subset(&test, &weights, "test")?;

        // Both subsets stay resident until after the second pass.
        train_set.release();
        test_set.release();
        info!("run torn down");

        Ok(RunSummary {
            train: train_eval,
            test: test_eval,
        })
    }

    /// One pass: stage the subset's buffers, run the embed / project / squash
    /// kernels on the device lanes, and reduce to an accuracy. The resident
    /// set is handed back so the caller controls teardown.
    fn score_subset(
        &self,
        records: &[Record],
        weights: &Weights,
        pass: &'static str,
    ) -> Result<(Evaluation, ResidentSet)> {
        let cfg = &self.cfg;
        let mut resident = ResidentSet::stage(records, cfg.feature_width);
        debug!(pass = pass, rows = resident.rows(); "buffers staged");

        let evaluation = self.device.run(|| {
            let started = Instant::now();
            embed_into(records, resident.features_mut())?;
            debug!(pass = pass, elapsed_s = started.elapsed().as_secs_f64(); "embedding done");

            let started = Instant::now();
            let (features, scores) = resident.projection_views();
            project(features, weights, scores)?;
            debug!(pass = pass, elapsed_s = started.elapsed().as_secs_f64(); "projection done");

            let started = Instant::now();
            Sigmoid.apply(resident.scores_mut());
            debug!(pass = pass, elapsed_s = started.elapsed().as_secs_f64(); "activation done");

            evaluate(
                resident.scores(),
                resident.labels(),
                cfg.threshold,
                cfg.positive_label,
                cfg.negative_label,
            )
        })?;

        info!(
            pass = pass,
            correct = evaluation.correct(),
            total = evaluation.total(),
            accuracy = evaluation.accuracy() as f64;
            "subset scored"
        );
        Ok((evaluation, resident))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn small_cfg() -> PipelineConfig {
        PipelineConfig {
            feature_width: 32,
            text_capacity: 32,
            device_lanes: Some(2),
            ..PipelineConfig::default()
        }
    }

    fn store(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let label = if i % 2 == 0 { 0 } else { 4 };
                Record::new(format!("sample text number {i}"), label)
            })
            .collect()
    }

    #[test]
    fn run_scores_both_subsets() {
        let pipeline = Pipeline::new(small_cfg()).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        let summary = pipeline.run(store(40), &mut rng).unwrap();
        assert_eq!(summary.train.total(), 28);
        assert_eq!(summary.test.total(), 12);
        assert!((0.0..=1.0).contains(&summary.train.accuracy()));
        assert!((0.0..=1.0).contains(&summary.test.accuracy()));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let pipeline = Pipeline::new(small_cfg()).unwrap();

        let a = pipeline
            .run(store(30), &mut StdRng::seed_from_u64(5))
            .unwrap();
        let b = pipeline
            .run(store(30), &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn empty_store_is_rejected_before_staging() {
        let pipeline = Pipeline::new(small_cfg()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            pipeline.run(Vec::new(), &mut rng),
            Err(PipelineErr::EmptyDataset)
        ));
    }

    #[test]
    fn too_small_store_surfaces_an_empty_partition() {
        // One record: the training subset gets floor(0.7) = 0 of it.
        let pipeline = Pipeline::new(small_cfg()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            pipeline.run(store(1), &mut rng),
            Err(PipelineErr::EmptyPartition { train: 0, test: 1 })
        ));
    }

    #[test]
    fn invalid_config_fails_construction() {
        let cfg = PipelineConfig {
            feature_width: 0,
            ..small_cfg()
        };
        assert!(matches!(
            Pipeline::new(cfg),
            Err(PipelineErr::InvalidConfig { .. })
        ));
    }
}
