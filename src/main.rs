use std::{env, io, time::Instant};

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use sentiment_pipeline::{Pipeline, PipelineConfig, load_records};

const DEFAULT_DATASET: &str = "last_500000_rows.csv";

fn main() -> io::Result<()> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_DATASET.into());
    let cfg = PipelineConfig::default();

    let started = Instant::now();
    let records = load_records(&path, &cfg)?;

    let mut rng = match env::var("SEED") {
        Ok(seed) => StdRng::seed_from_u64(seed.parse().map_err(io::Error::other)?),
        Err(_) => StdRng::from_os_rng(),
    };

    let pipeline = Pipeline::new(cfg)?;
    let summary = pipeline.run(records, &mut rng)?;

    info!("train accuracy: {:.2}%", summary.train.accuracy() * 100.0);
    info!("test accuracy: {:.2}%", summary.test.accuracy() * 100.0);
    info!("total time: {:.4}s", started.elapsed().as_secs_f64());
    Ok(())
}
