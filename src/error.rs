use std::{error::Error, fmt, io};

/// The pipeline's result type.
pub type Result<T> = std::result::Result<T, PipelineErr>;

/// Batch-run failures. Every variant except the loader's silent line drops is
/// fatal: the run terminates with no partial results.
#[derive(Debug)]
pub enum PipelineErr {
    Io(io::Error),
    InvalidConfig {
        what: &'static str,
    },
    EmptyDataset,
    EmptyPartition {
        train: usize,
        test: usize,
    },
    DegenerateEvaluation,
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    DevicePool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for PipelineErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineErr::Io(e) => write!(f, "io error: {e}"),
            PipelineErr::InvalidConfig { what } => {
                write!(f, "invalid configuration: {what}")
            }
            PipelineErr::EmptyDataset => {
                write!(f, "no records loaded, nothing to partition")
            }
            PipelineErr::EmptyPartition { train, test } => write!(
                f,
                "degenerate split: {train} training and {test} evaluation records"
            ),
            PipelineErr::DegenerateEvaluation => {
                write!(f, "evaluation invoked over zero records")
            }
            PipelineErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "size mismatch between {a} and {b}: got {got}, expected {expected}"
            ),
            PipelineErr::DevicePool(e) => write!(f, "failed to build device pool: {e}"),
        }
    }
}

impl Error for PipelineErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineErr::Io(e) => Some(e),
            PipelineErr::DevicePool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PipelineErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rayon::ThreadPoolBuildError> for PipelineErr {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        Self::DevicePool(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<PipelineErr> for io::Error {
    fn from(value: PipelineErr) -> Self {
        match value {
            PipelineErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
