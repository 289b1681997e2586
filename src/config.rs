use crate::error::{PipelineErr, Result};

/// Pipeline parameters.
///
/// The defaults reproduce the fixed batch configuration this pipeline ships
/// with; every value is injectable so tests can shrink buffers or move the
/// decision threshold.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Embedding width F: columns per feature row.
    pub feature_width: usize,
    /// Text capacity C in bytes; loaded texts are kept strictly below it.
    pub text_capacity: usize,
    /// Fraction of records assigned to the training subset.
    pub train_fraction: f64,
    /// Scores strictly above this predict the positive class.
    pub threshold: f32,
    /// Class code for negative records.
    pub negative_label: i32,
    /// Class code for positive records.
    pub positive_label: i32,
    /// Execution lanes for the device pool; `None` picks the host default.
    pub device_lanes: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feature_width: 1024,
            text_capacity: 1024,
            train_fraction: 0.7,
            threshold: 0.6,
            negative_label: 0,
            positive_label: 4,
            device_lanes: None,
        }
    }
}

impl PipelineConfig {
    /// Rejects configurations no run could complete with.
    pub fn validate(&self) -> Result<()> {
        if self.feature_width == 0 {
            return Err(PipelineErr::InvalidConfig {
                what: "feature width must be positive",
            });
        }
        if self.text_capacity == 0 {
            return Err(PipelineErr::InvalidConfig {
                what: "text capacity must be positive",
            });
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(PipelineErr::InvalidConfig {
                what: "train fraction must lie strictly between 0 and 1",
            });
        }
        if !self.threshold.is_finite() {
            return Err(PipelineErr::InvalidConfig {
                what: "threshold must be finite",
            });
        }
        if self.negative_label == self.positive_label {
            return Err(PipelineErr::InvalidConfig {
                what: "class codes must be distinct",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn degenerate_fraction_is_rejected() {
        for fraction in [0.0, 1.0, -0.5, 1.5] {
            let cfg = PipelineConfig {
                train_fraction: fraction,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "fraction {fraction} accepted");
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        let cfg = PipelineConfig {
            feature_width: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn identical_class_codes_are_rejected() {
        let cfg = PipelineConfig {
            negative_label: 4,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
