use ndarray::{Array1, ArrayView1};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

/// Parameters of the single-output affine projection: one weight per feature
/// column plus one bias scalar.
///
/// Both passes borrow the same instance read-only; nothing mutates it after
/// initialization.
#[derive(Debug, Clone)]
pub struct Weights {
    weights: Array1<f32>,
    bias: f32,
}

impl Weights {
    /// Draws weights uniformly from `[0, sqrt(2 / width))` and zeroes the
    /// bias.
    pub fn xavier<R: Rng>(width: usize, rng: &mut R) -> Self {
        let limit = (2.0 / width as f32).sqrt();
        let dist = Uniform::new(0.0, limit).expect("weight range is non-empty");
        Self {
            weights: Array1::random_using(width, dist, rng),
            bias: 0.0,
        }
    }

    pub fn from_parts(weights: Vec<f32>, bias: f32) -> Self {
        Self {
            weights: Array1::from_vec(weights),
            bias,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    #[inline]
    pub fn bias(&self) -> f32 {
        self.bias
    }
}
