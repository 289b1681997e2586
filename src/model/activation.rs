use ndarray::ArrayViewMut1;

/// Logistic squashing into (0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Sigmoid {
    #[inline]
    pub fn f(&self, z: f32) -> f32 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Squashes a whole score buffer in place, element-parallel.
    pub fn apply(&self, mut scores: ArrayViewMut1<'_, f32>) {
        scores.par_mapv_inplace(|z| self.f(z));
    }
}
