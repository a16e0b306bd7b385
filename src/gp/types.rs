//! Core trait shared by selection and the evolutionary loop.

/// A candidate solution ranked by a scalar error.
///
/// Lower is better (minimization). Individuals that have not been scored
/// yet should report `f64::INFINITY` so they never win a comparison.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Candidate {
///     error: f64,
/// }
///
/// impl Individual for Candidate {
///     fn fitness(&self) -> f64 { self.error }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the current error of this individual.
    fn fitness(&self) -> f64;
}
