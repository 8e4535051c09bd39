use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    BaselineGenerator, CusumConfig, CusumError, Identity, Result, RollingCusum,
    rolling_cusum::CusumState,
};

/// Recommended baseline window length. Never applied implicitly.
pub const RECOMMENDED_BASELINE: usize = 28;

/// Recommended guard band length. Never applied implicitly.
pub const RECOMMENDED_GUARD_BAND: usize = 2;

/// One-sided CUSUM test statistic over a rolling baseline window.
///
/// `cusum[j]` tests `data[i]`, with `i = j + baseline + guard_band`, against the
/// `baseline` observations preceding `data[i - guard_band]`. The first
/// `baseline + guard_band` observations produce no output, so the result has
/// `data.len() - baseline - guard_band` entries (or none).
///
/// Each entry is `max(0, carry + z - k)` where `z` is the standardized deviation of
/// the observation from the baseline mean and `carry` is the previous entry,
/// halved to `reset_level / 2` once it exceeds `reset_level`. A baseline with
/// fewer than two points passes non-negative observations through and marks
/// negative ones absent (`None`).
///
/// # Examples
///
/// ```
/// # use cusum_stat::Cusum;
/// let cusum = Cusum::new(0, 0);
/// assert_eq!(cusum.compute(&[0.0, 1.0, -2.0, 3.0]), vec![Some(0.0), Some(1.0), None, Some(3.0)]);
///
/// let cusum = Cusum::new(4, 1);
/// let data = [1.0, 1.2, 0.9, 1.1, 1.0, 1.05, 6.0, 6.5];
/// let stats = cusum.compute(&data);
/// assert_eq!(stats.len(), 3);
/// assert!(stats[1].unwrap_or_default() > 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct Cusum<T, G = Identity> {
    /// Baseline window length
    baseline: usize,
    /// Guard band length
    guard_band: usize,
    /// Tunables
    config: CusumConfig<T, G>,
}

impl<T: Float + Default> Cusum<T, Identity> {
    /// Creates a transform with the default tunables.
    ///
    /// # Arguments
    ///
    /// * `baseline` - Number of observations in the baseline window
    /// * `guard_band` - Number of observations between the baseline and the tested point
    ///
    /// # Returns
    ///
    /// * `Self` - The transform
    pub fn new(baseline: usize, guard_band: usize) -> Self {
        Self::with_config(baseline, guard_band, CusumConfig::default())
    }

    /// Starts a builder with no baseline or guard band set.
    pub fn builder() -> CusumBuilder<T, Identity> {
        CusumBuilder::default()
    }
}

impl<T, G> Cusum<T, G>
where
    T: Float + Default,
    G: BaselineGenerator<T>,
{
    /// Creates a transform with explicit tunables.
    pub fn with_config(baseline: usize, guard_band: usize, config: CusumConfig<T, G>) -> Self {
        Self {
            baseline,
            guard_band,
            config,
        }
    }

    /// Returns the baseline window length
    #[inline]
    pub const fn baseline(&self) -> usize {
        self.baseline
    }

    /// Returns the guard band length
    #[inline]
    pub const fn guard_band(&self) -> usize {
        self.guard_band
    }

    /// Returns the tunables
    #[inline]
    pub const fn config(&self) -> &CusumConfig<T, G> {
        &self.config
    }

    /// Returns the number of statistics produced for `len` observations
    #[inline]
    pub const fn output_len(&self, len: usize) -> usize {
        len.saturating_sub(self.baseline.saturating_add(self.guard_band))
    }

    /// Computes the test statistic for every testable observation of `data`.
    ///
    /// # Arguments
    ///
    /// * `data` - The observations, oldest first
    ///
    /// # Returns
    ///
    /// * `Vec<Option<T>>` - One entry per observation past the warmup, `None` marking an absent step
    pub fn compute(&self, data: &[T]) -> Vec<Option<T>> {
        let len = self.output_len(data.len());
        if len == 0 {
            return Vec::new();
        }

        let mut state = CusumState::new(self.baseline, self.guard_band);
        let mut stats = Vec::with_capacity(len);
        for &x in data {
            if let Some(stat) = state.next(&self.config, x) {
                stats.push(stat);
            }
        }
        stats
    }

    /// Turns the transform into its streaming form
    pub fn into_rolling(self) -> RollingCusum<T, G> {
        RollingCusum::with_config(self.baseline, self.guard_band, self.config)
    }
}

/// Computes the CUSUM test statistic with the default tunables.
///
/// Shorthand for `Cusum::new(baseline, guard_band).compute(data)`.
///
/// # Examples
///
/// ```
/// # use cusum_stat::cusum;
/// assert!(cusum::<f64>(&[], 1, 0).is_empty());
/// assert!(cusum(&[1.0], 1, 1).is_empty());
/// assert_eq!(cusum(&[0.0, 1.0, 2.0, 3.0], 0, 0), vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)]);
/// ```
pub fn cusum<T: Float + Default>(data: &[T], baseline: usize, guard_band: usize) -> Vec<Option<T>> {
    Cusum::new(baseline, guard_band).compute(data)
}

/// Builder for [`Cusum`] and [`RollingCusum`].
///
/// The baseline and guard band have no defaults: sensible values depend on
/// the size of the data, so building without either fails with
/// [`CusumError::InvalidArguments`].
///
/// # Examples
///
/// ```
/// # use cusum_stat::{Cusum, CusumError};
/// let cusum = Cusum::<f64>::builder()
///     .baseline(28)
///     .guard_band(2)
///     .k(0.75)
///     .build()
///     .unwrap();
/// assert_eq!(cusum.output_len(40), 10);
///
/// let err = Cusum::<f64>::builder().baseline(28).build().unwrap_err();
/// assert_eq!(err, CusumError::InvalidArguments("guard_band"));
/// ```
#[derive(Debug, Clone)]
pub struct CusumBuilder<T, G = Identity> {
    /// Baseline window length
    baseline: Option<usize>,
    /// Guard band length
    guard_band: Option<usize>,
    /// Tunables
    config: CusumConfig<T, G>,
}

impl<T: Float> Default for CusumBuilder<T, Identity> {
    fn default() -> Self {
        Self {
            baseline: None,
            guard_band: None,
            config: CusumConfig::default(),
        }
    }
}

impl<T, G> CusumBuilder<T, G>
where
    T: Float + Default,
    G: BaselineGenerator<T>,
{
    /// Sets the baseline window length
    pub fn baseline(mut self, baseline: usize) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Sets the guard band length
    pub fn guard_band(mut self, guard_band: usize) -> Self {
        self.guard_band = Some(guard_band);
        self
    }

    /// Sets the sensitivity constant
    pub fn k(mut self, k: T) -> Self {
        self.config.set_k(k);
        self
    }

    /// Sets the minimum sigma floor
    pub fn min_sigma(mut self, min_sigma: T) -> Self {
        self.config.set_min_sigma(min_sigma);
        self
    }

    /// Sets the reset level
    pub fn reset_level(mut self, reset_level: T) -> Self {
        self.config.set_reset_level(reset_level);
        self
    }

    /// Sets the Delta Degrees of Freedom
    pub fn ddof(mut self, ddof: bool) -> Self {
        self.config.set_ddof(ddof);
        self
    }

    /// Replaces the baseline generator
    pub fn generator<H: BaselineGenerator<T>>(self, generator: H) -> CusumBuilder<T, H> {
        CusumBuilder {
            baseline: self.baseline,
            guard_band: self.guard_band,
            config: self.config.with_generator(generator),
        }
    }

    /// Replaces every tunable at once
    pub fn config<H: BaselineGenerator<T>>(self, config: CusumConfig<T, H>) -> CusumBuilder<T, H> {
        CusumBuilder {
            baseline: self.baseline,
            guard_band: self.guard_band,
            config,
        }
    }

    fn lengths(&self) -> Result<(usize, usize)> {
        match (self.baseline, self.guard_band) {
            (Some(baseline), Some(guard_band)) => Ok((baseline, guard_band)),
            (baseline, guard_band) => {
                let missing = match (baseline, guard_band) {
                    (None, None) => "baseline and guard_band",
                    (None, _) => "baseline",
                    _ => "guard_band",
                };
                tracing::debug!(missing, "rejecting cusum without explicit window lengths");
                Err(CusumError::InvalidArguments(missing))
            }
        }
    }

    /// Builds the batch transform
    ///
    /// # Returns
    ///
    /// * `Result<Cusum<T, G>>` - The transform, or [`CusumError::InvalidArguments`]
    ///   if the baseline or the guard band was never set
    pub fn build(self) -> Result<Cusum<T, G>> {
        let (baseline, guard_band) = self.lengths()?;
        Ok(Cusum::with_config(baseline, guard_band, self.config))
    }

    /// Builds the streaming transform
    ///
    /// # Returns
    ///
    /// * `Result<RollingCusum<T, G>>` - The transform, or [`CusumError::InvalidArguments`]
    ///   if the baseline or the guard band was never set
    pub fn build_rolling(self) -> Result<RollingCusum<T, G>> {
        let (baseline, guard_band) = self.lengths()?;
        Ok(RollingCusum::with_config(baseline, guard_band, self.config))
    }
}
