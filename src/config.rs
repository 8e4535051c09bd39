use num_traits::Float;

use crate::generator::Identity;

/// Tunables of the CUSUM transform.
///
/// | tunable       | default    | role                                                   |
/// |---------------|------------|--------------------------------------------------------|
/// | `k`           | `0.5`      | sensitivity, subtracted from every step's z-statistic  |
/// | `min_sigma`   | `0.5`      | floor for the baseline standard deviation              |
/// | `reset_level` | `4`        | carry above this is decayed to `reset_level / 2`       |
/// | `ddof`        | `true`     | sample (`n - 1`) rather than population deviation      |
/// | `generator`   | `Identity` | maps the baseline window to the values used for stats  |
///
/// # Examples
///
/// ```
/// # use cusum_stat::{CusumConfig, DropNonFinite};
/// let mut config = CusumConfig::<f64>::default();
/// config.set_k(1.0).set_reset_level(5.0);
/// let config = config.with_generator(DropNonFinite);
///
/// assert_eq!(config.k(), 1.0);
/// assert_eq!(config.min_sigma(), 0.5);
/// assert_eq!(config.reset_level(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct CusumConfig<T, G = Identity> {
    /// Sensitivity constant
    k: T,
    /// Minimum sigma floor
    min_sigma: T,
    /// Reset level
    reset_level: T,
    /// Delta Degrees of Freedom
    ddof: bool,
    /// Baseline generator
    generator: G,
}

impl<T: Float> Default for CusumConfig<T, Identity> {
    fn default() -> Self {
        let half = T::one() / (T::one() + T::one());
        let four = (T::one() + T::one()) * (T::one() + T::one());
        Self {
            k: half,
            min_sigma: half,
            reset_level: four,
            ddof: true,
            generator: Identity,
        }
    }
}

impl<T: Float, G> CusumConfig<T, G> {
    /// Returns the sensitivity constant
    #[inline]
    pub const fn k(&self) -> T {
        self.k
    }

    /// Sets the sensitivity constant
    ///
    /// # Arguments
    ///
    /// * `k` - Subtracted from each step's standardized deviation
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config
    #[inline]
    pub fn set_k(&mut self, k: T) -> &mut Self {
        self.k = k;
        self
    }

    /// Returns the minimum sigma floor
    #[inline]
    pub const fn min_sigma(&self) -> T {
        self.min_sigma
    }

    /// Sets the minimum sigma floor
    ///
    /// # Arguments
    ///
    /// * `min_sigma` - Lower bound applied to the baseline standard deviation
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config
    #[inline]
    pub fn set_min_sigma(&mut self, min_sigma: T) -> &mut Self {
        self.min_sigma = min_sigma;
        self
    }

    /// Returns the reset level
    #[inline]
    pub const fn reset_level(&self) -> T {
        self.reset_level
    }

    /// Sets the reset level
    ///
    /// # Arguments
    ///
    /// * `reset_level` - A previous output above this carries only half of it
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config
    #[inline]
    pub fn set_reset_level(&mut self, reset_level: T) -> &mut Self {
        self.reset_level = reset_level;
        self
    }

    /// Returns the Delta Degrees of Freedom
    #[inline]
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom
    ///
    /// # Arguments
    ///
    /// * `ddof` - `true` for the sample standard deviation, `false` for population
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config
    #[inline]
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.ddof = ddof;
        self
    }

    /// Returns the baseline generator
    #[inline]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Replaces the baseline generator, keeping every other tunable
    pub fn with_generator<H>(self, generator: H) -> CusumConfig<T, H> {
        CusumConfig {
            k: self.k,
            min_sigma: self.min_sigma,
            reset_level: self.reset_level,
            ddof: self.ddof,
            generator,
        }
    }
}
