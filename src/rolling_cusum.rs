use num_traits::Float;

use crate::{
    BaselineGenerator, CusumConfig, Identity, RingBuffer,
    helper::{mean, stddev},
};

/// Window, guard band and carry state shared by the batch and streaming transforms.
///
/// Observations enter the guard band first; whatever ages out of the guard
/// band moves into the baseline window, which evicts its oldest value.
#[derive(Debug, Clone)]
pub(crate) struct CusumState<T> {
    /// Baseline window
    window: RingBuffer<T>,
    /// Observations not yet eligible for the baseline
    guard: RingBuffer<T>,
    /// Number of observations seen
    seen: usize,
    /// Number of statistics emitted
    emitted: usize,
    /// Previous emitted statistic, `None` if it was absent
    prev: Option<T>,
}

impl<T: Float + Default> CusumState<T> {
    pub(crate) fn new(baseline: usize, guard_band: usize) -> Self {
        Self {
            window: RingBuffer::new(baseline),
            guard: RingBuffer::new(guard_band),
            seen: 0,
            emitted: 0,
            prev: None,
        }
    }

    #[inline]
    fn warmup(&self) -> usize {
        self.window.capacity().saturating_add(self.guard.capacity())
    }

    /// Feeds one observation. Returns `Some(statistic)` once past the warmup,
    /// where the inner `None` is the absent marker.
    pub(crate) fn next<G>(&mut self, config: &CusumConfig<T, G>, value: T) -> Option<Option<T>>
    where
        G: BaselineGenerator<T>,
    {
        let out = if self.seen >= self.warmup() {
            let stat = self.step(config, value);
            self.prev = stat;
            self.emitted += 1;
            Some(stat)
        } else {
            None
        };

        self.seen += 1;
        if let Some(aged) = self.guard.push(value) {
            self.window.push(aged);
        }
        out
    }

    fn step<G>(&mut self, config: &CusumConfig<T, G>, value: T) -> Option<T>
    where
        G: BaselineGenerator<T>,
    {
        let baseline = config.generator().generate(self.window.make_contiguous());

        if baseline.len() < 2 {
            tracing::trace!(
                step = self.emitted,
                points = baseline.len(),
                "degenerate baseline, passing observation through"
            );
            // Negative observations are not interpolated
            return (value >= T::zero()).then_some(value);
        }

        let sigma = stddev(&baseline, config.ddof())?.max(config.min_sigma());
        let z = (value - mean(&baseline)?) / sigma;

        // Carry starts with the third output
        let carry = match self.prev {
            Some(prev) if self.emitted > 1 => {
                let reset_level = config.reset_level();
                if prev > reset_level {
                    tracing::debug!(step = self.emitted, "carry above reset level, decaying");
                    reset_level / (T::one() + T::one())
                } else {
                    prev.max(T::zero())
                }
            }
            _ => T::zero(),
        };

        let stat = carry + z - config.k();
        if stat.is_nan() {
            None
        } else {
            Some(stat.max(T::zero()))
        }
    }

    pub(crate) fn reset(&mut self) {
        self.window.reset();
        self.guard.reset();
        self.seen = 0;
        self.emitted = 0;
        self.prev = None;
    }
}

/// Streaming CUSUM test statistic.
///
/// Feed observations one at a time with [`RollingCusum::next`]. The first
/// `baseline + guard_band` observations only fill the guard band and the
/// baseline window; every later observation yields one statistic, identical
/// to the corresponding element of [`crate::Cusum::compute`] over the same data.
///
/// # Examples
///
/// ```
/// # use cusum_stat::RollingCusum;
/// let mut cusum = RollingCusum::new(3, 1);
/// let inputs = [1.0, 2.0, 1.5, 1.0, 9.0, 9.5];
/// let mut results = vec![];
///
/// for x in inputs {
///     if cusum.next(x).is_ready() {
///         results.push(cusum.statistic());
///     }
/// }
///
/// assert_eq!(results.len(), inputs.len() - 4);
/// assert!(results.iter().flatten().all(|s| *s >= 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct RollingCusum<T, G = Identity> {
    /// Tunables
    config: CusumConfig<T, G>,
    /// Window and carry state
    state: CusumState<T>,
    /// Statistic of the most recent step
    value: Option<T>,
    /// Whether the most recent step emitted a statistic
    ready: bool,
}

impl<T: Float + Default> RollingCusum<T, Identity> {
    /// Creates a streaming transform with the default tunables.
    ///
    /// # Arguments
    ///
    /// * `baseline` - Number of observations in the baseline window
    /// * `guard_band` - Number of observations between the baseline and the tested point
    ///
    /// # Returns
    ///
    /// * `Self` - The streaming transform
    pub fn new(baseline: usize, guard_band: usize) -> Self {
        Self::with_config(baseline, guard_band, CusumConfig::default())
    }
}

impl<T, G> RollingCusum<T, G>
where
    T: Float + Default,
    G: BaselineGenerator<T>,
{
    /// Creates a streaming transform with explicit tunables.
    pub fn with_config(baseline: usize, guard_band: usize, config: CusumConfig<T, G>) -> Self {
        Self {
            config,
            state: CusumState::new(baseline, guard_band),
            value: None,
            ready: false,
        }
    }

    /// Updates the transform with the next observation
    ///
    /// # Arguments
    ///
    /// * `value` - The next observation of the series
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The streaming transform
    pub fn next(&mut self, value: T) -> &mut Self {
        match self.state.next(&self.config, value) {
            Some(stat) => {
                self.value = stat;
                self.ready = true;
            }
            None => {
                self.value = None;
                self.ready = false;
            }
        }
        self
    }

    /// Returns `true` if the most recent observation produced a statistic
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns the statistic of the most recent observation
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The statistic, or `None` if the transform is still warming up
    ///   or the step was absent (degenerate baseline and negative observation)
    #[inline]
    pub const fn statistic(&self) -> Option<T> {
        self.value
    }

    /// Returns the number of observations seen since creation or the last reset
    #[inline]
    pub const fn count(&self) -> usize {
        self.state.seen
    }

    /// Returns the number of statistics emitted, absent ones included
    #[inline]
    pub const fn emitted(&self) -> usize {
        self.state.emitted
    }

    /// Returns the baseline window length
    #[inline]
    pub fn baseline(&self) -> usize {
        self.state.window.capacity()
    }

    /// Returns the guard band length
    #[inline]
    pub fn guard_band(&self) -> usize {
        self.state.guard.capacity()
    }

    /// Returns the observations currently in the baseline window, oldest first
    #[inline]
    pub fn window(&self) -> impl Iterator<Item = &T> {
        self.state.window.iter()
    }

    /// Returns the number of observations currently in the baseline window
    #[inline]
    pub fn window_len(&self) -> usize {
        self.state.window.len()
    }

    /// Returns the tunables
    #[inline]
    pub const fn config(&self) -> &CusumConfig<T, G> {
        &self.config
    }

    /// Resets the transform to its freshly created state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The streaming transform
    pub fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self.value = None;
        self.ready = false;
        self
    }
}
