use num_traits::Float;

use crate::Kbn;

/// Returns the arithmetic mean of a slice
///
/// # Arguments
///
/// * `xs` - The values to average
///
/// # Returns
///
/// * `Option<T>` - The mean, or `None` if the slice is empty
///
/// # Examples
///
/// ```
/// # use cusum_stat::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
#[inline]
pub fn mean<T: Float + Default>(xs: &[T]) -> Option<T> {
    if xs.is_empty() {
        return None;
    }
    let mut sum = Kbn::<T>::default();
    for &x in xs {
        sum += x;
    }
    Some(sum.total() / T::from(xs.len())?)
}

/// Returns the standard deviation of a slice
///
/// Two-pass computation: the mean first, then the compensated sum of squared
/// deviations from it.
///
/// # Arguments
///
/// * `xs` - The values
/// * `ddof` - `true` divides by `n - 1` (sample), `false` by `n` (population)
///
/// # Returns
///
/// * `Option<T>` - The standard deviation, or `None` if the denominator is not positive
///
/// # Examples
///
/// ```
/// # use cusum_stat::stddev;
/// let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(stddev(&xs, false), Some(2.0));
/// assert_eq!(stddev(&[1.0], true), None);
/// ```
#[inline]
pub fn stddev<T: Float + Default>(xs: &[T], ddof: bool) -> Option<T> {
    let mu = mean(xs)?;
    let n = T::from(xs.len())?;
    let denom = if ddof { n - T::one() } else { n };
    if denom <= T::zero() {
        return None;
    }

    let mut sum_sq = Kbn::<T>::default();
    for &x in xs {
        let d = x - mu;
        sum_sq += d * d;
    }
    Some((sum_sq.total() / denom).sqrt())
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn mean_is_compensated() {
        let xs = [1_000_000.1, 1_000_000.2, 1_000_000.3];
        assert_approx_eq!(mean(&xs).unwrap_or_default(), 1_000_000.2, 1e-8);
    }

    #[test]
    fn stddev_sample_and_population() {
        let xs = [25.4, 26.2, 26.0];
        assert_approx_eq!(stddev(&xs, true).unwrap_or_default(), 0.4163, 0.0001);
        assert_approx_eq!(stddev(&xs, false).unwrap_or_default(), 0.3399, 0.0001);
    }

    #[test]
    fn stddev_of_constant_is_zero() {
        assert_eq!(stddev(&[3.0, 3.0, 3.0], true), Some(0.0));
    }

    #[test]
    fn stddev_needs_enough_points() {
        assert_eq!(stddev::<f64>(&[], false), None);
        assert_eq!(stddev(&[1.0], true), None);
        assert_eq!(stddev(&[1.0], false), Some(0.0));
    }
}
