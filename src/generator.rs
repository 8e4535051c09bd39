use alloc::{borrow::Cow, vec::Vec};

use num_traits::Float;

/// Strategy turning the current baseline window into the values the mean and
/// standard deviation are computed over.
///
/// The window is handed over as a shared slice, so a generator can never
/// mutate it. Returning [`Cow::Borrowed`] keeps the identity case free of copies.
///
/// Any `Fn(&[T]) -> Vec<T>` closure is a generator:
///
/// ```
/// # use cusum_stat::BaselineGenerator;
/// let clipped = |w: &[f64]| w.iter().map(|x| x.min(10.0)).collect::<Vec<_>>();
/// assert_eq!(&*clipped.generate(&[1.0, 50.0]), &[1.0, 10.0]);
/// ```
pub trait BaselineGenerator<T: Clone> {
    /// Produces the baseline values for one step from the window, oldest first.
    fn generate<'a>(&self, window: &'a [T]) -> Cow<'a, [T]>;
}

/// Uses the window as is. This is the default generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Clone> BaselineGenerator<T> for Identity {
    #[inline]
    fn generate<'a>(&self, window: &'a [T]) -> Cow<'a, [T]> {
        Cow::Borrowed(window)
    }
}

/// Drops NaN and infinite observations, treating them as missing.
///
/// Borrows the window when every value is finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropNonFinite;

impl<T: Float> BaselineGenerator<T> for DropNonFinite {
    fn generate<'a>(&self, window: &'a [T]) -> Cow<'a, [T]> {
        if window.iter().all(|x| x.is_finite()) {
            Cow::Borrowed(window)
        } else {
            Cow::Owned(window.iter().copied().filter(|x| x.is_finite()).collect())
        }
    }
}

impl<T, F> BaselineGenerator<T> for F
where
    T: Clone,
    F: Fn(&[T]) -> Vec<T>,
{
    #[inline]
    fn generate<'a>(&self, window: &'a [T]) -> Cow<'a, [T]> {
        Cow::Owned(self(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_borrows() {
        let window = [1.0, 2.0, 3.0];
        let out = Identity.generate(&window);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, &window);
    }

    #[test]
    fn drop_non_finite_filters_missing_values() {
        let window = [1.0, f64::NAN, 2.0, f64::INFINITY, 3.0];
        let out = DropNonFinite.generate(&window);
        assert_eq!(&*out, &[1.0, 2.0, 3.0]);
        assert!(window[1].is_nan());
    }

    #[test]
    fn drop_non_finite_borrows_clean_window() {
        let window = [1.0, 2.0];
        assert!(matches!(DropNonFinite.generate(&window), Cow::Borrowed(_)));
    }

    #[test]
    fn closure_generator() {
        let last_two = |w: &[f64]| w.iter().rev().take(2).rev().copied().collect::<Vec<_>>();
        assert_eq!(&*last_two.generate(&[1.0, 2.0, 3.0]), &[2.0, 3.0]);
    }
}
