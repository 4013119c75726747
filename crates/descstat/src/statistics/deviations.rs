//! Sums of powers of deviations from the mean.

use descstat_core::kernels::moments::{MomentOrder, Moments};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

macro_rules! deviation_statistic {
    ($(#[$doc:meta])* $name:ident, $order:expr, $getter:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            moments: Moments,
        }

        impl $name {
            /// Creates an empty statistic.
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    moments: Moments::new($order),
                }
            }

            /// Creates the statistic of an array.
            #[must_use]
            pub fn of(values: &[f64]) -> Self {
                Self {
                    moments: Moments::of($order, values),
                }
            }

            /// Creates the statistic of `values[from..to]`.
            ///
            /// # Errors
            ///
            /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
            /// unless `from <= to <= values.len()`.
            pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
                check_range(values.len(), from, to)?;
                Ok(Self::of(&values[from..to]))
            }

            /// Adds a value.
            #[inline]
            pub fn accept(&mut self, x: f64) {
                self.moments.accept(x);
            }

            /// Merges another statistic into this one.
            pub fn combine(&mut self, other: &Self) -> &mut Self {
                self.moments.combine(&other.moments);
                self
            }

            /// Number of values accepted.
            #[must_use]
            pub const fn count(&self) -> u64 {
                self.moments.count()
            }

            /// The sum; `0` when empty, `NaN` after a non-finite value.
            #[must_use]
            pub fn get_as_double(&self) -> f64 {
                self.moments.$getter()
            }
        }

        impl_double_statistic!($name);
    };
}

deviation_statistic!(
    /// Sum of squared deviations from the mean, `sum((x - mean)^2)`.
    ///
    /// ```
    /// use descstat::statistics::SumOfSquaredDeviations;
    ///
    /// let s = SumOfSquaredDeviations::of(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(s.get_as_double(), 5.0);
    /// ```
    SumOfSquaredDeviations,
    MomentOrder::Second,
    sum_of_squared_deviations
);

deviation_statistic!(
    /// Sum of cubed deviations from the mean, `sum((x - mean)^3)`.
    ///
    /// ```
    /// use descstat::statistics::SumOfCubedDeviations;
    ///
    /// let s = SumOfCubedDeviations::of(&[1.0, 2.0, 4.0, 8.0]);
    /// assert_eq!(s.get_as_double(), 50.625);
    /// ```
    SumOfCubedDeviations,
    MomentOrder::Third,
    sum_of_cubed_deviations
);

deviation_statistic!(
    /// Sum of fourth-power deviations from the mean, `sum((x - mean)^4)`.
    ///
    /// ```
    /// use descstat::statistics::SumOfFourthDeviations;
    ///
    /// let s = SumOfFourthDeviations::of(&[1.0, 2.0, 4.0, 8.0]);
    /// assert_eq!(s.get_as_double(), 392.828_125);
    /// ```
    SumOfFourthDeviations,
    MomentOrder::Fourth,
    sum_of_fourth_deviations
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(SumOfSquaredDeviations::new().get_as_double(), 0.0);
        assert_eq!(SumOfCubedDeviations::new().get_as_double(), 0.0);
        assert_eq!(SumOfFourthDeviations::new().get_as_double(), 0.0);
        assert_eq!(SumOfFourthDeviations::of(&[]).get_as_double(), 0.0);
    }

    #[test]
    fn test_single_value_is_zero() {
        assert_eq!(SumOfSquaredDeviations::of(&[9.0]).get_as_double(), 0.0);
        assert_eq!(SumOfCubedDeviations::of(&[9.0]).get_as_double(), 0.0);
        assert_eq!(SumOfFourthDeviations::of(&[9.0]).get_as_double(), 0.0);
    }

    #[test]
    fn test_combine_matches_whole() {
        let data = [1.0, 2.0, 4.0, 8.0];
        let mut s2 = SumOfSquaredDeviations::of(&data[..1]);
        s2.combine(&SumOfSquaredDeviations::of(&data[1..]));
        assert!((s2.get_as_double() - 28.75).abs() < 1e-13);

        let mut s3 = SumOfCubedDeviations::of(&data[..2]);
        s3.combine(&SumOfCubedDeviations::of(&data[2..]));
        assert!((s3.get_as_double() - 50.625).abs() < 1e-12);

        let mut s4 = SumOfFourthDeviations::of(&data[..3]);
        s4.combine(&SumOfFourthDeviations::of(&data[3..]));
        assert!((s4.get_as_double() - 392.828_125).abs() < 1e-11);
        assert_eq!(s4.count(), 4);
    }

    #[test]
    fn test_non_finite_is_nan() {
        assert!(SumOfSquaredDeviations::of(&[1.0, f64::INFINITY])
            .get_as_double()
            .is_nan());
        let mut s = SumOfFourthDeviations::new();
        s.accept(f64::NAN);
        assert!(s.get_as_double().is_nan());
    }

    #[test]
    fn test_streaming() {
        let s: SumOfCubedDeviations = [1.0, 2.0, 4.0, 8.0].into_iter().collect();
        assert!((s.get_as_double() - 50.625).abs() < 1e-12);
    }
}
