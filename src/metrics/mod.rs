//! Stateless evaluation metrics over plain output vectors.
//!
//! Used by training loops and reporting code; they never touch network
//! state. Both functions panic if the slices differ in length.

/// Mean of the squared componentwise differences.
pub fn mean_squared_error(actual: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(
        actual.len(),
        expected.len(),
        "metric operands must have equal length"
    );
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e).powi(2))
        .sum::<f64>()
        / n
}

/// Rounds every component of both slices to the nearest integer and
/// returns the fraction of matching pairs. `0.0` for empty input.
pub fn accuracy(actual: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(
        actual.len(),
        expected.len(),
        "metric operands must have equal length"
    );
    if actual.is_empty() {
        return 0.0;
    }
    let matching = actual
        .iter()
        .zip(expected)
        .filter(|(a, e)| a.round() == e.round())
        .count();
    matching as f64 / actual.len() as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mse_of_equal_vectors_is_zero() {
        assert_eq!(mean_squared_error(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn mse_of_unit_differences_is_one() {
        assert_eq!(mean_squared_error(&[0.0, 0.0], &[1.0, 1.0]), 1.0);
    }

    #[test]
    fn mse_averages_over_components() {
        assert_relative_eq!(mean_squared_error(&[0.0, 1.0], &[1.0, 1.0]), 0.5);
    }

    #[test]
    fn accuracy_all_match_after_rounding() {
        assert_eq!(accuracy(&[0.9, 0.1, 1.4], &[1.0, 0.0, 1.0]), 1.0);
    }

    #[test]
    fn accuracy_none_match() {
        assert_eq!(accuracy(&[0.9, 0.1], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn accuracy_partial_match() {
        assert_relative_eq!(accuracy(&[0.9, 0.1], &[1.0, 1.0]), 0.5);
    }

    #[test]
    fn accuracy_of_empty_slices() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_lengths_panic() {
        mean_squared_error(&[1.0], &[1.0, 2.0]);
    }
}
