use std::ops::{Add, Div};

use itertools::Itertools;

impl<T> WithMidpoints for T where T: ?Sized {}

pub trait WithMidpoints {
    /// Insert the linear midpoint between every two consecutive values.
    ///
    /// `n` values turn into `2n − 1`, the input values keep their order.
    fn with_midpoints<V>(self) -> Vec<V>
    where
        Self: Iterator<Item = V> + Sized,
        V: Copy + Add<Output = V> + Div<f64, Output = V>,
    {
        let values = self.collect_vec();
        let last = values.last().copied();
        values
            .into_iter()
            .tuple_windows()
            .flat_map(|(from, to)| [from, (from + to) / 2.0])
            .chain(last)
            .collect()
    }
}

/// Split a curve at its first non-negative sample, for two-tone area fills.
///
/// Returns `(negative, positive)` of the same length as the input. The crossing sample is zero
/// in both. A curve that never reaches zero is all negative, one that starts at or above zero
/// is all positive.
pub fn split_at_crossing<V>(values: &[V]) -> (Vec<Option<V>>, Vec<Option<V>>)
where
    V: Copy + Default + PartialOrd,
{
    let zero = V::default();
    let crossing = values.iter().position(|value| *value >= zero);
    values
        .iter()
        .enumerate()
        .map(|(index, value)| match crossing {
            None => (Some(*value), None),
            Some(0) => (None, Some(*value)),
            Some(crossing) if index < crossing => (Some(*value), None),
            Some(crossing) if index == crossing => (Some(zero), Some(zero)),
            Some(_) => (None, Some(*value)),
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_midpoints() {
        let refined = [0.0, 1.0, 3.0].into_iter().with_midpoints();
        assert_eq!(refined, [0.0, 0.5, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_with_midpoints_short() {
        assert_eq!([7.0].into_iter().with_midpoints(), [7.0]);
        assert!(std::iter::empty::<f64>().with_midpoints().is_empty());
    }

    #[test]
    fn test_split_crossing() {
        let (negative, positive) = split_at_crossing(&[-3.0, -1.0, 2.0, 4.0]);
        assert_eq!(negative, [Some(-3.0), Some(-1.0), Some(0.0), None]);
        assert_eq!(positive, [None, None, Some(0.0), Some(4.0)]);
    }

    #[test]
    fn test_split_never_crossing() {
        let (negative, positive) = split_at_crossing(&[-3.0, -2.0]);
        assert_eq!(negative, [Some(-3.0), Some(-2.0)]);
        assert_eq!(positive, [None, None]);
    }

    #[test]
    fn test_split_starting_positive() {
        let (negative, positive) = split_at_crossing(&[0.0, -2.0, 1.0]);
        assert_eq!(negative, [None, None, None]);
        assert_eq!(positive, [Some(0.0), Some(-2.0), Some(1.0)]);
    }
}
