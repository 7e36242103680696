//! Contiguous halving of an ordered item sequence.

/// Split `items` into two contiguous halves.
///
/// `left` receives the first `len / 2` elements, `right` the remainder, so
/// for odd lengths the right half is one element larger. This tie-break is
/// load-bearing: it fixes which branch the bisector explores first and
/// therefore the exact oracle call sequence and call count for a given
/// deterministic oracle.
#[must_use]
pub fn split_halves<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_length_splits_evenly() {
        let (left, right) = split_halves(&[1, 2, 3, 4]);
        assert_eq!(left, &[1, 2]);
        assert_eq!(right, &[3, 4]);
    }

    #[test]
    fn odd_length_gives_remainder_to_right() {
        let (left, right) = split_halves(&[1, 2, 3, 4, 5]);
        assert_eq!(left, &[1, 2]);
        assert_eq!(right, &[3, 4, 5]);
    }

    #[test]
    fn singleton_goes_entirely_right() {
        let (left, right) = split_halves(&[7]);
        assert!(left.is_empty());
        assert_eq!(right, &[7]);
    }

    #[test]
    fn empty_input_splits_into_empties() {
        let (left, right) = split_halves::<i32>(&[]);
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn concatenation_restores_the_input() {
        let items = [10, 20, 30, 40, 50, 60, 70];
        let (left, right) = split_halves(&items);
        let rejoined: Vec<i32> = left.iter().chain(right).copied().collect();
        assert_eq!(rejoined, items);
    }
}
