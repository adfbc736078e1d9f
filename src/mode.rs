//! Most-frequent-value search built on [`ChainedHashMap`].

use std::hash::Hash;

use crate::ChainedHashMap;

/// Finds the most frequent value(s) in `values`.
///
/// Builds a frequency table keyed by value, tracking the highest count seen,
/// then collects every value whose count ties that maximum. The returned
/// values come out in the frequency table's bucket order, not input order.
/// An empty input yields an empty set and a frequency of 0.
///
/// Runs in O(n) expected time over the input length.
///
/// ```rust
/// use primetable::find_mode;
///
/// let fruit = ["apple", "apple", "grape", "melon", "peach"];
/// let (modes, frequency) = find_mode(&fruit);
/// assert_eq!(modes, vec!["apple"]);
/// assert_eq!(frequency, 2);
/// ```
pub fn find_mode<T>(values: &[T]) -> (Vec<T>, usize)
where
    T: Eq + Hash + Clone,
{
    let mut counts: ChainedHashMap<T, usize> = ChainedHashMap::new();
    let mut highest = 0;

    for value in values {
        let count = match counts.get_mut(value) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                counts.insert(value.clone(), 1);
                1
            }
        };
        if count > highest {
            highest = count;
        }
    }

    let modes = counts
        .iter()
        .filter(|&(_, &count)| count == highest)
        .map(|(value, _)| value.clone())
        .collect();

    (modes, highest)
}
