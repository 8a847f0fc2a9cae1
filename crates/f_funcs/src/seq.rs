use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Sequences

/// Apply `f` to every element, collecting the results in order.
#[inline]
pub fn map<T, U>(f: impl FnMut(T) -> U, iterable: impl IntoIterator<Item = T>) -> Vec<U> {
    iterable.into_iter().map(f).collect()
}

/// The elements for which `pred` holds, in order.
#[inline]
pub fn filter<T>(pred: impl FnMut(&T) -> bool, iterable: impl IntoIterator<Item = T>) -> Vec<T> {
    iterable.into_iter().filter(pred).collect()
}

/// Left fold: `f(f(f(init, a), b), c)`.
#[inline]
pub fn reduce<A, T>(f: impl FnMut(A, T) -> A, init: A, iterable: impl IntoIterator<Item = T>) -> A {
    iterable.into_iter().fold(init, f)
}

#[inline(always)]
pub const fn identity<T>(value: T) -> T {
    value
}

/// The integers in `start..end`; empty if `end <= start`.
///
/// ```
/// assert_eq!(f_funcs::range(4, 6), [4, 5]);
/// assert!(f_funcs::range(6, 4).is_empty());
/// ```
#[inline]
pub fn range(start: i64, end: i64) -> Vec<i64> {
    (start..end).collect()
}

/// Concatenate one level of nesting.
///
/// Works for anything iterable of iterables: jagged `Vec<Vec<T>>`, arrays
/// of arrays, slices of `Vec`s, iterators of rows.
///
/// ```
/// use f_funcs::shallow_flatten;
///
/// assert_eq!(shallow_flatten(vec![vec![1, 2], vec![], vec![3]]), [1, 2, 3]);
/// assert_eq!(shallow_flatten([["a"], ["b"]]), ["a", "b"]);
/// ```
pub fn shallow_flatten<I>(nested: I) -> Vec<<I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    nested.into_iter().flatten().collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{filter, identity, map, range, reduce, shallow_flatten};

    #[test]
    fn map_filter_reduce() {
        let words = ["a", "bb", "ccc"];
        assert_eq!(map(str::len, words), [1, 2, 3]);
        assert_eq!(filter(|w: &&str| w.len() > 1, words), ["bb", "ccc"]);
        let joined = reduce(
            |mut acc: String, w: &str| {
                acc.push_str(w);
                acc
            },
            String::new(),
            words,
        );
        assert_eq!(joined, "abbccc");
        assert_eq!(reduce(|acc, v: i64| acc + v, 10, Vec::new()), 10);
    }

    #[test]
    fn range_is_half_open() {
        assert_eq!(range(4, 6), [4, 5]);
        assert_eq!(range(-1, 1), [-1, 0]);
        assert!(range(3, 3).is_empty());
    }

    #[test]
    fn flatten_borrowed_rows() {
        let rows = vec![vec!["x".to_string()], vec!["y".to_string()]];
        let flat: Vec<&String> = shallow_flatten(&rows);
        assert_eq!(flat, ["x", "y"]);
        assert_eq!(identity(rows.len()), 2);
    }
}
