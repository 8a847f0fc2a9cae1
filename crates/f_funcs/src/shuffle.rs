use alloc::vec::Vec;

use rand::Rng;

/// A shuffled copy of `items`, using the thread-local generator.
///
/// ```
/// let deck = [1, 2, 3, 4];
/// let mut shuffled = f_funcs::shuffle(&deck);
/// shuffled.sort();
/// assert_eq!(shuffled, deck);
/// ```
#[inline]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// A shuffled copy of `items` drawn from `rng`.
///
/// Fisher-Yates over a clone; `items` itself is left untouched.
pub fn shuffle_with<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

// -----------------------------------------------------------------------------
// Tests
