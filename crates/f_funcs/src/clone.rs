use alloc::string::String;
use alloc::vec::Vec;

use f_reflect::access::shallow_copy;
use f_reflect::error::TypeCoercionError;
use f_reflect::{FromValue, Mapping, Record};
use f_utils::hash::{FixedHashState, HashMap};

// -----------------------------------------------------------------------------
// Copies

/// A fresh `T` with every writable public member copied from `source`.
///
/// Members holding `Arc`s stay shared with the source.
#[inline]
pub fn shallow_clone<T: Record + Default>(source: &T) -> T {
    shallow_copy(source)
}

/// Clone every element into a new collection of any kind.
///
/// ```
/// use std::collections::VecDeque;
///
/// let src = vec![String::from("a"), String::from("b")];
/// let copy: VecDeque<String> = f_funcs::shallow_clone_collection(&src);
/// assert_eq!(copy, ["a", "b"]);
/// ```
#[inline]
pub fn shallow_clone_collection<'a, T, C>(items: impl IntoIterator<Item = &'a T>) -> C
where
    T: Clone + 'a,
    C: FromIterator<T>,
{
    items.into_iter().cloned().collect()
}

/// A new list whose elements are fresh records, each shallow-copied from
/// the corresponding input element.
pub fn deep_clone_collection<T: Record + Default>(items: &[T]) -> Vec<T> {
    items.iter().map(shallow_copy).collect()
}

// -----------------------------------------------------------------------------
// Coercion

/// Convert every value of `mapping` to `T`.
///
/// The first value that does not convert fails the call.
///
/// ```
/// use f_funcs::coerce_mapping;
/// use f_reflect::Mapping;
///
/// let m: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
/// let ints = coerce_mapping::<i32>(&m).unwrap();
/// assert_eq!(ints["b"], 2);
///
/// let mixed: Mapping = [("a", "x")].into_iter().collect();
/// assert!(coerce_mapping::<i32>(&mixed).is_err());
/// ```
pub fn coerce_mapping<T: FromValue>(mapping: &Mapping) -> Result<HashMap<String, T>, TypeCoercionError> {
    let mut out = HashMap::with_capacity_and_hasher(mapping.len(), FixedHashState);
    for (key, value) in mapping.iter() {
        out.insert(String::from(key), T::from_value(value.clone())?);
    }
    Ok(out)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use f_reflect::derive::Record;

    use super::{deep_clone_collection, shallow_clone, shallow_clone_collection};

    #[derive(Record, Default, Debug, PartialEq)]
    struct Tile {
        pub label: String,
        pub weight: f64,
        pub atlas: Option<Arc<Vec<u8>>>,
    }

    fn tile(label: &str) -> Tile {
        Tile {
            label: label.into(),
            weight: 0.5,
            atlas: Some(Arc::new(vec![1, 2, 3])),
        }
    }

    #[test]
    fn shallow_clone_shares_arcs() {
        let source = tile("grass");
        let mut copy = shallow_clone(&source);
        assert_eq!(copy, source);

        let (a, b) = (source.atlas.as_ref().unwrap(), copy.atlas.as_ref().unwrap());
        assert!(Arc::ptr_eq(a, b));

        copy.label.push_str("-2");
        assert_eq!(source.label, "grass");
    }

    #[test]
    fn deep_clone_makes_fresh_records() {
        let tiles = vec![tile("a"), tile("b")];
        let mut copies = deep_clone_collection(&tiles);
        assert_eq!(copies, tiles);

        copies[0].weight = 2.0;
        assert_eq!(tiles[0].weight, 0.5);
    }

    #[test]
    fn clone_collection_into_other_kinds() {
        let labels = [String::from("x"), String::from("y")];
        let list: Vec<String> = shallow_clone_collection(&labels);
        assert_eq!(list, labels);

        let set: f_utils::hash::HashSet<String> = shallow_clone_collection(labels.iter());
        assert!(set.contains("y"));
    }
}
