use alloc::string::String;
use alloc::vec::Vec;

use f_reflect::access::{Keyed, get_value, get_value_or_default, to_mapping};
use f_reflect::error::TypeCoercionError;
use f_reflect::{FromValue, Mapping, Record, Value};

// -----------------------------------------------------------------------------
// Keyed subjects

/// Apply `f` to every `(key, value)` of a record or mapping, in key order.
///
/// ```
/// use f_funcs::map_keyed;
/// use f_reflect::Mapping;
///
/// let m: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
/// assert_eq!(map_keyed(|k, v| format!("{k}={v}"), &m), ["a=1", "b=2"]);
/// ```
pub fn map_keyed<U>(mut f: impl FnMut(&str, Value) -> U, subject: &(impl Keyed + ?Sized)) -> Vec<U> {
    to_mapping(subject)
        .into_entries()
        .into_iter()
        .map(|(key, value)| f(&key, value))
        .collect()
}

/// [`map_keyed`] over a record.
#[inline]
pub fn map_object<U, R>(f: impl FnMut(&str, Value) -> U, record: &R) -> Vec<U>
where
    R: Record + Keyed,
{
    map_keyed(f, record)
}

/// [`map_keyed`] over a mapping.
#[inline]
pub fn map_mapping<U>(f: impl FnMut(&str, Value) -> U, mapping: &Mapping) -> Vec<U> {
    map_keyed(f, mapping)
}

/// The `(key, value)` pairs of a record or mapping, in key order.
#[inline]
pub fn to_pairs(subject: &(impl Keyed + ?Sized)) -> Vec<(String, Value)> {
    to_mapping(subject).into_entries()
}

/// Read `key` from every subject.
///
/// Subjects without the key contribute `T::default()`. A present value of
/// another type fails the whole call.
///
/// ```
/// use f_funcs::pluck;
/// use f_reflect::Mapping;
///
/// let rows: Vec<Mapping> = vec![
///     [("id", 1)].into_iter().collect(),
///     Mapping::new(),
///     [("id", 3)].into_iter().collect(),
/// ];
/// assert_eq!(pluck::<i64, _>("id", &rows).unwrap(), [1, 0, 3]);
/// ```
pub fn pluck<T, S>(key: &str, subjects: impl IntoIterator<Item = S>) -> Result<Vec<T>, TypeCoercionError>
where
    T: FromValue + Default,
    S: Keyed,
{
    subjects
        .into_iter()
        .map(|subject| get_value::<T>(key, &subject))
        .collect()
}

/// A mapping holding each of `keys`, in the given order.
///
/// Keys the subject lacks are present with [`Value::Null`].
///
/// ```
/// use f_funcs::pick_all;
/// use f_reflect::{Mapping, Value};
///
/// let m: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
/// let picked = pick_all(["b", "z"], &m);
/// assert_eq!(picked.keys().collect::<Vec<_>>(), ["b", "z"]);
/// assert_eq!(picked["z"], Value::Null);
/// ```
pub fn pick_all<K>(keys: impl IntoIterator<Item = K>, subject: &(impl Keyed + ?Sized)) -> Mapping
where
    K: AsRef<str>,
{
    keys.into_iter()
        .map(|key| {
            let value = get_value_or_default::<Value>(key.as_ref(), subject);
            (String::from(key.as_ref()), value)
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use f_reflect::access::Keyed;
    use f_reflect::derive::Record;
    use f_reflect::{Mapping, Value};

    use super::{map_object, pick_all, pluck, to_pairs};
    use crate::{empty_mapping, from_mapping, from_pairs, reduce};

    #[derive(Record, Default)]
    struct Person {
        pub first_name: String,
        pub age: u32,
    }

    #[derive(Record, Default)]
    struct Name {
        pub first_name: String,
        pub middle_name: String,
        pub last_name: String,
    }

    #[derive(Record, Default, Debug)]
    struct NameMetrics {
        pub first_name_letter_count: i64,
        pub middle_name_letter_count: i64,
        pub last_name_letter_count: i64,
        pub first_name_normalized: String,
        pub middle_name_normalized: String,
        pub last_name_normalized: String,
        pub first_name_initial: String,
        pub middle_name_initial: String,
        pub last_name_initial: String,
    }

    #[test]
    fn pluck_over_mixed_subjects() {
        let samuel = Person {
            first_name: "samuel".into(),
            age: 41,
        };
        let albert = Person {
            first_name: "albert".into(),
            age: 76,
        };
        let nameless: Mapping = [("age", 3)].into_iter().collect();
        let empty = Mapping::new();

        let subjects: [&dyn Keyed; 4] = [&samuel, &albert, &nameless, &empty];
        let names = pluck::<String, _>("first_name", subjects).unwrap();
        assert_eq!(names, ["samuel", "albert", "", ""]);

        let ages = pluck::<u32, _>("age", subjects).unwrap();
        assert_eq!(ages, [41, 76, 3, 0]);

        assert!(pluck::<u32, _>("first_name", subjects).is_err());
    }

    #[test]
    fn pick_all_keeps_missing_keys() {
        let person = Person {
            first_name: "ada".into(),
            age: 36,
        };
        let picked = pick_all(["age", "email"], &person);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked["age"], Value::UInt(36));
        assert_eq!(picked["email"], Value::Null);
    }

    #[test]
    fn pairs_round_trip() {
        let m: Mapping = [("x", Value::from(1)), ("y", Value::from("two"))]
            .into_iter()
            .collect();
        assert_eq!(from_pairs(to_pairs(&m)).unwrap(), m);
    }

    #[test]
    fn map_object_in_key_order() {
        let person = Person {
            first_name: "grace".into(),
            age: 85,
        };
        let keys = map_object(|key, _| key.to_string(), &person);
        assert_eq!(keys, ["first_name", "age"]);
    }

    #[test]
    fn name_metrics_from_pairs() {
        let name = Name {
            first_name: "Samuel".into(),
            middle_name: "Leroy".into(),
            last_name: "Jackson".into(),
        };

        let metrics = reduce(
            |mut acc: Mapping, (key, value): (String, Value)| {
                let text = value.as_str().unwrap_or_default();
                let initial: String = text.chars().take(1).collect();
                acc.insert(alloc::format!("{key}_normalized"), text.to_lowercase());
                acc.insert(
                    alloc::format!("{key}_letter_count"),
                    text.chars().count() as i64,
                );
                acc.insert(alloc::format!("{key}_initial"), initial);
                acc
            },
            empty_mapping(),
            to_pairs(&name),
        );
        let d: NameMetrics = from_mapping(&metrics);

        assert_eq!(d.first_name_normalized, "samuel");
        assert_eq!(d.middle_name_normalized, "leroy");
        assert_eq!(d.last_name_normalized, "jackson");
        assert_eq!(d.first_name_letter_count, 6);
        assert_eq!(d.middle_name_letter_count, 5);
        assert_eq!(d.last_name_letter_count, 7);
        assert_eq!(d.first_name_initial, "S");
        assert_eq!(d.middle_name_initial, "L");
        assert_eq!(d.last_name_initial, "J");

        let keys: Vec<&str> = metrics.keys().take(3).collect();
        assert_eq!(
            keys,
            ["first_name_normalized", "first_name_letter_count", "first_name_initial"]
        );
    }
}
