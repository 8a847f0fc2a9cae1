use alloc::string::String;

use f_reflect::error::DuplicateKeyError;
use f_reflect::{IntoValue, Mapping, Value};

use crate::{Grid, PairError, PairErrorKind};

// -----------------------------------------------------------------------------
// Building mappings

/// A new mapping with no entries.
#[inline]
pub fn empty_mapping() -> Mapping {
    Mapping::new()
}

/// Build a mapping from `(key, value)` pairs.
///
/// Keys may not repeat.
///
/// ```
/// use f_funcs::from_pairs;
///
/// let m = from_pairs([("a", 1), ("b", 2)]).unwrap();
/// assert_eq!(m["b"], f_reflect::Value::Int(2));
/// assert!(from_pairs([("a", 1), ("a", 2)]).is_err());
/// ```
pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Mapping, DuplicateKeyError>
where
    K: Into<String>,
    V: IntoValue,
{
    let mut mapping = Mapping::new();
    for (key, value) in pairs {
        mapping.try_insert(key, value.into_value())?;
    }
    Ok(mapping)
}

/// Build a mapping from dynamic rows of the form `[key, value]`.
///
/// Every row must have exactly two elements, the first of them a string,
/// and keys may not repeat.
pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Mapping, PairError>
where
    R: AsRef<[Value]>,
{
    let mut mapping = Mapping::new();
    for (index, row) in rows.into_iter().enumerate() {
        let (key, value) = split_row(row.as_ref()).map_err(|kind| PairError { index, kind })?;
        mapping
            .try_insert(key, value.clone())
            .map_err(|err| PairError {
                index,
                kind: PairErrorKind::DuplicateKey(err),
            })?;
    }
    Ok(mapping)
}

fn split_row(row: &[Value]) -> Result<(&str, &Value), PairErrorKind> {
    match row {
        [Value::Str(key), value] => Ok((key, value)),
        [key, _] => Err(PairErrorKind::KeyNotString {
            found: key.kind_name(),
        }),
        _ => Err(PairErrorKind::Shape { found: row.len() }),
    }
}

/// Pair `keys` with `values` position by position.
///
/// The shorter input decides the length. A repeated key keeps its first
/// position and takes the later value.
///
/// ```
/// use f_funcs::zip;
///
/// let m = zip(["a", "b", "c"], [1, 2]);
/// assert_eq!(m.keys().collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub fn zip<K, V>(keys: impl IntoIterator<Item = K>, values: impl IntoIterator<Item = V>) -> Mapping
where
    K: Into<String>,
    V: IntoValue,
{
    let mut keys = keys.into_iter();
    let mut values = values.into_iter();
    let mut mapping = Mapping::new();

    loop {
        match (keys.next(), values.next()) {
            (Some(key), Some(value)) => {
                mapping.insert(key, value.into_value());
            }
            (Some(_), None) => {
                log::debug!("zip: keys outnumber values, dropping the rest");
                break;
            }
            (None, Some(_)) => {
                log::debug!("zip: values outnumber keys, dropping the rest");
                break;
            }
            (None, None) => break,
        }
    }

    mapping
}

/// Build a mapping from a grid with two columns, keys in the first.
///
/// ```
/// use f_funcs::{Grid, zip_grid};
/// use f_reflect::Value;
///
/// let grid = Grid::from_rows([
///     [Value::from("x"), Value::from(1)],
///     [Value::from("y"), Value::from(2)],
/// ])
/// .unwrap();
/// let m = zip_grid(&grid).unwrap();
/// assert_eq!(m["y"], Value::Int(2));
/// ```
pub fn zip_grid(grid: &Grid<Value>) -> Result<Mapping, PairError> {
    if grid.rows() > 0 && grid.cols() != 2 {
        return Err(PairError {
            index: 0,
            kind: PairErrorKind::Shape { found: grid.cols() },
        });
    }
    from_rows(grid.iter_rows())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use f_reflect::Value;
    use f_reflect::error::DuplicateKeyError;

    use super::{from_pairs, from_rows, zip, zip_grid};
    use crate::{Grid, PairError, PairErrorKind};

    fn row(key: impl Into<Value>, value: impl Into<Value>) -> Vec<Value> {
        vec![key.into(), value.into()]
    }

    #[test]
    fn from_rows_checks_each_row() {
        let m = from_rows([row("a", 1), row("b", true)]).unwrap();
        assert_eq!(m["b"], Value::Bool(true));

        let err = from_rows([row("a", 1), vec![Value::from("b")]]).unwrap_err();
        assert_eq!(
            err,
            PairError {
                index: 1,
                kind: PairErrorKind::Shape { found: 1 }
            }
        );

        let err = from_rows([row(7, 1)]).unwrap_err();
        assert_eq!(err.kind, PairErrorKind::KeyNotString { found: "int" });

        let err = from_rows([row("a", 1), row("a", 2)]).unwrap_err();
        assert_eq!(
            err.kind,
            PairErrorKind::DuplicateKey(DuplicateKeyError { key: "a".into() })
        );
    }

    #[test]
    fn zip_shortest_wins() {
        let m = zip(["a", "b"], [1, 2, 3]);
        assert_eq!(m.len(), 2);
        assert_eq!(m["b"], Value::Int(2));

        let m = zip(["a", "b", "a"], [1, 2, 3]);
        assert_eq!(m.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(m["a"], Value::Int(3));
    }

    #[test]
    fn zip_grid_needs_two_columns() {
        let wide = Grid::from_rows([[Value::from("a"), Value::from(1), Value::Null]]).unwrap();
        assert_eq!(
            zip_grid(&wide).unwrap_err().kind,
            PairErrorKind::Shape { found: 3 }
        );

        let none = Grid::<Value>::from_rows(Vec::<Vec<Value>>::new()).unwrap();
        assert!(zip_grid(&none).unwrap().is_empty());
    }

    #[test]
    fn from_pairs_is_add_only() {
        let err = from_pairs([("k", 1), ("k", 1)]).unwrap_err();
        assert_eq!(err.key, "k");
    }
}
