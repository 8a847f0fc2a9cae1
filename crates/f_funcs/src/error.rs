//! Error types of the pair and grid helpers.

use core::{error, fmt};

use f_reflect::error::DuplicateKeyError;

// -----------------------------------------------------------------------------
// PairError

/// Why a pair row could not become a mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairErrorKind {
    /// The row does not have exactly two elements.
    Shape { found: usize },
    /// The first element of the row is not a string.
    KeyNotString { found: &'static str },
    /// An earlier row already used this key.
    DuplicateKey(DuplicateKeyError),
}

/// A malformed row at `index` of a pair list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairError {
    pub index: usize,
    pub kind: PairErrorKind,
}

impl fmt::Display for PairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PairErrorKind::Shape { found } => {
                write!(f, "pair {} has {found} elements, expected 2", self.index)
            }
            PairErrorKind::KeyNotString { found } => {
                write!(f, "pair {} has a `{found}` key, expected a string", self.index)
            }
            PairErrorKind::DuplicateKey(err) => write!(f, "pair {}: {err}", self.index),
        }
    }
}

impl error::Error for PairError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            PairErrorKind::DuplicateKey(err) => Some(err),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ShapeError

/// Rows of different lengths given to [`Grid::from_rows`](crate::Grid::from_rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has {} elements, expected {}",
            self.row, self.found, self.expected
        )
    }
}

impl error::Error for ShapeError {}
