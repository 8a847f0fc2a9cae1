use alloc::vec::Vec;
use core::ops::Index;

use crate::ShapeError;

// -----------------------------------------------------------------------------
// Grid

/// A rectangular, row-major table.
///
/// # Examples
///
/// ```
/// use f_funcs::Grid;
///
/// let grid = Grid::from_rows([[1, 2, 3], [4, 5, 6]]).unwrap();
/// assert_eq!((grid.rows(), grid.cols()), (2, 3));
/// assert_eq!(grid[(1, 0)], 4);
/// assert_eq!(grid.row(0), Some(&[1, 2, 3][..]));
///
/// assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build from rows that must all have the same length.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, ShapeError>
    where
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut count = 0;

        for (index, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let found = cells.len() - before;
            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(ShapeError {
                        row: index,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            count = index + 1;
        }

        Ok(Self {
            rows: count,
            cols: cols.unwrap_or(0),
            cells,
        })
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Rows from top to bottom.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[T]> {
        (0..self.rows).map(move |row| {
            let start = row * self.cols;
            &self.cells[start..start + self.cols]
        })
    }

    /// Every cell in row-major order.
    #[inline]
    pub fn flatten(self) -> Vec<T> {
        self.cells
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.get(row, col) {
            Some(cell) => cell,
            None => panic!(
                "position ({row}, {col}) is out of bounds for a {}x{} grid",
                self.rows, self.cols
            ),
        }
    }
}

/// Apply `f` to every row of `grid`.
///
/// ```
/// use f_funcs::{Grid, map_grid};
///
/// let grid = Grid::from_rows([[1, 2], [3, 4]]).unwrap();
/// assert_eq!(map_grid(|row| row.iter().sum::<i32>(), &grid), [3, 7]);
/// ```
#[inline]
pub fn map_grid<T, U>(f: impl FnMut(&[T]) -> U, grid: &Grid<T>) -> Vec<U> {
    grid.iter_rows().map(f).collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use f_reflect::Value;

    use super::Grid;
    use crate::{ShapeError, shallow_flatten};

    #[test]
    fn flatten_agrees_across_shapes() {
        let cells = || [Value::from("1"), Value::from(2), Value::from("2"), Value::from(3)];
        let [a, b, c, d] = cells();

        let grid = Grid::from_rows([[a.clone(), b.clone()], [c.clone(), d.clone()]]).unwrap();
        let jagged: Vec<Vec<Value>> = vec![vec![a.clone(), b.clone()], vec![c.clone(), d.clone()]];
        let nested = [[a, b], [c, d]];

        let from_grid = grid.flatten();
        assert_eq!(from_grid, cells());
        assert_eq!(shallow_flatten(jagged), from_grid);
        assert_eq!(shallow_flatten(nested), from_grid);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3, 4], vec![5]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_and_zero_width_grids() {
        let empty = Grid::<u8>::from_rows(Vec::<Vec<u8>>::new()).unwrap();
        assert_eq!((empty.rows(), empty.cols()), (0, 0));
        assert!(empty.row(0).is_none());

        let thin = Grid::<u8>::from_rows([[], []]).unwrap();
        assert_eq!((thin.rows(), thin.cols()), (2, 0));
        assert_eq!(thin.iter_rows().len(), 2);
        assert!(thin.get(0, 0).is_none());
    }
}
