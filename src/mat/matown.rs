use super::*;
use crate::assert;

/// Heap allocated matrix, similar to a 2D [`Vec`].
///
/// # Note
///
/// The memory layout of `Mat` is guaranteed to be column-major, meaning that it has a row stride
/// of `1`, and a column stride equal to the number of rows.
///
/// Let us consider a 3×4 matrix
///
/// ```notcode
///  0 │ 3 │ 6 │  9
/// ───┼───┼───┼───
///  1 │ 4 │ 7 │ 10
/// ───┼───┼───┼───
///  2 │ 5 │ 8 │ 11
/// ```
/// The memory representation of the data held by such a matrix is:
///
/// ```notcode
/// 0 1 2 3 4 5 6 7 8 9 10 11
/// ```
#[derive(Clone)]
pub struct Mat<E: RealField> {
    data: Vec<E>,
    nrows: usize,
    ncols: usize,
}

impl<E: RealField> Mat<E> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function.
    #[inline]
    pub fn from_fn(nrows: usize, ncols: usize, f: impl FnMut(usize, usize) -> E) -> Self {
        let mut f = f;
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| E::zero())
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros, except the main
    /// diagonal which is filled with ones.
    #[inline]
    #[doc(alias = "eye")]
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |i, j| if i == j { E::one() } else { E::zero() })
    }

    /// Builds a matrix from a list of rows, validating that the data describes a non-empty
    /// rectangular matrix of finite values.
    ///
    /// # Example
    /// ```
    /// use echelon::{mat::CreationError, Mat};
    ///
    /// let a = Mat::try_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0_f64]]).unwrap();
    /// assert_eq!(a.read(1, 0), 3.0);
    ///
    /// let ragged = Mat::try_from_rows(&[vec![1.0, 2.0], vec![3.0_f64]]);
    /// assert_eq!(
    ///     ragged,
    ///     Err(CreationError::Ragged {
    ///         row: 1,
    ///         expected: 2,
    ///         found: 1
    ///     })
    /// );
    /// ```
    pub fn try_from_rows<Row: AsRef<[E]>>(rows: &[Row]) -> Result<Self, CreationError> {
        let nrows = rows.len();
        let ncols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => return Err(CreationError::Empty),
        };
        if ncols == 0 {
            return Err(CreationError::Empty);
        }

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(CreationError::Ragged {
                    row: i,
                    expected: ncols,
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|x| !x.is_finite()) {
                return Err(CreationError::NonFinite { row: i, col: j });
            }
        }

        Ok(Self::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]))
    }

    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Returns a view over the matrix.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, E> {
        MatRef {
            data: &self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Returns a mutable view over the matrix.
    #[inline]
    pub fn as_mut(&mut self) -> MatMut<'_, E> {
        MatMut {
            data: &mut self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Returns the column at the given index as a contiguous slice.
    #[inline]
    #[track_caller]
    pub fn col_as_slice(&self, col: usize) -> &[E] {
        self.as_ref().col_as_slice(col)
    }

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.as_ref().read(row, col)
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        self.as_mut().write(row, col, value)
    }

    /// Copies the values from `other` into `self`.
    ///
    /// # Panics
    /// The function panics if `self` and `other` do not have the same shape.
    #[inline]
    #[track_caller]
    pub fn copy_from(&mut self, other: impl AsMatRef<E>) {
        self.as_mut().copy_from(other)
    }

    /// Returns the rows of the matrix as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<E>> {
        (0..self.nrows)
            .map(|i| self.as_ref().row_iter(i).collect())
            .collect()
    }
}

impl<E: RealField> PartialEq for Mat<E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl<E: RealField> core::fmt::Debug for Mat<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.as_ref(), f)
    }
}

impl<E: RealField> core::ops::Index<(usize, usize)> for Mat<E> {
    type Output = E;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        self.as_ref().get(row, col)
    }
}

impl<E: RealField> core::ops::IndexMut<(usize, usize)> for Mat<E> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        self.as_mut().get_mut(row, col)
    }
}
