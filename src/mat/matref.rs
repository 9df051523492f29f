use super::*;
use crate::assert;

/// Immutable view over a matrix, similar to an immutable reference to a 2D [prim@slice].
///
/// The viewed data is column-major and contiguous, with a row stride of `1` and a column stride
/// equal to the number of rows.
pub struct MatRef<'a, E: RealField> {
    pub(super) data: &'a [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
}

impl<E: RealField> Clone for MatRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: RealField> Copy for MatRef<'_, E> {}

impl<'short, E: RealField> Reborrow<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<E: RealField> IntoConst for MatRef<'_, E> {
    type Target = Self;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E: RealField> MatRef<'a, E> {
    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Returns a reference to the element at the given indices.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn get(self, row: usize, col: usize) -> &'a E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        let Self { data, nrows, .. } = self;
        &data[row + col * nrows]
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
        *(*self).get(row, col)
    }

    /// Returns the column at the given index as a contiguous slice.
    #[inline]
    #[track_caller]
    pub fn col_as_slice(self, col: usize) -> &'a [E] {
        assert!(col < self.ncols());
        let Self { data, nrows: m, .. } = self;
        &data[col * m..(col + 1) * m]
    }

    /// Returns an iterator over the entries of the row at the given index, from left to right.
    #[inline]
    #[track_caller]
    pub fn row_iter(self, row: usize) -> impl Iterator<Item = E> + 'a {
        assert!(row < self.nrows());
        let Self { data, nrows, .. } = self;
        data[row..].iter().step_by(nrows).copied()
    }

    /// Returns an owning [`Mat`] of the data.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        Mat::from_fn(self.nrows(), self.ncols(), |i, j| self.read(i, j))
    }
}

/// Creates a `MatRef` from slice views over the matrix data, and the matrix dimensions.
/// The data is interpreted in a column-major format, so that the first chunk of `nrows`
/// values from the slices goes in the first column of the matrix, the second chunk of `nrows`
/// values goes in the second column, and so on.
///
/// # Panics
/// The function panics if `data.len() != nrows * ncols`.
///
/// # Example
/// ```
/// use echelon::mat;
///
/// let slice = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0_f64];
/// let view = mat::from_column_major_slice::<f64>(&slice, 3, 2);
///
/// let expected = echelon::mat![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
/// assert_eq!(expected.as_ref(), view);
/// ```
#[track_caller]
#[inline(always)]
pub fn from_column_major_slice<E: RealField>(data: &[E], nrows: usize, ncols: usize) -> MatRef<'_, E> {
    assert!(data.len() == nrows * ncols);
    MatRef { data, nrows, ncols }
}

impl<E: RealField> PartialEq for MatRef<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl<'a, E: RealField> core::fmt::Debug for MatRef<'a, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct DebugRow<'a, T: RealField>(MatRef<'a, T>, usize);

        impl<'a, T: RealField> core::fmt::Debug for DebugRow<'a, T> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_list().entries(self.0.row_iter(self.1)).finish()
            }
        }

        writeln!(f, "[")?;
        for i in 0..self.nrows() {
            core::fmt::Debug::fmt(&DebugRow(*self, i), f)?;
            f.write_str(",\n")?;
        }
        write!(f, "]")
    }
}

impl<E: RealField> core::ops::Index<(usize, usize)> for MatRef<'_, E> {
    type Output = E;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        (*self).get(row, col)
    }
}
