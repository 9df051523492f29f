use super::*;
use crate::{assert, debug_assert};

/// Mutable view over a matrix, similar to a mutable reference to a 2D [prim@slice].
///
/// Besides element access, this is where the row operations used by the elimination routines
/// live: interchanging two rows, scaling a row, and adding a multiple of one row to another.
pub struct MatMut<'a, E: RealField> {
    pub(super) data: &'a mut [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
}

impl<'short, E: RealField> Reborrow<'short> for MatMut<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        MatRef {
            data: &*self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<'short, E: RealField> ReborrowMut<'short> for MatMut<'_, E> {
    type Target = MatMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        MatMut {
            data: &mut *self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<'a, E: RealField> IntoConst for MatMut<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        MatRef {
            data: self.data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<'a, E: RealField> MatMut<'a, E> {
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

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.rb().read(row, col)
    }

    /// Returns a mutable reference to the element at the given indices.
    ///
    /// # Panics
    /// The function panics if any of the following conditions are violated:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn get_mut(self, row: usize, col: usize) -> &'a mut E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        let Self { data, nrows, .. } = self;
        &mut data[row + col * nrows]
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
        *self.rb_mut().get_mut(row, col) = value;
    }

    /// Copies the values from `other` into `self`.
    ///
    /// # Panics
    /// The function panics if `self` and `other` do not have the same shape.
    #[track_caller]
    pub fn copy_from(&mut self, other: impl AsMatRef<E>) {
        let other = other.as_mat_ref();
        assert!(all(
            self.nrows() == other.nrows(),
            self.ncols() == other.ncols(),
        ));
        self.data.copy_from_slice(other.data);
    }

    /// Interchanges the rows `a` and `b`.
    ///
    /// # Panics
    /// The function panics if `a` or `b` is out of bounds.
    #[track_caller]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(all(a < self.nrows(), b < self.nrows()));
        if a == b {
            return;
        }
        let m = self.nrows;
        for j in 0..self.ncols {
            self.data.swap(a + j * m, b + j * m);
        }
    }

    /// Multiplies every entry of the row `row` by `factor`.
    #[track_caller]
    pub fn scale_row(&mut self, row: usize, factor: E) {
        assert!(row < self.nrows());
        let m = self.nrows;
        for j in 0..self.ncols {
            let x = &mut self.data[row + j * m];
            *x = *x * factor;
        }
    }

    /// Adds `factor` times the row `src` to the row `dst`, restricted to the columns starting at
    /// `col_start`.
    ///
    /// Entries of `dst` left of `col_start` are not accessed, which lets elimination skip the
    /// columns that are already known to be zero in both rows.
    #[track_caller]
    pub fn add_scaled_row(&mut self, dst: usize, src: usize, factor: E, col_start: usize) {
        assert!(all(
            dst < self.nrows(),
            src < self.nrows(),
            dst != src,
            col_start <= self.ncols(),
        ));
        let m = self.nrows;
        for j in col_start..self.ncols {
            let s = self.data[src + j * m];
            let d = &mut self.data[dst + j * m];
            *d = *d + factor * s;
        }
    }

    /// Replaces every entry of the row `row` whose magnitude is below `tolerance` with an exact
    /// zero.
    #[track_caller]
    pub fn flush_negligible_row(&mut self, row: usize, tolerance: E) {
        debug_assert!(tolerance >= E::zero());
        assert!(row < self.nrows());
        let m = self.nrows;
        for j in 0..self.ncols {
            let x = &mut self.data[row + j * m];
            if crate::linalg::echelon::is_negligible(*x, tolerance) {
                *x = E::zero();
            }
        }
    }
}

impl<E: RealField> core::fmt::Debug for MatMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.rb(), f)
    }
}

impl<E: RealField> core::ops::Index<(usize, usize)> for MatMut<'_, E> {
    type Output = E;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        self.rb().get(row, col)
    }
}

impl<E: RealField> core::ops::IndexMut<(usize, usize)> for MatMut<'_, E> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        self.rb_mut().get_mut(row, col)
    }
}
