use crate::{
    assert,
    linalg::echelon::{
        compute, reduce, validate, EchelonParams, EliminationKind, RowEchelon,
    },
    Mat, MatRef, RealField,
};
use std::sync::OnceLock;

/// Matrix along with its row echelon form and reduced row echelon form, each computed on first
/// access and cached afterwards.
///
/// The matrix cannot be modified through an `Echelon`, so the cached forms stay valid for as long
/// as it lives. Caches are filled at most once, even when first accessed from several threads at
/// the same time.
///
/// # Example
/// ```
/// use echelon::{mat, Echelon};
///
/// let a = Echelon::new(mat![
///     [4.0, 1.0, 2.0, -3.0],
///     [-3.0, 3.0, -1.0, 4.0],
///     [-1.0, 2.0, 5.0, 1.0],
///     [5.0, 4.0, 3.0, -1.0_f64],
/// ]);
///
/// assert_eq!(a.transposition_count(), 1);
/// assert!((a.determinant() - 116.0).abs() < 1e-10);
/// assert_eq!(*a.reduced_row_echelon(), echelon::Mat::identity(4, 4));
/// ```
#[derive(Clone, Debug)]
pub struct Echelon<E: RealField> {
    matrix: Mat<E>,
    params: EchelonParams<E>,
    row_echelon: OnceLock<RowEchelon<E>>,
    reduced_row_echelon: OnceLock<Mat<E>>,
}

impl<E: RealField> Echelon<E> {
    /// Wraps `matrix`, using the default parameters.
    #[inline]
    pub fn new(matrix: Mat<E>) -> Self {
        Self::with_params(matrix, Default::default())
    }

    /// Wraps `matrix`, using the given parameters for every reduction and check.
    #[inline]
    pub fn with_params(matrix: Mat<E>, params: EchelonParams<E>) -> Self {
        Self {
            matrix,
            params,
            row_echelon: OnceLock::new(),
            reduced_row_echelon: OnceLock::new(),
        }
    }

    /// Returns the wrapped matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat<E> {
        &self.matrix
    }

    /// Returns the parameters used for reductions and checks.
    #[inline]
    pub fn params(&self) -> EchelonParams<E> {
        self.params
    }

    /// Returns the row echelon form of the matrix, computing it if needed.
    pub fn row_echelon(&self) -> &RowEchelon<E> {
        self.row_echelon.get_or_init(|| {
            log::trace!(
                target: "echelon",
                "computing the row echelon form of a {}×{} matrix",
                self.matrix.nrows(),
                self.matrix.ncols(),
            );
            compute::row_echelon(self.matrix.as_ref(), self.params)
        })
    }

    /// Returns the reduced row echelon form of the matrix, computing it from the cached row
    /// echelon form if needed.
    pub fn reduced_row_echelon(&self) -> &Mat<E> {
        self.reduced_row_echelon.get_or_init(|| {
            let row_echelon = self.row_echelon();
            log::trace!(
                target: "echelon",
                "computing the reduced row echelon form of a {}×{} matrix",
                self.matrix.nrows(),
                self.matrix.ncols(),
            );
            reduce::reduced_row_echelon(row_echelon)
        })
    }

    /// Returns the number of row interchanges performed while computing the row echelon form.
    #[inline]
    pub fn transposition_count(&self) -> usize {
        self.row_echelon().transposition_count()
    }

    /// Returns `true` if the matrix itself is in row echelon form.
    #[inline]
    pub fn is_row_echelon(&self) -> bool {
        validate::is_row_echelon(self.matrix.as_ref(), self.params.tolerance)
    }

    /// Returns `true` if the matrix itself is in reduced row echelon form.
    #[inline]
    pub fn is_reduced_row_echelon(&self) -> bool {
        validate::is_reduced_row_echelon(self.matrix.as_ref(), self.params.tolerance)
    }

    /// Returns the rank of the matrix, which is the number of pivots of its row echelon form.
    #[inline]
    pub fn rank(&self) -> usize {
        self.row_echelon().rank()
    }

    /// Returns the determinant of the matrix.
    ///
    /// # Panics
    /// Panics if the matrix is not square.
    #[track_caller]
    pub fn determinant(&self) -> E {
        assert!(self.matrix.nrows() == self.matrix.ncols());
        determinant_from(self.row_echelon())
    }

    /// Consumes `self` and returns the wrapped matrix.
    #[inline]
    pub fn into_inner(self) -> Mat<E> {
        self.matrix
    }
}

fn determinant_from<E: RealField>(row_echelon: &RowEchelon<E>) -> E {
    match row_echelon.kind() {
        // partial pivoting gave up on a column with no usable pivot, so the matrix is singular
        EliminationKind::RowReduction => E::zero(),
        EliminationKind::PartialPivoting => {
            let mat = row_echelon.matrix();
            let mut det = E::one();
            for i in 0..mat.nrows() {
                det = det * mat.read(i, i);
            }
            if row_echelon.trace().is_odd() {
                -det
            } else {
                det
            }
        }
    }
}

impl<E: RealField> MatRef<'_, E> {
    /// Returns the row echelon form of `self`, computed with the default parameters.
    #[inline]
    pub fn row_echelon(&self) -> RowEchelon<E> {
        compute::row_echelon(*self, Default::default())
    }

    /// Returns the reduced row echelon form of `self`, computed with the default parameters.
    #[inline]
    pub fn reduced_row_echelon(&self) -> Mat<E> {
        reduce::reduced_row_echelon_from(*self, Default::default())
    }

    /// Returns `true` if `self` is in row echelon form, with the default tolerance.
    #[inline]
    pub fn is_row_echelon(&self) -> bool {
        validate::is_row_echelon(*self, E::default_tolerance())
    }

    /// Returns `true` if `self` is in reduced row echelon form, with the default tolerance.
    #[inline]
    pub fn is_reduced_row_echelon(&self) -> bool {
        validate::is_reduced_row_echelon(*self, E::default_tolerance())
    }

    /// Returns the rank of `self`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.row_echelon().rank()
    }

    /// Returns the determinant of `self`.
    ///
    /// # Panics
    /// Panics if `self` is not square.
    #[track_caller]
    pub fn determinant(&self) -> E {
        assert!(self.nrows() == self.ncols());
        determinant_from(&self.row_echelon())
    }

    /// Returns a copy of `self` that caches its echelon forms.
    #[inline]
    pub fn echelon(&self) -> Echelon<E> {
        Echelon::new(self.to_owned())
    }
}

impl<E: RealField> Mat<E> {
    /// Returns the row echelon form of `self`, computed with the default parameters.
    #[inline]
    pub fn row_echelon(&self) -> RowEchelon<E> {
        self.as_ref().row_echelon()
    }

    /// Returns the reduced row echelon form of `self`, computed with the default parameters.
    #[inline]
    pub fn reduced_row_echelon(&self) -> Mat<E> {
        self.as_ref().reduced_row_echelon()
    }

    /// Returns `true` if `self` is in row echelon form, with the default tolerance.
    #[inline]
    pub fn is_row_echelon(&self) -> bool {
        self.as_ref().is_row_echelon()
    }

    /// Returns `true` if `self` is in reduced row echelon form, with the default tolerance.
    #[inline]
    pub fn is_reduced_row_echelon(&self) -> bool {
        self.as_ref().is_reduced_row_echelon()
    }

    /// Returns the rank of `self`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.as_ref().rank()
    }

    /// Returns the determinant of `self`.
    ///
    /// # Panics
    /// Panics if `self` is not square.
    #[track_caller]
    pub fn determinant(&self) -> E {
        self.as_ref().determinant()
    }

    /// Returns a copy of `self` that caches its echelon forms.
    #[inline]
    pub fn echelon(&self) -> Echelon<E> {
        self.as_ref().echelon()
    }

    /// Consumes `self` and returns a matrix that caches its echelon forms.
    #[inline]
    pub fn into_echelon(self) -> Echelon<E> {
        Echelon::new(self)
    }
}
