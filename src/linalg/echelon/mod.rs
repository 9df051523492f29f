//! Row echelon forms of dense real matrices.
//!
//! A matrix is in row echelon form (REF) when the leading entry of each row lies strictly to the
//! right of the leading entry of the row above it, and rows without a leading entry come last.
//! It is in reduced row echelon form (RREF) when, in addition, every leading entry is $1$ and is
//! the only non-zero entry of its column.
//!
//! - [`compute`] performs forward elimination, producing a REF and the row interchanges used to
//!   reach it.
//! - [`reduce`] performs backward elimination on a REF, producing the RREF.
//! - [`validate`] checks arbitrary matrices against both forms.
//!
//! All of them decide whether a value is zero with [`is_negligible`], and take the tolerance
//! from the same [`EchelonParams`].

use crate::{assert, Mat, MatRef, RealField};

/// Forward elimination.
pub mod compute;
/// Backward elimination.
pub mod reduce;
/// Structural checks.
pub mod validate;

/// Returns `true` if `value` is small enough in magnitude to be treated as an exact zero.
///
/// Exact zeros are negligible for any tolerance, including a zero tolerance.
/// This is the only zero test used by the elimination routines and the validators.
#[inline(always)]
pub fn is_negligible<E: RealField>(value: E, tolerance: E) -> bool {
    value == E::zero() || value.abs() < tolerance
}

/// Returns the column of the first non-negligible entry of the row `row`, or `None` if the whole
/// row is negligible.
///
/// # Panics
/// Panics if `row >= matrix.nrows()`.
#[track_caller]
pub fn leading_entry<E: RealField>(matrix: MatRef<'_, E>, row: usize, tolerance: E) -> Option<usize> {
    assert!(row < matrix.nrows());
    matrix
        .row_iter(row)
        .position(|x| !is_negligible(x, tolerance))
}

/// Pivot choice of [`compute::row_reduction_in_place`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PivotingStrategy {
    /// Picks the entry with the largest magnitude at or below the current row. The column is
    /// skipped if that magnitude is negligible.
    #[default]
    LargestMagnitude,
    /// Picks the first non-negligible entry at or below the current row.
    FirstNonNegligible,
}

/// Row echelon tuning parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct EchelonParams<E: RealField> {
    /// Magnitude below which an entry is treated as zero.
    pub tolerance: E,
    /// Pivot choice of the row reduction, including the one [`compute::row_echelon`] falls back
    /// to.
    pub pivoting: PivotingStrategy,
}

impl<E: RealField> Default for EchelonParams<E> {
    #[inline]
    fn default() -> Self {
        Self {
            tolerance: E::default_tolerance(),
            pivoting: PivotingStrategy::default(),
        }
    }
}

impl<E: RealField> EchelonParams<E> {
    /// Returns the parameters with the tolerance replaced by `tolerance`.
    ///
    /// # Panics
    /// Panics if `tolerance` is negative or NaN.
    #[inline]
    #[track_caller]
    pub fn with_tolerance(self, tolerance: E) -> Self {
        assert!(tolerance >= E::zero());
        Self { tolerance, ..self }
    }

    /// Returns the parameters with the row reduction pivot choice replaced by `pivoting`.
    #[inline]
    pub fn with_pivoting(self, pivoting: PivotingStrategy) -> Self {
        Self { pivoting, ..self }
    }
}

/// Interchange of two rows during forward elimination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transposition {
    /// Row that receives the pivot.
    pub row: usize,
    /// Row the pivot was found in.
    pub pivot_row: usize,
}

/// Ordered record of the row interchanges performed by forward elimination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PivotTrace {
    transpositions: Vec<Transposition>,
}

impl PivotTrace {
    /// Returns an empty trace.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, row: usize, pivot_row: usize) {
        log::trace!(target: "echelon", "interchanging rows {row} and {pivot_row}");
        self.transpositions.push(Transposition { row, pivot_row });
    }

    /// Returns the number of row interchanges.
    #[inline]
    pub fn transposition_count(&self) -> usize {
        self.transpositions.len()
    }

    /// Returns `true` if the interchanges compose an odd permutation.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.transposition_count() % 2 == 1
    }

    /// Returns the interchanges in the order they were performed.
    #[inline]
    pub fn transpositions(&self) -> &[Transposition] {
        &self.transpositions
    }
}

/// Routine that produced a [`RowEchelon`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EliminationKind {
    /// Gaussian elimination with partial pivoting. Pivot rows are left unscaled.
    PartialPivoting,
    /// Row reduction, skipping columns without a usable pivot. Pivots are scaled to $1$.
    RowReduction,
}

/// Row echelon form of a matrix, along with the row interchanges used to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct RowEchelon<E: RealField> {
    pub(crate) mat: Mat<E>,
    pub(crate) trace: PivotTrace,
    pub(crate) kind: EliminationKind,
    pub(crate) tolerance: E,
}

impl<E: RealField> RowEchelon<E> {
    /// Returns the matrix in row echelon form.
    #[inline]
    pub fn matrix(&self) -> &Mat<E> {
        &self.mat
    }

    /// Consumes `self` and returns the matrix in row echelon form.
    #[inline]
    pub fn into_matrix(self) -> Mat<E> {
        self.mat
    }

    /// Returns the row interchanges performed by forward elimination.
    #[inline]
    pub fn trace(&self) -> &PivotTrace {
        &self.trace
    }

    /// Returns the number of row interchanges performed by forward elimination.
    #[inline]
    pub fn transposition_count(&self) -> usize {
        self.trace.transposition_count()
    }

    /// Returns the routine that produced the row echelon form.
    #[inline]
    pub fn kind(&self) -> EliminationKind {
        self.kind
    }

    /// Returns the tolerance the row echelon form was computed with.
    #[inline]
    pub fn tolerance(&self) -> E {
        self.tolerance
    }

    /// Returns the pivot column of each row that has one, from top to bottom.
    pub fn pivot_cols(&self) -> Vec<usize> {
        (0..self.mat.nrows())
            .map_while(|i| leading_entry(self.mat.as_ref(), i, self.tolerance))
            .collect()
    }

    /// Returns the number of rows that have a pivot.
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivot_cols().len()
    }
}

/// This error signifies that Gaussian elimination with partial pivoting found no usable pivot on
/// the diagonal, which happens when the leading square block of the matrix is singular.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ZeroPivotError {
    /// Column in which every candidate pivot was negligible.
    pub column: usize,
}

impl core::fmt::Display for ZeroPivotError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for ZeroPivotError {}
