//! Dense matrices and matrix views.
//!
//! [`Mat`] owns its storage, while [`MatRef`] and [`MatMut`]
//! borrow it. Storage is column-major: each column is contiguous in memory and the column stride
//! is the number of rows.

use crate::RealField;
use reborrow::*;

/// Trait for types that can be converted to a matrix view.
///
/// This trait is implemented for types of the matrix family, like [`Mat`], [`MatRef`], and
/// [`MatMut`].
pub trait AsMatRef<E: RealField> {
    /// Convert to a matrix view.
    fn as_mat_ref(&self) -> MatRef<'_, E>;
}

impl<E: RealField> AsMatRef<E> for Mat<E> {
    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, E> {
        self.as_ref()
    }
}

impl<E: RealField> AsMatRef<E> for &Mat<E> {
    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, E> {
        (**self).as_ref()
    }
}

impl<E: RealField> AsMatRef<E> for MatRef<'_, E> {
    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, E> {
        *self
    }
}

impl<E: RealField> AsMatRef<E> for MatMut<'_, E> {
    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, E> {
        self.rb()
    }
}

/// Errors that can occur when building a matrix from untrusted row data.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CreationError {
    /// The input has no rows, or its rows have no columns.
    Empty,
    /// A row does not have the same length as the first row.
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// An entry is infinite or NaN.
    NonFinite {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },
}

impl core::fmt::Display for CreationError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for CreationError {}

mod matref;
pub use matref::{from_column_major_slice, MatRef};

mod matmut;
pub use matmut::MatMut;

mod matown;
pub use matown::Mat;
