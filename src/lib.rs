//! `echelon` reduces dense real matrices to row echelon form (REF) and reduced row echelon form
//! (RREF), and checks whether a matrix already is in one of these forms.
//!
//! The forward elimination that produces the REF also reports the row interchanges it performed,
//! which is what determinant computations need for their sign. The RREF is derived from the REF,
//! and is unique for a given matrix regardless of the pivoting choices made on the way.
//!
//! Every "is this entry zero" decision goes through a single test against a configurable
//! tolerance (see [`linalg::echelon::is_negligible`]), so that floating point residues left over
//! by earlier elimination steps are never mistaken for pivots.
//!
//! # Example
//! ```
//! use echelon::{mat, Echelon};
//!
//! let a = Echelon::new(mat![
//!     [1.0, 2.0, 3.0],
//!     [2.0, 3.0, 4.0],
//!     [3.0, 4.0, 5.0_f64],
//! ]);
//!
//! let rref = a.reduced_row_echelon();
//! assert_eq!(*rref, mat![[1.0, 0.0, -1.0], [0.0, 1.0, 2.0], [0.0, 0.0, 0.0]]);
//! assert_eq!(a.rank(), 2);
//! assert!(echelon::linalg::echelon::validate::is_reduced_row_echelon(
//!     rref.as_ref(),
//!     1e-11
//! ));
//! ```

#![allow(clippy::type_complexity)]

use equator::{assert, debug_assert};

pub mod field;
pub mod linalg;
pub mod mat;

pub use field::RealField;
pub use linalg::{
    echelon::{EchelonParams, PivotingStrategy},
    solvers::Echelon,
};
pub use mat::{Mat, MatMut, MatRef};
pub use reborrow;

/// Creates a [`Mat`] containing the arguments, given row by row.
///
/// ```
/// use echelon::mat;
///
/// let matrix = mat![
///     [1.0, 5.0, 9.0],
///     [2.0, 6.0, 10.0],
///     [3.0, 7.0, 11.0],
///     [4.0, 8.0, 12.0f64],
/// ];
///
/// assert_eq!(matrix.read(0, 0), 1.0);
/// assert_eq!(matrix.read(1, 0), 2.0);
/// assert_eq!(matrix.read(2, 0), 3.0);
/// assert_eq!(matrix.read(3, 0), 4.0);
///
/// assert_eq!(matrix.read(0, 1), 5.0);
/// assert_eq!(matrix.read(1, 1), 6.0);
/// assert_eq!(matrix.read(2, 1), 7.0);
/// assert_eq!(matrix.read(3, 1), 8.0);
///
/// assert_eq!(matrix.read(0, 2), 9.0);
/// assert_eq!(matrix.read(1, 2), 10.0);
/// assert_eq!(matrix.read(2, 2), 11.0);
/// assert_eq!(matrix.read(3, 2), 12.0);
/// ```
#[macro_export]
macro_rules! mat {
    () => {
        {
            compile_error!("number of columns in the matrix is ambiguous");
        }
    };

    ($([$($v:expr),* $(,)?] ),* $(,)?) => {
        {
            let data = [$([$($v),*]),*];
            let nrows = data.len();
            let ncols = data[0].len();

            $crate::mat::Mat::from_fn(nrows, ncols, |i, j| data[i][j])
        }
    };
}
