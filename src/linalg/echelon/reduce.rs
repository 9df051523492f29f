use super::{
    compute::row_echelon, is_negligible, leading_entry, validate::is_row_echelon, EchelonParams,
    RowEchelon,
};
use crate::{debug_assert, Mat, MatMut, MatRef, RealField};
use reborrow::*;

/// Reduces `matrix`, which must be in row echelon form, to reduced row echelon form in place.
///
/// Rows are processed from the bottom up. Each pivot row is scaled so that its pivot is exactly
/// $1$, then its pivot column is eliminated from every other row. Residues whose magnitude is
/// below `params.tolerance` are replaced by exact zeros.
///
/// # Panics
/// Panics in debug mode if `matrix` is not in row echelon form.
pub fn reduced_row_echelon_in_place<E: RealField>(matrix: MatMut<'_, E>, params: EchelonParams<E>) {
    let mut matrix = matrix;
    let tolerance = params.tolerance;
    debug_assert!(is_row_echelon(matrix.rb(), tolerance));

    let m = matrix.nrows();

    for i in (0..m).rev() {
        let Some(col) = leading_entry(matrix.rb(), i, tolerance) else {
            continue;
        };

        let pivot = matrix.read(i, col);
        if !is_negligible(pivot - E::one(), tolerance) {
            matrix.scale_row(i, pivot.recip());
        }
        matrix.write(i, col, E::one());

        for k in 0..m {
            if k == i {
                continue;
            }
            let x = matrix.read(k, col);
            if is_negligible(x, tolerance) {
                matrix.write(k, col, E::zero());
                continue;
            }
            matrix.add_scaled_row(k, i, -x, col);
            matrix.write(k, col, E::zero());
            matrix.flush_negligible_row(k, tolerance);
        }
    }
}

/// Computes the reduced row echelon form from an existing row echelon form, without repeating
/// the forward elimination. Entries are compared against the tolerance the row echelon form was
/// computed with.
pub fn reduced_row_echelon<E: RealField>(row_echelon: &RowEchelon<E>) -> Mat<E> {
    let params = EchelonParams::default().with_tolerance(row_echelon.tolerance());
    let mut mat = row_echelon.matrix().clone();
    reduced_row_echelon_in_place(mat.as_mut(), params);
    mat
}

/// Computes the reduced row echelon form of `matrix`.
///
/// # Example
/// ```
/// use echelon::{linalg::echelon::reduce::reduced_row_echelon_from, mat};
///
/// let a = mat![[5.0, 4.0, 8.0], [7.0, 7.0, 5.0], [6.0, 2.0, 4.0_f64]];
/// let rref = reduced_row_echelon_from(a.as_ref(), Default::default());
///
/// assert_eq!(rref, echelon::Mat::identity(3, 3));
/// ```
pub fn reduced_row_echelon_from<E: RealField>(matrix: MatRef<'_, E>, params: EchelonParams<E>) -> Mat<E> {
    let mut mat = row_echelon(matrix, params).into_matrix();
    reduced_row_echelon_in_place(mat.as_mut(), params);
    mat
}
