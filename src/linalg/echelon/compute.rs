use super::{
    is_negligible, EchelonParams, EliminationKind, PivotTrace, PivotingStrategy, RowEchelon,
    ZeroPivotError,
};
use crate::{Mat, MatMut, MatRef, RealField};
use reborrow::*;

/// Reduces `matrix` to row echelon form in place, using Gaussian elimination with partial
/// pivoting.
///
/// For each diagonal position $k$, the row at or below $k$ with the largest magnitude in column
/// $k$ is brought to row $k$, then the entries below the pivot are eliminated. Pivot rows are not
/// scaled, so that the product of the diagonal of the result, signed by the parity of the
/// returned trace, is the determinant of a square input.
///
/// Residues whose magnitude is below `params.tolerance` are replaced by exact zeros.
///
/// # Errors
///
/// Returns an error if every candidate pivot of some column $k < \min(m, n)$ is negligible. The
/// contents of `matrix` are then unspecified.
pub fn gaussian_elimination_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    params: EchelonParams<E>,
) -> Result<PivotTrace, ZeroPivotError> {
    let mut matrix = matrix;
    let tolerance = params.tolerance;

    let m = matrix.nrows();
    let n = matrix.ncols();
    let size = Ord::min(m, n);

    let mut trace = PivotTrace::new();

    for k in 0..size {
        let mut imax = k;
        let mut max = E::zero();
        for i in k..m {
            let abs = matrix.read(i, k).abs();
            if abs > max {
                imax = i;
                max = abs;
            }
        }

        if is_negligible(max, tolerance) {
            return Err(ZeroPivotError { column: k });
        }

        if imax != k {
            matrix.swap_rows(k, imax);
            trace.push(k, imax);
        }

        let pivot = matrix.read(k, k);
        for i in k + 1..m {
            let x = matrix.read(i, k);
            if x == E::zero() {
                continue;
            }
            matrix.add_scaled_row(i, k, -(x / pivot), k + 1);
            matrix.write(i, k, E::zero());
            matrix.flush_negligible_row(i, tolerance);
        }
    }

    Ok(trace)
}

/// Returns the row at or below `row` holding the pivot of the column `col`, or `None` if every
/// candidate is negligible.
fn select_pivot<E: RealField>(
    matrix: MatRef<'_, E>,
    row: usize,
    col: usize,
    params: EchelonParams<E>,
) -> Option<usize> {
    let m = matrix.nrows();
    match params.pivoting {
        PivotingStrategy::LargestMagnitude => {
            let mut imax = row;
            let mut max = E::zero();
            for i in row..m {
                let abs = matrix.read(i, col).abs();
                if abs > max {
                    imax = i;
                    max = abs;
                }
            }
            (!is_negligible(max, params.tolerance)).then_some(imax)
        }
        PivotingStrategy::FirstNonNegligible => {
            (row..m).find(|&i| !is_negligible(matrix.read(i, col), params.tolerance))
        }
    }
}

/// Reduces `matrix` to row echelon form in place, scaling every pivot row so that its pivot is
/// exactly $1$.
///
/// The pivot of each column is chosen according to `params.pivoting`. Columns in which every
/// remaining entry is negligible are skipped, so this never fails, and handles singular, rank
/// deficient, and rectangular matrices alike.
///
/// Residues whose magnitude is below `params.tolerance` are replaced by exact zeros.
pub fn row_reduction_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    params: EchelonParams<E>,
) -> PivotTrace {
    let mut matrix = matrix;
    let tolerance = params.tolerance;

    let m = matrix.nrows();
    let n = matrix.ncols();

    let mut trace = PivotTrace::new();

    let mut row = 0;
    let mut col = 0;
    while row < m && col < n {
        let Some(pivot_row) = select_pivot(matrix.rb(), row, col, params) else {
            // no pivot in this column
            for i in row..m {
                matrix.write(i, col, E::zero());
            }
            col += 1;
            continue;
        };

        if pivot_row != row {
            matrix.swap_rows(row, pivot_row);
            trace.push(row, pivot_row);
        }

        let pivot = matrix.read(row, col);
        matrix.scale_row(row, pivot.recip());
        matrix.write(row, col, E::one());

        for i in row + 1..m {
            let x = matrix.read(i, col);
            if is_negligible(x, tolerance) {
                matrix.write(i, col, E::zero());
                continue;
            }
            matrix.add_scaled_row(i, row, -x, col + 1);
            matrix.write(i, col, E::zero());
            matrix.flush_negligible_row(i, tolerance);
        }

        row += 1;
        col += 1;
    }

    trace
}

/// Computes the row echelon form of `matrix` with Gaussian elimination and partial pivoting.
///
/// # Errors
///
/// See [`gaussian_elimination_in_place`].
pub fn gaussian_elimination<E: RealField>(
    matrix: MatRef<'_, E>,
    params: EchelonParams<E>,
) -> Result<RowEchelon<E>, ZeroPivotError> {
    let mut mat = matrix.to_owned();
    let trace = gaussian_elimination_in_place(mat.as_mut(), params)?;
    Ok(RowEchelon {
        mat,
        trace,
        kind: EliminationKind::PartialPivoting,
        tolerance: params.tolerance,
    })
}

/// Computes the row echelon form of `matrix` with row reduction, scaling the pivots to $1$.
///
/// See [`row_reduction_in_place`].
pub fn row_reduction<E: RealField>(matrix: MatRef<'_, E>, params: EchelonParams<E>) -> RowEchelon<E> {
    let mut mat = matrix.to_owned();
    let trace = row_reduction_in_place(mat.as_mut(), params);
    RowEchelon {
        mat,
        trace,
        kind: EliminationKind::RowReduction,
        tolerance: params.tolerance,
    }
}

/// Computes the row echelon form of `matrix`.
///
/// Gaussian elimination with partial pivoting is tried first. If it runs into a column without
/// a usable pivot on the diagonal, the matrix is reduced again from scratch with
/// [`row_reduction_in_place`], which can skip such columns. [`RowEchelon::kind`] tells which of
/// the two produced the result.
///
/// # Example
/// ```
/// use echelon::{
///     linalg::echelon::{compute::row_echelon, EliminationKind},
///     mat,
/// };
///
/// let a = mat![[0.0, 0.0], [0.0, 1.0_f64]];
/// let ref_ = row_echelon(a.as_ref(), Default::default());
///
/// assert_eq!(*ref_.matrix(), mat![[0.0, 1.0], [0.0, 0.0]]);
/// assert_eq!(ref_.transposition_count(), 1);
/// assert_eq!(ref_.kind(), EliminationKind::RowReduction);
/// ```
pub fn row_echelon<E: RealField>(matrix: MatRef<'_, E>, params: EchelonParams<E>) -> RowEchelon<E> {
    let mut mat: Mat<E> = matrix.to_owned();
    match gaussian_elimination_in_place(mat.as_mut(), params) {
        Ok(trace) => RowEchelon {
            mat,
            trace,
            kind: EliminationKind::PartialPivoting,
            tolerance: params.tolerance,
        },
        Err(ZeroPivotError { column }) => {
            log::debug!(
                target: "echelon",
                "no pivot on the diagonal in column {column} of a {}×{} matrix, falling back to row reduction",
                matrix.nrows(),
                matrix.ncols(),
            );
            mat.copy_from(matrix);
            let trace = row_reduction_in_place(mat.as_mut(), params);
            RowEchelon {
                mat,
                trace,
                kind: EliminationKind::RowReduction,
                tolerance: params.tolerance,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert,
        linalg::echelon::{
            tests::{assert_mat_approx_eq, exact_pivot_cols, rank_deficient_product, to_mat},
            validate::is_row_echelon,
        },
        mat,
    };
    use rand::prelude::*;

    fn cofactor_determinant(a: &Mat<f64>) -> f64 {
        let n = a.nrows();
        if n == 1 {
            return a.read(0, 0);
        }
        let mut det = 0.0;
        for j in 0..n {
            let minor = Mat::from_fn(n - 1, n - 1, |r, c| a.read(r + 1, if c < j { c } else { c + 1 }));
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * a.read(0, j) * cofactor_determinant(&minor);
        }
        det
    }

    #[test]
    fn row_reduction_to_echelon_form() {
        let cases: Vec<(Mat<f64>, Mat<f64>)> = vec![
            (
                mat![
                    [1.0, 2.0, 0.0],
                    [-1.0, 1.0, 1.0],
                    [1.0, 2.0, 3.0],
                ],
                mat![
                    [1.0, 2.0, 0.0],
                    [0.0, 1.0, 1.0 / 3.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [0.0, 2.0, 0.0],
                    [-1.0, 1.0, 1.0],
                    [1.0, 2.0, 3.0],
                ],
                mat![
                    [1.0, -1.0, -1.0],
                    [0.0, 1.0, 0.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [0.0, 2.0, 0.0],
                    [0.0, 1.0, 1.0],
                    [1.0, 2.0, 3.0],
                ],
                mat![
                    [1.0, 2.0, 3.0],
                    [0.0, 1.0, 1.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [1.0, 2.0, 0.0],
                    [0.0, 1.0, 1.0],
                    [0.0, 2.0, 3.0],
                ],
                mat![
                    [1.0, 2.0, 0.0],
                    [0.0, 1.0, 1.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [2.0, 5.0, 4.0],
                    [2.0, 4.0, 6.0],
                    [8.0, 7.0, 5.0],
                    [6.0, 4.0, 5.0],
                    [6.0, 2.0, 3.0],
                ],
                mat![
                    [1.0, 5.0 / 2.0, 2.0],
                    [0.0, 1.0, -2.0],
                    [0.0, 0.0, 1.0],
                    [0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 0.0, -2.0, 1.0, 0.0],
                    [0.0, -1.0, -3.0, 1.0, 3.0],
                    [-2.0, -1.0, 1.0, -1.0, 3.0],
                    [0.0, 3.0, 9.0, 0.0, -12.0],
                ],
                mat![
                    [1.0, 0.0, -2.0, 1.0, 0.0],
                    [0.0, 1.0, 3.0, -1.0, -3.0],
                    [0.0, 0.0, 0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [5.0, 4.0, 8.0],
                    [7.0, 7.0, 5.0],
                    [6.0, 2.0, 4.0],
                ],
                mat![
                    [1.0, 4.0 / 5.0, 8.0 / 5.0],
                    [0.0, 1.0, -31.0 / 7.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [2.0, 0.0, -1.0, 0.0, 0.0],
                    [1.0, 0.0, 0.0, -1.0, 0.0],
                    [3.0, 0.0, 0.0, -2.0, -1.0],
                    [0.0, 1.0, 0.0, 0.0, -2.0],
                    [0.0, 1.0, -1.0, 0.0, 0.0],
                ],
                mat![
                    [1.0, 0.0, -1.0 / 2.0, 0.0, 0.0],
                    [0.0, 1.0, 0.0, 0.0, -2.0],
                    [0.0, 0.0, 1.0, -4.0 / 3.0, -2.0 / 3.0],
                    [0.0, 0.0, 0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [2.0, -1.0, 4.0, 3.0, 2.0, 3.0, 4.0, 4.0],
                    [-1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 3.0],
                    [4.0, 3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 4.0],
                    [2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 2.0],
                    [3.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 3.0],
                    [3.0, 2.0, 3.0, 2.0, 1.0, 2.0, 1.0, 2.0],
                    [4.0, 3.0, 4.0, 3.0, 2.0, 1.0, 2.0, 2.0],
                    [4.0, 3.0, 4.0, 3.0, 2.0, 2.0, 2.0, 2.0],
                ],
                mat![
                    [1.0, -1.0 / 2.0, 2.0, 3.0 / 2.0, 1.0, 3.0 / 2.0, 2.0, 2.0],
                    [0.0, 1.0, 10.0 / 3.0, 7.0 / 3.0, 4.0 / 3.0, 7.0 / 3.0, 10.0 / 3.0, 10.0 / 3.0],
                    [0.0, 0.0, 1.0, 25.0 / 34.0, 13.0 / 34.0, 11.0 / 17.0, 31.0 / 34.0, 31.0 / 34.0],
                    [0.0, 0.0, 0.0, 1.0, -11.0 / 5.0, 18.0 / 5.0, 13.0 / 5.0, 13.0 / 5.0],
                    [0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0 / 2.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [0.0],
                ],
                mat![
                    [0.0],
                ],
            ),
            (
                mat![
                    [1.0],
                ],
                mat![
                    [1.0],
                ],
            ),
            (
                mat![
                    [5.0],
                ],
                mat![
                    [1.0],
                ],
            ),
            (
                mat![
                    [0.0, 0.0],
                    [0.0, 0.0],
                ],
                mat![
                    [0.0, 0.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [0.0, 0.0],
                    [0.0, 1.0],
                ],
                mat![
                    [0.0, 1.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 0.0],
                    [0.0, 0.0],
                ],
                mat![
                    [1.0, 0.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [0.0, 0.0],
                    [1.0, 0.0],
                ],
                mat![
                    [1.0, 0.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [0.0, 0.0],
                    [1.0, 1.0],
                ],
                mat![
                    [1.0, 1.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [0.0, 1.0],
                    [0.0, 1.0],
                ],
                mat![
                    [0.0, 1.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 0.0],
                    [1.0, 0.0],
                ],
                mat![
                    [1.0, 0.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 1.0],
                    [1.0, 1.0],
                ],
                mat![
                    [1.0, 1.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [2.0, 6.0],
                    [1.0, 3.0],
                ],
                mat![
                    [1.0, 3.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [3.0, 6.0],
                    [1.0, 2.0],
                ],
                mat![
                    [1.0, 2.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 2.0],
                    [1.0, 2.0],
                ],
                mat![
                    [1.0, 2.0],
                    [0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 2.0, 3.0],
                    [2.0, 3.0, 4.0],
                    [3.0, 4.0, 5.0],
                ],
                mat![
                    [1.0, 2.0, 3.0],
                    [0.0, 1.0, 2.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 2.0, 1.0],
                    [-2.0, -3.0, 1.0],
                    [3.0, 5.0, 0.0],
                ],
                mat![
                    [1.0, 2.0, 1.0],
                    [0.0, 1.0, 3.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, -1.0, 2.0],
                    [2.0, 1.0, 1.0],
                    [1.0, 1.0, 0.0],
                ],
                mat![
                    [1.0, -1.0, 2.0],
                    [0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 0.0, 1.0],
                    [0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0],
                ],
                mat![
                    [1.0, 0.0, 1.0],
                    [0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 2.0, 3.0],
                    [1.0, 3.0, 1.0],
                    [3.0, 4.0, 7.0],
                ],
                mat![
                    [1.0, 2.0, 3.0],
                    [0.0, 1.0, -2.0],
                    [0.0, 0.0, 1.0],
                ],
            ),
            (
                mat![
                    [1.0, 0.0, 0.0],
                    [-2.0, 0.0, 0.0],
                    [4.0, 6.0, 1.0],
                ],
                mat![
                    [1.0, 0.0, 0.0],
                    [0.0, 1.0, 1.0 / 6.0],
                    [0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [1.0, 1.0, 4.0, 1.0, 2.0],
                    [0.0, 1.0, 2.0, 1.0, 1.0],
                    [0.0, 0.0, 0.0, 1.0, 2.0],
                    [1.0, -1.0, 0.0, 0.0, 2.0],
                    [2.0, 1.0, 6.0, 0.0, 1.0],
                ],
                mat![
                    [1.0, 1.0, 4.0, 1.0, 2.0],
                    [0.0, 1.0, 2.0, 1.0, 1.0],
                    [0.0, 0.0, 0.0, 1.0, 2.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
            (
                mat![
                    [0.0, 1.0, 4.0, 2.0, 3.0, 3.0, 4.0, 4.0],
                    [1.0, 0.0, 3.0, 1.0, 2.0, 2.0, 3.0, 3.0],
                    [4.0, 3.0, 0.0, 2.0, 3.0, 3.0, 4.0, 4.0],
                    [3.0, 2.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0],
                    [2.0, 1.0, 2.0, 0.0, 1.0, 1.0, 2.0, 2.0],
                    [3.0, 2.0, 3.0, 1.0, 2.0, 0.0, 1.0, 2.0],
                    [4.0, 3.0, 4.0, 2.0, 3.0, 1.0, 0.0, 2.0],
                    [4.0, 3.0, 4.0, 2.0, 3.0, 2.0, 2.0, 0.0],
                ],
                mat![
                    [1.0, 0.0, 3.0, 1.0, 2.0, 2.0, 3.0, 3.0],
                    [0.0, 1.0, 4.0, 2.0, 3.0, 3.0, 4.0, 4.0],
                    [0.0, 0.0, 1.0, 1.0 / 3.0, 7.0 / 12.0, 7.0 / 12.0, 5.0 / 6.0, 5.0 / 6.0],
                    [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0],
                    [0.0, 0.0, 0.0, 0.0, 1.0, 5.0, 6.0, 4.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
        ];

        let params = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        for (a, expected) in cases {
            let ref_ = row_reduction(a.as_ref(), params);
            assert!(ref_.kind() == EliminationKind::RowReduction);
            assert_mat_approx_eq(ref_.matrix(), &expected);
            assert!(is_row_echelon(ref_.matrix().as_ref(), 1e-11));
        }
    }

    #[test]
    fn minuscule_residues_are_not_pivots() {
        // elimination leaves values around 1e-16 in the third column, which must not be selected
        // as pivots over the non-zero entries further down
        let a = mat![
            [0.0, 1.0, 4.0, 2.0, 3.0, 3.0, 4.0, 4.0],
            [1.0, 0.0, 3.0, 1.0, 2.0, 2.0, 3.0, 3.0],
            [4.0, 3.0, 0.0, 2.0, 3.0, 3.0, 4.0, 4.0],
            [3.0, 2.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0],
            [2.0, 1.0, 2.0, 0.0, 1.0, 1.0, 2.0, 2.0],
            [3.0, 2.0, 3.0, 1.0, 2.0, 0.0, 1.0, 2.0],
            [4.0, 3.0, 4.0, 2.0, 3.0, 1.0, 0.0, 2.0],
            [4.0, 3.0, 4.0, 2.0, 3.0, 2.0, 2.0, 0.0_f64],
        ];
        let first = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        let largest = EchelonParams::default().with_pivoting(PivotingStrategy::LargestMagnitude);

        for params in [first, largest] {
            let ref_ = row_reduction(a.as_ref(), params);
            for i in 0..8 {
                for j in 0..8 {
                    let x = ref_.matrix().read(i, j);
                    assert!(any(x == 0.0, x.abs() > 1e-11));
                }
            }
            assert!(ref_.rank() == 7);
        }
        assert!(row_reduction(a.as_ref(), first).transposition_count() == 4);
    }

    #[test]
    fn one_by_one() {
        let ref_ = row_echelon(mat![[5.0_f64]].as_ref(), Default::default());
        assert!(ref_.matrix() == &mat![[5.0]]);
        assert!(ref_.transposition_count() == 0);
        assert!(ref_.kind() == EliminationKind::PartialPivoting);

        let ref_ = row_reduction(mat![[5.0_f64]].as_ref(), Default::default());
        assert!(ref_.matrix() == &mat![[1.0]]);

        let ref_ = row_echelon(mat![[0.0_f64]].as_ref(), Default::default());
        assert!(ref_.matrix() == &mat![[0.0]]);
        assert!(ref_.transposition_count() == 0);
    }

    #[test]
    fn zero_matrix() {
        for (m, n) in [(1, 1), (1, 4), (4, 1), (3, 3), (2, 5), (5, 2)] {
            let a = Mat::<f64>::zeros(m, n);
            let ref_ = row_echelon(a.as_ref(), Default::default());
            assert!(ref_.matrix() == &a);
            assert!(ref_.transposition_count() == 0);
            assert!(ref_.rank() == 0);
        }
    }

    #[test]
    fn pivot_below_zero_row() {
        let a = mat![[0.0, 0.0], [0.0, 1.0_f64]];
        let ref_ = row_echelon(a.as_ref(), Default::default());
        assert!(ref_.matrix() == &mat![[0.0, 1.0], [0.0, 0.0]]);
        assert!(ref_.transposition_count() == 1);
        assert!(ref_.kind() == EliminationKind::RowReduction);
        assert!(ref_.pivot_cols() == vec![1]);
    }

    #[test]
    fn fractional_pivot_normalization() {
        let a = mat![[5.0, 4.0, 8.0], [7.0, 7.0, 5.0], [6.0, 2.0, 4.0_f64]];
        let params = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        let ref_ = row_reduction(a.as_ref(), params);
        assert_mat_approx_eq(
            ref_.matrix(),
            &mat![
                [1.0, 4.0 / 5.0, 8.0 / 5.0],
                [0.0, 1.0, -31.0 / 7.0],
                [0.0, 0.0, 1.0],
            ],
        );
    }

    #[test]
    fn partial_pivoting_picks_largest_magnitude() {
        let a = mat![[1.0, 2.0], [-3.0, 4.0], [2.0, 1.0_f64]];
        let ref_ = gaussian_elimination(a.as_ref(), Default::default()).unwrap();
        assert!(ref_.trace().transpositions()[0].pivot_row == 1);
        assert!(ref_.matrix().read(0, 0) == -3.0);
        assert!(ref_.matrix().read(1, 0) == 0.0);
        assert!(ref_.matrix().read(2, 0) == 0.0);
        assert!(is_row_echelon(ref_.matrix().as_ref(), 1e-11));
    }

    #[test]
    fn partial_pivoting_reports_missing_pivot() {
        let a = mat![[1.0, 1.0, 0.0], [2.0, 2.0, 1.0_f64]];
        assert!(gaussian_elimination(a.as_ref(), Default::default()) == Err(ZeroPivotError { column: 1 }));

        let ref_ = row_echelon(a.as_ref(), Default::default());
        assert!(ref_.kind() == EliminationKind::RowReduction);
        assert!(ref_.pivot_cols() == vec![0, 2]);
    }

    #[test]
    fn tall_matrix_with_full_column_rank() {
        let a = mat![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0_f64]];
        let ref_ = row_echelon(a.as_ref(), Default::default());
        assert!(ref_.kind() == EliminationKind::PartialPivoting);
        assert!(ref_.transposition_count() == 2);
        assert!(ref_.matrix().as_ref().row_iter(2).all(|x| x == 0.0));
        assert!(ref_.rank() == 2);
    }

    #[test]
    fn random_matrices_reach_echelon_form() {
        let rng = &mut StdRng::seed_from_u64(0);
        for (m, n) in [
            (1, 1),
            (2, 2),
            (4, 4),
            (2, 4),
            (4, 2),
            (10, 10),
            (3, 20),
            (20, 3),
            (40, 40),
        ] {
            let a = Mat::from_fn(m, n, |_, _| rng.gen::<f64>());
            let ref_ = row_echelon(a.as_ref(), Default::default());
            assert!(ref_.kind() == EliminationKind::PartialPivoting);
            assert!(is_row_echelon(ref_.matrix().as_ref(), ref_.tolerance()));
            assert!(ref_.rank() == Ord::min(m, n));

            let ref_ = row_reduction(a.as_ref(), Default::default());
            assert!(is_row_echelon(ref_.matrix().as_ref(), ref_.tolerance()));
        }
    }

    #[test]
    fn largest_magnitude_pivot_ignores_residues() {
        // first non-negligible pivoting leaves a residue above the tolerance in each of these,
        // and promotes it to a pivot
        let cases: Vec<Vec<Vec<i128>>> = vec![
            vec![
                vec![-14, 43, -44, -47, 1, 37],
                vec![9, 16, -28, -31, -22, 6],
                vec![43, 23, -45, -71, -36, -1],
                vec![34, 55, -50, -104, 22, 34],
                vec![-26, -16, -5, 36, 42, 39],
            ],
            vec![
                vec![13, -20, 65, -2, -9, 53],
                vec![56, 12, 45, 79, -32, -35],
                vec![64, 24, 27, 99, -36, -67],
                vec![-68, -48, -54, 62, 92, -106],
            ],
            vec![
                vec![-49, 31, -54, 47, 29, 114],
                vec![27, -17, 26, -20, -21, -48],
                vec![16, 36, -6, -8, 18, -1],
                vec![43, 131, 30, 43, 58, 78],
                vec![8, 24, -40, -52, 29, -58],
                vec![-21, 47, -110, -32, 40, 30],
            ],
        ];

        let first = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        for rows in cases {
            let a = to_mat(&rows);
            let expected = exact_pivot_cols(&rows);

            let ref_ = row_echelon(a.as_ref(), Default::default());
            assert!(ref_.kind() == EliminationKind::RowReduction);
            assert!(ref_.pivot_cols() == expected);

            assert!(row_reduction(a.as_ref(), first).rank() == expected.len() + 1);
        }
    }

    #[test]
    fn row_reduction_picks_largest_magnitude() {
        let a = mat![[1.0, 2.0], [-3.0, 4.0_f64]];

        let ref_ = row_reduction(a.as_ref(), Default::default());
        assert!(ref_.transposition_count() == 1);
        assert_mat_approx_eq(ref_.matrix(), &mat![[1.0, -4.0 / 3.0], [0.0, 1.0]]);

        let params = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        let ref_ = row_reduction(a.as_ref(), params);
        assert!(ref_.transposition_count() == 0);
        assert_mat_approx_eq(ref_.matrix(), &mat![[1.0, 2.0], [0.0, 1.0]]);
    }

    #[test]
    fn rank_matches_exact_integer_rank() {
        let rng = &mut StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            let m = rng.gen_range(1..=5);
            let n = rng.gen_range(1..=5);
            let r = rng.gen_range(0..=Ord::min(m, n));
            let rows = rank_deficient_product(rng, m, n, r);
            let a = to_mat(&rows);

            let ref_ = row_echelon(a.as_ref(), Default::default());
            assert!(is_row_echelon(ref_.matrix().as_ref(), ref_.tolerance()));
            assert!(ref_.pivot_cols() == exact_pivot_cols(&rows));
        }
    }

    #[test]
    fn transposition_parity_matches_determinant_sign() {
        let rng = &mut StdRng::seed_from_u64(0);
        for n in 1..=6 {
            for _ in 0..20 {
                let a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>() * 2.0 - 1.0);
                let ref_ = gaussian_elimination(a.as_ref(), Default::default()).unwrap();

                let mut det = (0..n).map(|i| ref_.matrix().read(i, i)).product::<f64>();
                if ref_.trace().is_odd() {
                    det = -det;
                }
                let expected = cofactor_determinant(&a);
                assert!((det - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn custom_tolerance_is_respected() {
        // with a loose tolerance the 1e-8 entry is not a usable pivot
        let a = mat![[1e-8, 1.0], [1.0, 1.0_f64]];
        let loose = EchelonParams::default().with_tolerance(1e-6);

        let ref_ = row_reduction(a.as_ref(), loose.with_pivoting(PivotingStrategy::FirstNonNegligible));
        assert!(ref_.transposition_count() == 1);
        assert!(is_row_echelon(ref_.matrix().as_ref(), loose.tolerance));

        let params = EchelonParams::default().with_pivoting(PivotingStrategy::FirstNonNegligible);
        let ref_ = row_reduction(a.as_ref(), params);
        assert!(ref_.transposition_count() == 0);
        assert!(is_row_echelon(ref_.matrix().as_ref(), 1e-11));
    }
}
