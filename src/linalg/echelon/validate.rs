use super::{is_negligible, leading_entry};
use crate::{MatRef, RealField};

/// Returns `true` if `matrix` is in row echelon form, treating entries whose magnitude is below
/// `tolerance` as zeros.
///
/// That is, the leading entry of every row lies strictly to the right of the leading entry of
/// the row above, and rows without a leading entry are all at the bottom. Pivots are not
/// required to be $1$.
pub fn is_row_echelon<E: RealField>(matrix: MatRef<'_, E>, tolerance: E) -> bool {
    let mut prev = None;
    let mut seen_zero_row = false;

    for i in 0..matrix.nrows() {
        match leading_entry(matrix, i, tolerance) {
            None => seen_zero_row = true,
            Some(j) => {
                if seen_zero_row {
                    return false;
                }
                if let Some(prev) = prev {
                    if j <= prev {
                        return false;
                    }
                }
                prev = Some(j);
            }
        }
    }
    true
}

/// Returns `true` if `matrix` is in reduced row echelon form, treating entries whose magnitude
/// is below `tolerance` as zeros.
///
/// In addition to the requirements of [`is_row_echelon`], every leading entry must be within
/// `tolerance` of $1$, and be the only non-negligible entry in its column.
pub fn is_reduced_row_echelon<E: RealField>(matrix: MatRef<'_, E>, tolerance: E) -> bool {
    if !is_row_echelon(matrix, tolerance) {
        return false;
    }

    for i in 0..matrix.nrows() {
        let Some(j) = leading_entry(matrix, i, tolerance) else {
            break;
        };
        if !is_negligible(matrix.read(i, j) - E::one(), tolerance) {
            return false;
        }
        if (0..matrix.nrows()).any(|k| k != i && !is_negligible(matrix.read(k, j), tolerance)) {
            return false;
        }
    }
    true
}
