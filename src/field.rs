//! Scalar types the reduction routines operate on.

use core::fmt::Debug;
use num_traits::Float;

/// Unit of a real matrix.
///
/// Implemented for [`f32`] and [`f64`]. Every routine of this crate decides whether an entry is
/// zero by comparing its magnitude against a tolerance, and
/// [`RealField::default_tolerance`] provides the value used when none is configured.
pub trait RealField: Float + Debug + Send + Sync + 'static {
    /// Magnitude below which a value is treated as zero when selecting pivots and checking
    /// echelon forms.
    fn default_tolerance() -> Self;
}

impl RealField for f64 {
    #[inline(always)]
    fn default_tolerance() -> Self {
        1e-11
    }
}

impl RealField for f32 {
    #[inline(always)]
    fn default_tolerance() -> Self {
        1e-5
    }
}
