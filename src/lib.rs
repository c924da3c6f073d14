//! A Rust implementation of the floating-point L² variant of the
//! Lenstra-Lenstra-Lovász lattice basis reduction algorithm.
//!
//! # Introduction
//!
//! `lll-rs` reduces an integer lattice basis to one whose vectors are
//! short and nearly orthogonal, as measured by the Lovász δ/η parameters.
//! The reduction runs a size-reduction sub-procedure ("Babai") at one of
//! three numerical precisions, escalating automatically on failure, and
//! never returns an unreduced basis to the caller.
//!
//! # Examples
//!
//! ```rust
//! use lll_rs::{reduce, IntMatrix, Int, LllParams};
//!
//! let mut basis = IntMatrix::from_matrix(vec![
//!     vec![Int::from(201), Int::from(37)],
//!     vec![Int::from(17), Int::from(0)],
//! ]);
//!
//! reduce(&mut basis, &LllParams::default());
//! ```

extern crate rug;

pub mod algebra;
pub mod babai;
pub mod driver;
pub mod error;
pub mod fraction;
pub mod gso;
pub mod params;
pub mod ultra;
pub mod verify;
pub mod wrapper;

#[cfg(test)]
mod testutil;

pub use algebra::{Int, IntMatrix, IntVector};
pub use error::{LllError, Result};
pub use params::{GramVariant, LllParams, Representation};

/// Reduces `basis` in place to an LLL-δ-reduced basis.
///
/// Internally escalates from fast double, through heuristic double, to
/// arbitrary precision, verifying the result at each tier; this function
/// itself never fails.
pub fn reduce(basis: &mut IntMatrix, params: &LllParams) {
    wrapper::reduce(basis, None, params, None);
}

/// As [`reduce`], additionally tracking the unimodular transform: on
/// return, `transform · basis_in == basis_out`.
///
/// `transform` must start as the identity matrix of the same dimension as
/// `basis`; this is a caller responsibility (a shape mismatch between
/// `basis` and `transform` is a programming error, not a recoverable
/// condition).
pub fn reduce_tracked(basis: &mut IntMatrix, transform: &mut IntMatrix, params: &LllParams) {
    wrapper::reduce(basis, Some(transform), params, None);
}

/// As [`reduce`], but drops trailing rows whose squared Gram-Schmidt norm
/// falls below `gs_bound` as they're discovered. Returns the number of
/// surviving rows; the caller is responsible for truncating `basis` to
/// that row count if a smaller matrix is wanted.
pub fn reduce_with_removal(basis: &mut IntMatrix, params: &LllParams, gs_bound: f64) -> usize {
    wrapper::reduce(basis, None, params, Some(gs_bound)).newd
}

/// Reduces a basis whose entries are far wider than any working
/// precision via the ultra-LLL driver: truncates to a working shadow,
/// reduces it, and lifts the discovered transform back onto the
/// full-precision basis, using the default truncation target.
pub fn reduce_ultra(basis: &mut IntMatrix, params: &LllParams) {
    ultra::reduce(basis, None, params, ultra::DEFAULT_NEW_SIZE);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::babai::{FastDouble, HeuristicDouble};
    use crate::driver;
    use crate::gso::GsoCache;

    #[test]
    fn reduce_shrinks_a_bad_basis() {
        let mut basis = IntMatrix::from_matrix(vec![
            vec![Int::from(1) << 1000, Int::from(0), Int::from(0)],
            vec![Int::from(0), Int::from(1) << 500, Int::from(0)],
            vec![Int::from(154) << 400, Int::from(35) << 200, Int::from(1)],
        ]);
        let params = LllParams::default();
        reduce(&mut basis, &params);
        assert!(verify::is_reduced(&basis, &params, None));
    }

    #[test]
    fn reduce_tracked_preserves_the_lattice() {
        let basis_in = IntMatrix::from_matrix(vec![
            vec![Int::from(201), Int::from(37)],
            vec![Int::from(17), Int::from(0)],
        ]);
        let mut basis = IntMatrix::from_matrix(vec![
            vec![Int::from(201), Int::from(37)],
            vec![Int::from(17), Int::from(0)],
        ]);
        let mut transform = IntMatrix::identity(2);
        let params = LllParams::new(0.75, 0.81);

        reduce_tracked(&mut basis, &mut transform, &params);

        let reconstructed = transform.mul(&basis_in);
        assert!(reconstructed == basis);
    }

    #[test]
    fn size_reduction_kernel_reduces_directly() {
        let mut basis = IntMatrix::from_matrix(vec![
            vec![Int::from(201), Int::from(37)],
            vec![Int::from(17), Int::from(0)],
        ]);
        let params = LllParams::new(0.75, 0.81);
        let mut cache: GsoCache<f64> = GsoCache::new(2, ());

        let outcome = driver::reduce_basis(&FastDouble, &HeuristicDouble, &mut basis, &mut cache, &params);
        assert!(outcome.is_ok());
    }
}
