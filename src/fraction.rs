//! The "Fraction" arithmetic used by the Gram-Schmidt caches (`mu`, `r`,
//! `s`).
//!
//! One generic Babai body runs against three precision tiers ("fast
//! double", "heuristic double", "high precision"). The first two share
//! the `f64` representation and differ only in how their dot products
//! are evaluated (see `babai::BabaiFlavour`); the third is an
//! arbitrary-precision `rug::Float` at a caller-chosen working precision.
//! `GsoScalar` is the one interface the generic kernel needs.

use rug::Float;
use std::fmt;

use crate::algebra::Int;

/// A scalar usable for Gram-Schmidt coefficients.
///
/// `Ctx` carries whatever a type needs to construct fresh instances: `()`
/// for `f64`, the working precision in bits for [`HighPrec`].
pub trait GsoScalar: Clone + fmt::Debug + PartialOrd<Self> {
    type Ctx: Copy;

    fn zero(ctx: Self::Ctx) -> Self;
    fn from_int(n: &Int, ctx: Self::Ctx) -> Self;
    fn from_f64(v: f64, ctx: Self::Ctx) -> Self;
    fn to_f64(&self) -> f64;
    /// Round to the nearest integer (ties away from zero, as `round()` / GMP's `mpfr_round`).
    fn round_to_int(&self) -> Int;
    fn abs(&self) -> Self;
    fn is_zero(&self) -> bool;
    /// Recover the context a value was built with, so it can be propagated
    /// without threading a separate parameter everywhere.
    fn ctx(&self) -> Self::Ctx;

    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn div(&self, other: &Self) -> Self;
}

impl GsoScalar for f64 {
    type Ctx = ();

    fn zero(_ctx: ()) -> Self {
        0.0
    }

    fn from_int(n: &Int, _ctx: ()) -> Self {
        n.to_f64()
    }

    fn from_f64(v: f64, _ctx: ()) -> Self {
        v
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn round_to_int(&self) -> Int {
        Int::from_f64(self.round()).unwrap_or_else(|| Int::from(0))
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn ctx(&self) -> Self::Ctx {}

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    fn div(&self, other: &Self) -> Self {
        self / other
    }
}

/// Arbitrary-precision GSO scalar, backed by `rug::Float` at a working
/// precision chosen by the caller.
#[derive(Clone, Debug)]
pub struct HighPrec(pub Float);

impl PartialEq for HighPrec {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for HighPrec {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl GsoScalar for HighPrec {
    /// Working precision, in bits.
    type Ctx = u32;

    fn zero(ctx: u32) -> Self {
        HighPrec(Float::with_val(ctx, 0))
    }

    fn from_int(n: &Int, ctx: u32) -> Self {
        HighPrec(Float::with_val(ctx, n))
    }

    fn from_f64(v: f64, ctx: u32) -> Self {
        HighPrec(Float::with_val(ctx, v))
    }

    fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    fn round_to_int(&self) -> Int {
        self.0.to_integer().unwrap_or_else(|| Int::from(0))
    }

    fn abs(&self) -> Self {
        HighPrec(self.0.clone().abs())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn ctx(&self) -> u32 {
        self.0.prec()
    }

    fn add(&self, other: &Self) -> Self {
        HighPrec(self.0.clone() + &other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        HighPrec(self.0.clone() - &other.0)
    }

    fn mul(&self, other: &Self) -> Self {
        HighPrec(self.0.clone() * &other.0)
    }

    fn div(&self, other: &Self) -> Self {
        HighPrec(self.0.clone() / &other.0)
    }
}
