use std::{
    cmp::PartialOrd,
    fmt::Debug,
    iter::Sum,
    ops::{Add, Mul, Sub, SubAssign},
};

/// Bound satisfied by the exact coefficients of a lattice basis or Gram
/// matrix. This crate instantiates it only with `rug::Integer` (the basis
/// is always held as exact arbitrary-precision integers), but the bound
/// is kept generic so `Vector` and `Matrix` don't need to know about
/// `rug` directly.
pub trait Coefficient:
    From<i32>
    + PartialEq
    + PartialOrd<Self>
    + Clone
    + Debug
    + Default
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + Sum<Self>
{
}

impl<T> Coefficient for T where
    T: From<i32>
        + PartialEq
        + PartialOrd<Self>
        + Clone
        + Debug
        + Default
        + for<'a> Add<&'a Self, Output = Self>
        + for<'a> Sub<&'a Self, Output = Self>
        + for<'a> SubAssign<&'a Self>
        + for<'a> Mul<&'a Self, Output = Self>
        + Sum<Self>
{
}
