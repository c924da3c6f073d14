//! Exact-integer algebra: the `Vector`/`Matrix` containers the lattice basis
//! `B` and transform accumulator `U` are built from.

mod matrix;
mod scalar;
mod vector;

pub use matrix::Matrix;
pub use scalar::Coefficient;
pub use vector::Vector;

/// The exact integer type every basis, Gram matrix and transform in this
/// crate is built from.
pub type Int = rug::Integer;

/// A lattice basis, transform accumulator, or Gram matrix.
pub type IntMatrix = Matrix<Int>;

/// One row of a basis, or one entry column of a Gram matrix.
pub type IntVector = Vector<Int>;
