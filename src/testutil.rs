//! Random test-basis generators, gated to test builds only.
//!
//! Each function builds a deterministic basis of a shape known to stress
//! a particular part of the reduction pipeline, from a seeded `StdRng`
//! and a handful of size parameters rather than from a stored fixture.

#![cfg(test)]

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::algebra::{Int, IntMatrix};

/// A deterministic `NTRU`-like basis: the 2n×2n matrix
/// `[[I, H], [0, qI]]` where `H` is a random circulant-ish matrix mod `q`.
/// Mirrors the shape used by lattice-based cryptanalysis test suites.
pub fn ntru_like(n: usize, q: i64, bits: u32, seed: u64) -> IntMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let h: Vec<i64> = (0..n).map(|_| rng.gen_range(0..(1i64 << bits)) % q).collect();

    let mut rows = vec![vec![Int::from(0); 2 * n]; 2 * n];
    for i in 0..n {
        rows[i][i] = Int::from(1);
        for j in 0..n {
            rows[i][n + j] = Int::from(h[(j + n - i) % n]);
        }
    }
    for i in 0..n {
        rows[n + i][n + i] = Int::from(q);
    }

    IntMatrix::from_matrix(rows)
}

/// A random integer-relation-style matrix: the identity bordered by a
/// column of scaled random entries, with caller-chosen dimension and
/// scale.
pub fn relation_like(n: usize, scale: i64, seed: u64) -> IntMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = vec![vec![Int::from(0); n]; n];
    for i in 0..n - 1 {
        rows[i][i] = Int::from(1);
        rows[i][n - 1] = Int::from(rng.gen_range(-scale..scale));
    }
    rows[n - 1][n - 1] = Int::from(scale);
    IntMatrix::from_matrix(rows)
}

/// A simultaneous-Diophantine-style basis: large outer entries paired with
/// small random inner entries.
pub fn simultaneous_diophantine(n: usize, outer_bits: u32, inner_bits: u32, seed: u64) -> IntMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let outer = Int::from(1) << outer_bits;
    let mut rows = vec![vec![Int::from(0); n]; n];
    rows[0][0] = outer;
    for i in 1..n {
        rows[i][0] = Int::from(rng.gen_range(0..(1i64 << inner_bits.min(62))));
        rows[i][i] = Int::from(1);
    }
    IntMatrix::from_matrix(rows)
}

/// An Ajtai-style worst-case basis, parameterized by `alpha`: row `i` has
/// diagonal entry `2^{(n-i)*alpha_scaled}` with small random perturbation
/// below the diagonal, producing exponentially growing entry sizes
/// typical of Ajtai's construction.
pub fn ajtai_like(n: usize, alpha: f64, seed: u64) -> IntMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = vec![vec![Int::from(0); n]; n];
    for i in 0..n {
        let bits = ((n - i) as f64 * alpha * 8.0).round().max(1.0) as u32;
        rows[i][i] = Int::from(1) << bits;
        for j in 0..i {
            rows[i][j] = Int::from(rng.gen_range(0..(1i64 << bits.min(62))));
        }
    }
    IntMatrix::from_matrix(rows)
}
