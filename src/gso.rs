//! Gram-Schmidt / scalar-product caches held for the duration of a
//! reduction.
//!
//! The stale-sentinel tables of the reference implementation this crate
//! is descended from (`NaN` for the float cache, a sentinel word for the
//! integer cache) become `Option<F>` here: recomputing from scratch when
//! absent is the only part of the contract that matters.
//!
//! Row permutations (swap/insert in the outer driver) are applied here as
//! plain `Vec` rotations of whole cache rows, then the moved rows'
//! scalar-product entries are marked stale so the next Babai pass
//! recomputes them from the (already-permuted) basis: a full recompute
//! of the touched rows/columns is the simplest implementation that's
//! obviously correct, in place of a cache-local permutation scratch
//! buffer.

use crate::fraction::GsoScalar;

pub struct GsoCache<F: GsoScalar> {
    ctx: F::Ctx,
    d: usize,

    /// `mu[i][j]`, valid for `j < i`.
    pub mu: Vec<Vec<F>>,

    /// `r[i][j]`, valid for `j <= i`; `r[i][i]` is the squared norm of the
    /// i-th Gram-Schmidt vector.
    pub r: Vec<Vec<F>>,

    /// Cached approximate/exact scalar products `<b_i, b_j>`, lazily
    /// populated; `None` means stale.
    sp: Vec<Vec<Option<F>>>,

    /// Index each row was demoted to by the most recent swap, used to
    /// resume Babai from the earliest possibly-invalidated column.
    pub alpha: Vec<usize>,
}

impl<F: GsoScalar> GsoCache<F> {
    pub fn new(d: usize, ctx: F::Ctx) -> Self {
        Self {
            ctx,
            d,
            mu: vec![vec![F::zero(ctx); d]; d],
            r: vec![vec![F::zero(ctx); d]; d],
            sp: vec![vec![None; d]; d],
            // No row has ever been swapped yet, so every row's GSO must be
            // computed in full on its first Babai call.
            alpha: vec![0; d],
        }
    }

    pub fn ctx(&self) -> F::Ctx {
        self.ctx
    }

    pub fn dim(&self) -> usize {
        self.d
    }

    /// Fetch `<b_i, b_j>` from the cache, computing and storing it via
    /// `compute` if stale.
    pub fn scalar_product(&mut self, i: usize, j: usize, compute: impl FnOnce() -> F) -> F {
        if self.sp[i][j].is_none() {
            let v = compute();
            self.sp[i][j] = Some(v.clone());
            self.sp[j][i] = Some(v);
        }
        self.sp[i][j].clone().unwrap()
    }

    /// Mark `<b_i, ->` and `<-, b_i>` stale for all tracked columns up to
    /// `upto`.
    pub fn invalidate_row(&mut self, i: usize, upto: usize) {
        for j in 0..upto.min(self.d) {
            self.sp[i][j] = None;
            self.sp[j][i] = None;
        }
    }

    /// Move row `i` to just before row `j`, the same shift semantics as
    /// `Matrix::insert`, applied to every cache row.
    ///
    /// Every scalar-product entry touched by the permutation is then
    /// marked stale rather than shuffled in place: a full recompute of
    /// the affected rows/columns is the simplest implementation that's
    /// obviously correct.
    pub fn insert(&mut self, i: usize, j: usize) {
        let mu_row = self.mu.remove(i);
        self.mu.insert(j, mu_row);
        let r_row = self.r.remove(i);
        self.r.insert(j, r_row);
        let sp_row = self.sp.remove(i);
        self.sp.insert(j, sp_row);
        let alpha_i = self.alpha.remove(i);
        self.alpha.insert(j, alpha_i);

        let lo = i.min(j);
        let hi = i.max(j);
        for row in lo..=hi {
            self.invalidate_row(row, self.d);
            self.alpha[row] = lo;
        }
        for row in 0..self.d {
            for col in lo..=hi {
                self.sp[row][col] = None;
            }
        }
    }
}

/// The largest run of trailing-zero columns shared by every row, used to
/// clamp the Babai working width.
pub fn trailing_zero_run(basis: &crate::algebra::IntMatrix) -> usize {
    let (d, n) = basis.dimensions();
    let mut shift = 0usize;
    for i in 0..d {
        let row = &basis[i];
        let mut j = n;
        while j > i + shift + 1 && row[j - 1] == rug::Integer::from(0) {
            j -= 1;
        }
        let candidate = n.saturating_sub(j);
        if candidate > shift {
            shift = candidate;
        }
    }
    shift
}
