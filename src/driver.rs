//! The LLL outer driver: κ-advancement, the Lovász test, swap/insert, and
//! the with-removal early-termination variant.

use log::debug;

use crate::{
    algebra::IntMatrix,
    babai::{self, BabaiFlavour},
    error::{LllError, Result},
    fraction::GsoScalar,
    gso::{self, GsoCache},
    params::{GramVariant, LllParams, Representation},
};

/// Outcome of a reduction at a single precision tier.
pub struct Reduction {
    /// Surviving row count. Equals the full row count unless a removal
    /// bound narrowed the working dimension.
    pub newd: usize,
}

/// Runs one specific-precision LLL reduction to completion.
///
/// `removal_bound`, when present, enables the with-removal variant: rows
/// whose Gram-Schmidt norm falls below it are dropped from the working
/// dimension as the driver encounters them, and trimmed from the tail
/// once the main loop finishes.
///
/// # Errors
/// [`LllError::NumericalFailure`] if Babai cannot make progress at this
/// precision (propagated from [`babai::size_reduce`], both the given
/// flavour and its fallback); [`LllError::IterationCapExceeded`] if the
/// iteration budget proven sufficient for a terminating reduction is
/// exhausted.
pub fn reduce<F: GsoScalar, Fl: BabaiFlavour<F>, FlFallback: BabaiFlavour<F>>(
    primary: &Fl,
    fallback: &FlFallback,
    basis: &mut IntMatrix,
    mut transform: Option<&mut IntMatrix>,
    cache: &mut GsoCache<F>,
    params: &LllParams,
    removal_bound: Option<&F>,
) -> Result<Reduction> {
    assert!(
        params.rep == Representation::ZBasis && params.gram == GramVariant::Approx,
        "GRAM representation and the EXACT gram variant are not implemented; \
         construct LllParams with the default ZBasis/Approx combination"
    );

    let ctx = cache.ctx();
    let (r, n) = basis.dimensions();
    let mut d = r;

    if r == 0 {
        return Ok(Reduction { newd: 0 });
    }

    let mut zeros = 0usize;
    while zeros < r && basis[zeros].is_zero() {
        zeros += 1;
    }
    if zeros >= r {
        return Ok(Reduction { newd: 0 });
    }

    // Trailing columns past this shift are zero across the whole working
    // basis, so every dot product below can be clamped to `width_for`
    // without changing its value.
    let shift = gso::trailing_zero_run(basis);
    let width_for = |kappamax: usize| (kappamax + 1 + shift).min(n);

    cache.r[zeros][zeros] = cache.scalar_product(zeros, zeros, || {
        primary.dot(&basis[zeros], &basis[zeros], width_for(zeros), ctx)
    });

    if zeros + 1 >= d {
        return Ok(Reduction { newd: d });
    }

    let mut kappa = zeros + 1;
    let mut kappamax = zeros;
    let ctt = F::from_f64(params.ctt_wrapper(), ctx);
    let max_iter = iteration_cap(r, params, basis);
    let mut s: Vec<F> = vec![F::zero(ctx); r + 1];
    let mut iterations: u64 = 0;

    while kappa < d {
        iterations += 1;
        if iterations > max_iter {
            return Err(LllError::IterationCapExceeded);
        }

        if kappa > kappamax {
            kappamax = kappa;
            cache.r[kappa][kappa] = cache.scalar_product(kappa, kappa, || {
                primary.dot(&basis[kappa], &basis[kappa], width_for(kappamax), ctx)
            });
        }

        let a = cache.alpha[kappa];
        let width = width_for(kappamax);
        let primary_result = babai::size_reduce(
            primary,
            basis,
            transform.as_deref_mut(),
            cache,
            kappa,
            a,
            zeros,
            kappamax,
            width,
            params,
            &mut s,
        );
        if primary_result.is_err() {
            debug!("{} Babai failed at kappa={kappa}, retrying with {}", Fl::NAME, FlFallback::NAME);
            babai::size_reduce(
                fallback,
                basis,
                transform.as_deref_mut(),
                cache,
                kappa,
                a,
                zeros,
                kappamax,
                width,
                params,
                &mut s,
            )?;
        }

        // With-removal: decide whether to shrink the working dimension
        // before the swap search.
        if let Some(bound) = removal_bound {
            if kappa + 1 >= d {
                let term = cache.mu[kappa][kappa - 1].mul(&cache.r[kappa][kappa - 1]);
                let heuristic_bound = s[kappa - 1].sub(&term.add(&term));
                if heuristic_bound > *bound {
                    d -= 1;
                    if kappa >= d {
                        break;
                    }
                }
            }
        }

        let lhs = cache.r[kappa - 1][kappa - 1].mul(&ctt);
        let rhs = s[kappa - 1].clone();

        if lhs <= rhs {
            // ADVANCE: row accepted.
            let term = cache.mu[kappa][kappa - 1].mul(&cache.r[kappa][kappa - 1]);
            cache.r[kappa][kappa] = s[kappa - 1].sub(&term);
            cache.alpha[kappa] = kappa;
            kappa += 1;
            continue;
        }

        // FINDSLOT: scan downward from kappa for the insertion point. The
        // floor is `zeros` (not `zeros + 1`): the first nonzero row is a
        // legitimate destination slot, since nothing prevents it from being
        // displaced by a shorter row discovered later.
        let mut kappa2 = kappa;
        while kappa2 > zeros {
            let lhs2 = cache.r[kappa2 - 1][kappa2 - 1].mul(&ctt);
            if lhs2 <= s[kappa2 - 1] {
                break;
            }
            kappa2 -= 1;
        }

        // SWAP: move the row at kappa into slot kappa2.
        basis.insert(kappa, kappa2);
        if let Some(u) = transform.as_deref_mut() {
            u.insert(kappa, kappa2);
        }
        cache.insert(kappa, kappa2);
        cache.r[kappa2][kappa2] = s[kappa2].clone();

        if cache.r[kappa2][kappa2].to_f64() <= 0.0 {
            // ZEROFOUND: the row that landed in slot kappa2 is the zero
            // vector (by construction of the swap search this can only
            // happen at the new leading position).
            zeros += 1;
            kappa2 += 1;
            cache.r[kappa2][kappa2] = cache.scalar_product(kappa2, kappa2, || {
                primary.dot(&basis[kappa2], &basis[kappa2], width_for(kappamax), ctx)
            });
            kappa = kappa2;
        } else {
            kappa = kappa2 + 1;
        }
    }

    let mut newd = d;
    if let Some(bound) = removal_bound {
        while newd > 0 {
            let half = cache.r[newd - 1][newd - 1].to_f64() / 2.0;
            if half > bound.to_f64() {
                newd -= 1;
            } else {
                break;
            }
        }
    }

    Ok(Reduction { newd })
}

/// The outer loop's iteration hard cap. This driver keeps basis rows as
/// plain arbitrary-precision integers rather than a mantissa/exponent
/// pair, so there's no tracked row-exponent term to feed the textbook
/// termination bound directly; the basis's current max bit length stands
/// in for it, a generous, conservative bound against runaway iteration on
/// pathological inputs.
fn iteration_cap(r: usize, params: &LllParams, basis: &IntMatrix) -> u64 {
    let max_bits = basis.max_bits().max(1) as f64;
    let log2_r = (r as f64).log2().max(1.0);
    let denom = (8.0 / (params.delta + 7.0)).log2();
    let bound = (r as f64 - 1.0)
        + (r as f64) * (r as f64 - 1.0) * (2.0 * max_bits + log2_r) / denom.abs().max(1e-9);
    bound.max(r as f64 * 4.0) as u64 + 1
}

/// A no-removal convenience wrapper around [`reduce`] for callers that don't
/// need a transform accumulator.
pub fn reduce_basis<F: GsoScalar, Fl: BabaiFlavour<F>, FlFallback: BabaiFlavour<F>>(
    primary: &Fl,
    fallback: &FlFallback,
    basis: &mut IntMatrix,
    cache: &mut GsoCache<F>,
    params: &LllParams,
) -> Result<()> {
    reduce(primary, fallback, basis, None, cache, params, None).map(|_| ())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra::Int;
    use crate::babai::{FastDouble, HeuristicDouble};

    #[test]
    fn two_row_example_is_reduced_and_shrinks() {
        let mut basis = IntMatrix::from_matrix(vec![
            vec![Int::from(201), Int::from(37)],
            vec![Int::from(17), Int::from(0)],
        ]);
        let params = LllParams::new(0.75, 0.81);
        let mut cache: GsoCache<f64> = GsoCache::new(2, ());

        let result = reduce_basis(&FastDouble, &HeuristicDouble, &mut basis, &mut cache, &params);
        assert!(result.is_ok());

        let top_norm = basis[0].dot(&basis[0]);
        let bottom_norm = basis[1].dot(&basis[1]);
        assert!(top_norm <= bottom_norm);

        let det = &basis[0][0] * &basis[1][1] - &basis[0][1] * &basis[1][0];
        assert_eq!(det.clone() * det, Int::from(395641));
    }

    #[test]
    fn already_reduced_identity_like_basis_is_a_fixed_point() {
        let mut basis = IntMatrix::from_matrix(vec![
            vec![Int::from(1), Int::from(0), Int::from(0)],
            vec![Int::from(0), Int::from(1), Int::from(0)],
            vec![Int::from(0), Int::from(0), Int::from(1)],
        ]);
        let params = LllParams::default();
        let mut cache: GsoCache<f64> = GsoCache::new(3, ());

        let before = IntMatrix::from_matrix(
            (0..3)
                .map(|i| (0..3).map(|j| basis[i][j].clone()).collect())
                .collect(),
        );

        reduce_basis(&FastDouble, &HeuristicDouble, &mut basis, &mut cache, &params).unwrap();

        assert!(basis == before);
    }
}
