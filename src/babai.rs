//! The Babai size-reduction kernel.
//!
//! One generic body (`size_reduce`) runs against any [`GsoScalar`]; the
//! three precision tiers differ only in how a dot product is evaluated,
//! captured by the small [`BabaiFlavour`] trait.

use log::trace;

use crate::{
    algebra::{Int, IntMatrix, IntVector},
    error::{LllError, Result},
    fraction::{GsoScalar, HighPrec},
    gso::GsoCache,
    params::{LllParams, MAX_BABAI_PASSES, SIZE_RED_FAILURE_THRESH},
};

/// How a Babai flavour evaluates `<b_i, b_j>` in its working scalar type.
///
/// `width` clamps how many leading coordinates are summed; columns at or
/// past `width` are assumed zero across the whole working basis (see
/// [`crate::gso::trailing_zero_run`]), so truncating the sum there never
/// changes the result.
pub trait BabaiFlavour<F: GsoScalar> {
    const NAME: &'static str;

    fn dot(&self, bi: &IntVector, bj: &IntVector, width: usize, ctx: F::Ctx) -> F;
}

/// Plain double dot product, no cancellation handling.
pub struct FastDouble;

impl BabaiFlavour<f64> for FastDouble {
    const NAME: &'static str = "fast";

    fn dot(&self, bi: &IntVector, bj: &IntVector, width: usize, _ctx: ()) -> f64 {
        plain_dot_f64(bi, bj, width)
    }
}

/// Double dot product with a Kahan-style cancellation probe, falling back
/// to the exact integer dot (converted to `f64`) when cancellation is
/// suspected.
pub struct HeuristicDouble;

impl BabaiFlavour<f64> for HeuristicDouble {
    const NAME: &'static str = "heuristic";

    fn dot(&self, bi: &IntVector, bj: &IntVector, width: usize, _ctx: ()) -> f64 {
        let (sum, abs_sum) = dot_f64_with_error(bi, bj, width);
        // Cancellation is suspected when the true sum is much smaller than
        // the sum of absolute terms that produced it.
        if abs_sum > 0.0 && sum.abs() < abs_sum * 2f64.powi(-(crate::params::CPU_SIZE_1 as i32) / 2)
        {
            trace!("heuristic dot: cancellation suspected, falling back to exact");
            bi.dot_upto(bj, width).to_f64()
        } else {
            sum
        }
    }
}

/// Arbitrary-precision dot product: the exact integer dot converted
/// directly to the working precision.
pub struct HighPrecision;

impl BabaiFlavour<HighPrec> for HighPrecision {
    const NAME: &'static str = "high-precision";

    fn dot(&self, bi: &IntVector, bj: &IntVector, width: usize, ctx: u32) -> HighPrec {
        HighPrec::from_int(&bi.dot_upto(bj, width), ctx)
    }
}

fn plain_dot_f64(bi: &IntVector, bj: &IntVector, width: usize) -> f64 {
    let n = width.min(bi.dimension());
    (0..n).map(|k| bi[k].to_f64() * bj[k].to_f64()).sum()
}

/// Returns `(sum, sum of |term|)`.
fn dot_f64_with_error(bi: &IntVector, bj: &IntVector, width: usize) -> (f64, f64) {
    let mut sum = 0.0;
    let mut abs_sum = 0.0;
    let n = width.min(bi.dimension());
    for k in 0..n {
        let term = bi[k].to_f64() * bj[k].to_f64();
        sum += term;
        abs_sum += term.abs();
    }
    (sum, abs_sum)
}

/// Size-reduces `basis[kappa]` against rows `0..kappa` using the cached
/// GSO data.
///
/// `resume_from` is the column to start refreshing the GSO cache from,
/// normally `alpha[kappa]` after a swap. `leading_zeros` and `kappamax`
/// are driver state threaded through unchanged. `width` clamps every dot
/// product taken against the full rows (see [`BabaiFlavour::dot`]). `s`
/// receives the progressive squared Gram-Schmidt norms used by the
/// Lovász test; it must have length at least `kappa + 1`.
///
/// # Errors
/// Returns [`LllError::NumericalFailure`] if size reduction fails to
/// converge within the pass budget.
#[allow(clippy::too_many_arguments)]
pub fn size_reduce<F: GsoScalar, Fl: BabaiFlavour<F>>(
    flavour: &Fl,
    basis: &mut IntMatrix,
    mut transform: Option<&mut IntMatrix>,
    cache: &mut GsoCache<F>,
    kappa: usize,
    resume_from: usize,
    leading_zeros: usize,
    kappamax: usize,
    width: usize,
    params: &LllParams,
    s: &mut [F],
) -> Result<()> {
    let ctx = cache.ctx();
    let halfplus = params.halfplus();
    let onedothalfplus = params.onedothalfplus();

    let mut a = resume_from;
    let mut passes: u32 = 0;
    let mut checkpoint_max = f64::INFINITY;

    loop {
        // Step A: refresh the GSO row of kappa from column `a` onward.
        refresh_gso_row(flavour, basis, cache, kappa, a, width, ctx);

        // Step B: iterate size reductions from kappa-1 down to leading_zeros.
        let mut test = false;
        let mut max_mu_abs = 0.0f64;

        for j in (leading_zeros..kappa).rev() {
            let mu_kj = cache.mu[kappa][j].clone();
            let mu_abs = mu_kj.to_f64().abs();

            if mu_abs <= halfplus {
                continue;
            }

            test = true;
            max_mu_abs = max_mu_abs.max(mu_abs);

            let x: Int = if mu_abs <= onedothalfplus {
                Int::from(if mu_kj.to_f64() < 0.0 { -1 } else { 1 })
            } else {
                mu_kj.round_to_int()
            };

            if x != Int::from(0) {
                basis[kappa].submul_scalar(&x, &basis[j]);
                if let Some(u) = transform.as_deref_mut() {
                    u[kappa].submul_scalar(&x, &u[j]);
                }

                let x_f = F::from_int(&x, ctx);
                for k in 0..j {
                    let delta = x_f.mul(&cache.mu[j][k]);
                    cache.mu[kappa][k] = cache.mu[kappa][k].sub(&delta);
                }
            }
        }

        if !test {
            break;
        }

        // The row changed: cached scalar products against it are stale.
        cache.invalidate_row(kappa, kappamax + 1);
        a = leading_zeros;
        passes += 1;

        // Step C: failure detection.
        if passes % 5 == 0 {
            if max_mu_abs > checkpoint_max * 2f64.powi(-SIZE_RED_FAILURE_THRESH) {
                trace!(
                    "{}: size reduction stalled at kappa={kappa} after {passes} passes",
                    Fl::NAME
                );
                return Err(LllError::NumericalFailure);
            }
            checkpoint_max = max_mu_abs;
        }
        if passes >= MAX_BABAI_PASSES {
            trace!("{}: size reduction exceeded pass budget at kappa={kappa}", Fl::NAME);
            return Err(LllError::NumericalFailure);
        }
    }

    // Step D: progressive squared Gram-Schmidt norms, feeding the Lovász test.
    s[leading_zeros] =
        cache.scalar_product(kappa, kappa, || flavour.dot(&basis[kappa], &basis[kappa], width, ctx));
    for j in leading_zeros..kappa {
        let term = cache.mu[kappa][j].mul(&cache.r[kappa][j]);
        s[j + 1] = s[j].sub(&term);
    }

    Ok(())
}

/// Recomputes `mu[kappa][j]` and `r[kappa][j]` for `j` in `[from, kappa)`,
/// using the standard Gram-Schmidt recurrence.
fn refresh_gso_row<F: GsoScalar, Fl: BabaiFlavour<F>>(
    flavour: &Fl,
    basis: &IntMatrix,
    cache: &mut GsoCache<F>,
    kappa: usize,
    from: usize,
    width: usize,
    ctx: F::Ctx,
) {
    for j in from..kappa {
        let sp = cache.scalar_product(kappa, j, || flavour.dot(&basis[kappa], &basis[j], width, ctx));
        let mut r_kj = sp;
        for k in 0..j {
            let term = cache.mu[j][k].mul(&cache.r[kappa][k]);
            r_kj = r_kj.sub(&term);
        }
        cache.r[kappa][j] = r_kj.clone();
        cache.mu[kappa][j] = r_kj.div(&cache.r[j][j]);
    }
}
