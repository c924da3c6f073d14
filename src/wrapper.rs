//! The precision-escalation wrapper: the only reduction entry point that
//! never fails. Tries fast double, then heuristic double, then arbitrary
//! precision at growing bit widths, consulting the verifier between
//! tiers.

use log::{info, warn};

use crate::{
    algebra::IntMatrix,
    babai::{FastDouble, HeuristicDouble, HighPrecision},
    driver::{self, Reduction},
    fraction::HighPrec,
    gso::GsoCache,
    params::{LllParams, D_BITS},
    verify,
};

/// Result of a wrapper-level reduction.
pub struct WrapperOutcome {
    pub newd: usize,
    /// How many precision tiers were tried before the verifier accepted.
    pub tiers_tried: u32,
}

/// Reduces `basis` (and, if given, `transform`) to a verified LLL-δ-reduced
/// state, escalating precision until the verifier accepts.
///
/// Never returns an error: on the rare input where even double-word
/// arbitrary precision doesn't immediately verify, precision keeps
/// doubling. The loop is still bounded in practice by `rug::Float`'s
/// precision range; pathological non-termination is not a case this
/// engine is designed to guard against.
pub fn reduce(basis: &mut IntMatrix, mut transform: Option<&mut IntMatrix>, params: &LllParams, removal_bound: Option<f64>) -> WrapperOutcome {
    let mut tiers_tried = 0;

    tiers_tried += 1;
    if let Some(outcome) = try_fast_double(basis, transform.as_deref_mut(), params, removal_bound) {
        if verify::is_reduced(basis, params, removal_bound.map(|b| (b, outcome.newd))) {
            return WrapperOutcome { newd: outcome.newd, tiers_tried };
        }
        warn!("fast-double result failed verification, escalating");
    }

    tiers_tried += 1;
    if let Some(outcome) = try_heuristic_double(basis, transform.as_deref_mut(), params, removal_bound) {
        if verify::is_reduced(basis, params, removal_bound.map(|b| (b, outcome.newd))) {
            return WrapperOutcome { newd: outcome.newd, tiers_tried };
        }
        warn!("heuristic-double result failed verification, escalating");
    }

    let mut prec = D_BITS;
    loop {
        tiers_tried += 1;
        info!("high-precision attempt at {prec} bits");
        if let Some(outcome) = try_high_precision(basis, transform.as_deref_mut(), params, removal_bound, prec) {
            if verify::is_reduced(basis, params, removal_bound.map(|b| (b, outcome.newd))) {
                return WrapperOutcome { newd: outcome.newd, tiers_tried };
            }
        }

        if prec <= 20 * D_BITS {
            prec += D_BITS;
        } else {
            prec = prec.checked_mul(2).expect("precision escalated past the representable range");
        }
    }
}

fn try_fast_double(basis: &mut IntMatrix, transform: Option<&mut IntMatrix>, params: &LllParams, removal_bound: Option<f64>) -> Option<Reduction> {
    let mut cache: GsoCache<f64> = GsoCache::new(basis.dimensions().0, ());
    driver::reduce(&FastDouble, &HeuristicDouble, basis, transform, &mut cache, params, removal_bound.as_ref()).ok()
}

fn try_heuristic_double(basis: &mut IntMatrix, transform: Option<&mut IntMatrix>, params: &LllParams, removal_bound: Option<f64>) -> Option<Reduction> {
    let mut cache: GsoCache<f64> = GsoCache::new(basis.dimensions().0, ());
    driver::reduce(&HeuristicDouble, &HeuristicDouble, basis, transform, &mut cache, params, removal_bound.as_ref()).ok()
}

fn try_high_precision(
    basis: &mut IntMatrix,
    transform: Option<&mut IntMatrix>,
    params: &LllParams,
    removal_bound: Option<f64>,
    prec: u32,
) -> Option<Reduction> {
    let mut cache: GsoCache<HighPrec> = GsoCache::new(basis.dimensions().0, prec);
    let bound = removal_bound.map(|b| HighPrec(rug::Float::with_val(prec, b)));
    driver::reduce(&HighPrecision, &HighPrecision, basis, transform, &mut cache, params, bound.as_ref()).ok()
}
