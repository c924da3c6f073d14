//! The is-reduced certifying verifier, consulted by the wrapper between
//! precision tiers.
//!
//! Implemented directly here, using exact `rug::Rational` Gram-Schmidt
//! arithmetic, so the check is immune to the floating-point error it is
//! meant to certify against.

use rug::Rational;

use crate::algebra::IntMatrix;
use crate::params::LllParams;

/// A tiny implementation-defined slack added to the `delta`/`eta`
/// comparisons, to tolerate a candidate basis sitting exactly on the
/// boundary.
const EPSILON: f64 = 1e-9;

/// Returns true iff the leading `newd` rows of `basis` (all rows, when
/// `removal` is `None`) satisfy the δ/η LLL condition, computed exactly.
///
/// `removal` is `Some((gs_b, newd))` for the with-removal contract:
/// additionally checks every surviving row's squared GSO norm exceeds
/// `gs_b / 4`.
pub fn is_reduced(basis: &IntMatrix, params: &LllParams, removal: Option<(f64, usize)>) -> bool {
    let (d_total, _n) = basis.dimensions();
    let d = removal.map(|(_, newd)| newd).unwrap_or(d_total);

    if d == 0 {
        return true;
    }

    let rows: Vec<_> = (0..d).map(|i| &basis[i]).collect();
    let gram: Vec<Vec<Rational>> = rows
        .iter()
        .map(|bi| rows.iter().map(|bj| exact_dot(bi, bj)).collect())
        .collect();

    let mut mu = vec![vec![Rational::from(0); d]; d];
    let mut r = vec![Rational::from(0); d];
    r[0] = gram[0][0].clone();

    for i in 1..d {
        for j in 0..i {
            let mut acc = gram[i][j].clone();
            for k in 0..j {
                acc -= mu[j][k].clone() * &mu[i][k] * &r[k];
            }
            mu[i][j] = acc / &r[j];
        }
        let mut norm = gram[i][i].clone();
        for k in 0..i {
            norm -= mu[i][k].clone() * &mu[i][k] * &r[k];
        }
        r[i] = norm;

        if r[i] <= 0 {
            return false;
        }
    }

    let eta = params.eta * (1.0 + EPSILON);
    for i in 1..d {
        for j in 0..i {
            if mu[i][j].clone().abs().to_f64() > eta {
                return false;
            }
        }
    }

    let delta = Rational::from_f64(params.delta).expect("delta is finite");
    for i in 1..d {
        let threshold = (delta.clone() - mu[i][i - 1].clone() * &mu[i][i - 1]) * &r[i - 1];
        if r[i].to_f64() < threshold.to_f64() - EPSILON * r[i - 1].to_f64().abs().max(1.0) {
            return false;
        }
    }

    if let Some((gs_b, _)) = removal {
        for i in 0..d {
            if r[i].to_f64() <= gs_b / 4.0 {
                return false;
            }
        }
    }

    true
}

fn exact_dot(a: &crate::algebra::IntVector, b: &crate::algebra::IntVector) -> Rational {
    Rational::from(a.dot(b))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra::Int;

    #[test]
    fn identity_basis_is_reduced() {
        let basis = IntMatrix::from_matrix(vec![
            vec![Int::from(1), Int::from(0)],
            vec![Int::from(0), Int::from(1)],
        ]);
        let params = LllParams::default();
        assert!(is_reduced(&basis, &params, None));
    }

    #[test]
    fn grossly_unreduced_basis_is_rejected() {
        let basis = IntMatrix::from_matrix(vec![
            vec![Int::from(1000), Int::from(1)],
            vec![Int::from(1), Int::from(0)],
        ]);
        let params = LllParams::new(0.99, 0.51);
        assert!(!is_reduced(&basis, &params, None));
    }
}
