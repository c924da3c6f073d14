//! The ultra-LLL driver: reduces bases whose entries are far wider than
//! any working precision by reducing a truncated shadow and applying the
//! discovered unimodular transform back to the original.

use log::info;

use crate::{algebra::IntMatrix, params::LllParams, wrapper};

/// Typical truncation target in bits.
pub const DEFAULT_NEW_SIZE: u32 = 250;

/// Reduces `basis` in place via ultra-LLL.
///
/// `new_size` is the truncation threshold in bits; callers needing a
/// different tradeoff between truncation depth and iteration count can
/// override [`DEFAULT_NEW_SIZE`].
pub fn reduce(basis: &mut IntMatrix, mut transform: Option<&mut IntMatrix>, params: &LllParams, new_size: u32) {
    let mbits = basis.max_bits();
    if mbits <= new_size {
        wrapper::reduce(basis, transform, params, None);
        return;
    }

    let (d, _n) = basis.dimensions();
    let mut mbits = mbits;

    loop {
        let shift = mbits - new_size;
        let mut trunc = basis.shr_round(shift);
        let mut u = IntMatrix::identity(d);

        info!("ultra-LLL: truncating {mbits} bits by {shift} to reduce a {new_size}-bit shadow");
        wrapper::reduce(&mut trunc, Some(&mut u), params, None);

        let reconstructed = u.mul(basis);
        *basis = reconstructed;
        if let Some(t) = transform.as_deref_mut() {
            let updated = u.mul(t);
            *t = updated;
        }

        let new_mbits = basis.max_bits();
        let converged = new_mbits <= new_size;
        let made_progress = !u.is_identity() && mbits.saturating_sub(new_mbits) >= new_size / 4;

        mbits = new_mbits;

        if converged {
            return;
        }
        if !made_progress {
            // Switch to full precision and finish.
            wrapper::reduce(basis, transform, params, None);
            return;
        }
    }
}
