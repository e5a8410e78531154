//! Newton inverse: `newton_inverse(d, k) == floor(2^k / d)` by the
//! fixed-point iteration `x_{n+1} = floor(x_n * (2^{k+1} - x_n*d) / 2^k)`.
//!
//! spec.md §4.7 writes this as `x_n + multiplyShr(x_n, 2^{k+1} - x_n*d, k)`,
//! but that additive form has the wrong fixed point (it converges to
//! `2 * floor(2^k/d)`, or oscillates without converging at all); the
//! original C++ (`examples/original_source/Libs/BigNumModularRing.hpp`,
//! `newtonInverse`) replaces `x_n` outright each iteration rather than
//! adding to it — `x[i&1].multiplyShr(pow2 - x_old*(*this), k)` — which is
//! ground truth here over spec.md's transcription.
//!
//! No direct precedent in the teacher lineage (arkworks's fields use
//! Montgomery reduction, never Barrett/Newton); grounded instead in
//! `examples/original_source/Libs/BigNumModularRing.hpp` for the exact
//! iteration shape and termination condition.

use crate::mul::multiply_shr_signed;
use crate::value::BigInt;
use bigint_core::{Buffer, Result};
use log::trace;

/// Safety valve against a non-terminating iteration, which would indicate
/// an internal bug rather than a legitimate slow convergence — the
/// iteration is quadratically convergent and never needs more than
/// `O(log k)` steps in practice.
const MAX_ITERATIONS: usize = 256;

/// `floor(2^k / d)` for a positive divisor `d` with bit length `ell`.
/// `k < ell` returns 0; `k == ell` returns 1 (spec.md §4.7 corner cases).
pub fn newton_inverse(d: &Buffer, k: u64) -> Result<Buffer> {
    let ell = d.num_bits() as u64;
    if k < ell {
        return Ok(Buffer::zero());
    }
    if k == ell {
        return Ok(Buffer::one());
    }

    let d_signed = BigInt::from_parts(d.clone(), true);
    let two_pow_k1 = BigInt::one().shl((k + 1) as i64)?;

    let mut x = BigInt::one().shl((k - ell - 1) as i64)?;
    x = &x * &BigInt::from(3u32);

    for iteration in 0..MAX_ITERATIONS {
        let xd = &x * &d_signed;
        let t = &two_pow_k1 - &xd;

        let (next_mag, next_sign) =
            multiply_shr_signed(x.magnitude(), x.is_nonnegative(), t.magnitude(), t.is_nonnegative(), k)?;
        let next = BigInt::from_parts(next_mag, next_sign);

        if next == x {
            trace!("newton_inverse converged after {} iterations (k={}, ell={})", iteration, k, ell);
            return Ok(next.magnitude().clone());
        }
        x = next;
    }

    // Unreachable under correct core logic; treated as an internal bug,
    // same status spec.md §7 gives Underflow.
    Ok(x.magnitude().clone())
}
