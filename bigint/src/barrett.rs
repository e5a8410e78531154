//! Barrett reduction: division-free `n mod d` (and quotient) given a
//! precomputed scaled reciprocal `mu` (spec.md §4.8).
//!
//! Grounded in `examples/original_source/Libs/BigNumModularRing.hpp`'s
//! truncate/multiplyTruncate/subtract/adjust shape; the teacher lineage has
//! no Barrett reduction anywhere (`algebra-core`'s `Fp` uses Montgomery
//! reduction instead), so this module leans on the original source for the
//! algorithm and on `bigint::mul`/`bigint::value` for the arithmetic it's
//! built from.

use crate::mul::multiply_shr;
use crate::value::BigInt;
use bigint_core::{Buffer, LIMB_BITS, Result};
use log::trace;

/// `barrettReduce(n, d, mu)` of spec.md §4.8. Preconditions: `d` nonzero,
/// `len(d) <= len(n) <= 2 * len(d)`, `mu = floor(2^(len(n) * E) / d)`.
/// Returns `(q, r)` with `0 <= r < d` and `n == q * d + r`.
pub fn barrett_reduce(n: &Buffer, d: &Buffer, mu: &Buffer) -> Result<(Buffer, Buffer)> {
    let e = LIMB_BITS as u64;
    let len_d = d.len() as u64;
    let len_n = n.len() as u64;

    // Step 1: truncate the low (len_d - 1) limbs.
    let q_trunc = n.shr_bits((len_d - 1) * e);
    // Step 2: multiplyTruncate — multiplyShr by (len_n - len_d + 1) limbs.
    let q_estimate = multiply_shr(&q_trunc, mu, (len_n - len_d + 1) * e)?;

    let n_signed = BigInt::from_parts(n.clone(), true);
    let d_signed = BigInt::from_parts(d.clone(), true);
    let mut q_signed = BigInt::from_parts(q_estimate, true);

    // Step 3.
    let qd = &q_signed * &d_signed;
    let mut r_signed = &n_signed - &qd;

    // Step 4: adjustment loop, O(1) iterations by the Barrett error bound.
    let mut adjustments = 0u32;
    while r_signed.is_negative() {
        r_signed = &r_signed + &d_signed;
        q_signed = &q_signed - &BigInt::one();
        adjustments += 1;
    }
    while r_signed >= d_signed {
        r_signed = &r_signed - &d_signed;
        q_signed = &q_signed + &BigInt::one();
        adjustments += 1;
    }
    trace!("barrett_reduce adjustment loop ran {} times", adjustments);

    Ok((q_signed.magnitude().clone(), r_signed.magnitude().clone()))
}

/// The `resident`-only variant of spec.md §4.8: just the remainder.
pub fn barrett_residue(n: &Buffer, d: &Buffer, mu: &Buffer) -> Result<Buffer> {
    let (_, r) = barrett_reduce(n, d, mu)?;
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newton::newton_inverse;

    fn buf_u64(x: u64) -> Buffer {
        Buffer::from_limbs(x.to_le_bytes().to_vec()).unwrap()
    }

    #[test]
    fn matches_plain_division_when_preconditions_hold() {
        let cases: &[(u64, u64)] = &[(1000, 7), (65536, 257), (999983, 999979), (40000, 199)];
        for &(n, d) in cases {
            let n_buf = buf_u64(n);
            let d_buf = buf_u64(d);
            if n_buf.len() < d_buf.len() || n_buf.len() > 2 * d_buf.len() {
                continue;
            }
            let mu = newton_inverse(&d_buf, n_buf.len() as u64 * LIMB_BITS as u64).unwrap();
            let (q, r) = barrett_reduce(&n_buf, &d_buf, &mu).unwrap();

            let mut q_bytes = [0u8; 8];
            q_bytes[..q.as_slice().len()].copy_from_slice(q.as_slice());
            let mut r_bytes = [0u8; 8];
            r_bytes[..r.as_slice().len()].copy_from_slice(r.as_slice());

            assert_eq!(u64::from_le_bytes(q_bytes), n / d, "quotient for {}/{}", n, d);
            assert_eq!(u64::from_le_bytes(r_bytes), n % d, "remainder for {}/{}", n, d);
        }
    }
}
