//! The multiplication engine: self-square, equal-size ("medium"), and
//! partitioned small×large multiply, all atop `bigint-core`'s NTT.
//!
//! Grounded in spec.md §4.6. The partitioned block-size search follows
//! `ff-fft/src/domain/utils.rs::best_mixed_domain_size`'s style of
//! evaluating a handful of power-of-two candidates directly rather than
//! deriving a closed-form optimum.

use crate::value::BigInt;
use bigint_core::buffer::compare_raw;
use bigint_core::fp::Fp;
use bigint_core::{ntt, BigIntError, Buffer, MAX_LEN, Result};
use core::ops::Mul;
use log::trace;

/// `THRESH` from spec.md §4.6.4: the length ratio above which the
/// partitioned small×large path is used instead of the equal-size path.
const THRESH: usize = 2;

/// Top-level magnitude multiply dispatch (spec.md §4.6.4).
pub fn multiply_raw(a: &Buffer, b: &Buffer) -> Result<Buffer> {
    if a.is_zero() || b.is_zero() {
        return Ok(Buffer::zero());
    }
    if a.len() + b.len() > MAX_LEN {
        return Err(BigIntError::OutOfRange(
            "product would exceed MAX_LEN limbs",
        ));
    }

    let (la, lb) = (a.len(), b.len());
    if compare_raw(a, b) == 0 {
        trace!("multiply dispatch: self-square, len={}", la);
        return square_raw(a);
    }
    if la >= THRESH * lb {
        trace!("multiply dispatch: partitioned, long=self len={}, short={}", la, lb);
        return partitioned_multiply(a, b);
    }
    if lb >= THRESH * la {
        trace!("multiply dispatch: partitioned, long=other len={}, short={}", lb, la);
        return partitioned_multiply(b, a);
    }
    trace!("multiply dispatch: medium, lens=({}, {})", la, lb);
    medium_multiply(a, b)
}

fn limbs_to_fp(buf: &Buffer, n: usize) -> Vec<Fp> {
    let mut v: Vec<Fp> = buf.as_slice().iter().map(|&l| Fp::new(l as u32)).collect();
    v.resize(n, Fp::ZERO);
    v
}

fn fp_to_buffer(coeffs: Vec<Fp>) -> Result<Buffer> {
    let digits: Vec<u64> = coeffs.into_iter().map(|c| c.value() as u64).collect();
    Buffer::from_wide_digits(digits)
}

/// Self-square (spec.md §4.6.1): a single forward NTT, pointwise square,
/// inverse NTT.
pub fn square_raw(a: &Buffer) -> Result<Buffer> {
    let n = (2 * a.len()).next_power_of_two();
    let mut coeffs = limbs_to_fp(a, n);
    let omega = Fp::principal_root(n as u64);
    let omega_inv = omega.pow(n as u64 - 1);
    ntt::ntt_in_place(&mut coeffs, omega);
    for x in coeffs.iter_mut() {
        *x = *x * *x;
    }
    ntt::intt_in_place(&mut coeffs, omega_inv);
    fp_to_buffer(coeffs)
}

/// Equal-size multiply (spec.md §4.6.2).
pub fn medium_multiply(a: &Buffer, b: &Buffer) -> Result<Buffer> {
    let n = (a.len() + b.len()).next_power_of_two();
    let mut fa = limbs_to_fp(a, n);
    let mut fb = limbs_to_fp(b, n);
    ntt::convolve(&mut fa, &mut fb);
    fp_to_buffer(fa)
}

/// Cost model from spec.md §4.6.3: `ceil(len_long / L) * N * log2(N)` for a
/// block length `L = N - len_short + 1`. Evaluated directly over candidate
/// powers of two, per `ff-fft`'s direct-search style rather than a
/// closed-form solution.
fn choose_partition_size(len_long: usize, len_short: usize) -> usize {
    let min_n = (2 * len_short).next_power_of_two();
    let max_n = MAX_LEN.next_power_of_two();

    let mut best_n = min_n;
    let mut best_cost = u64::MAX;
    let mut n = min_n;
    while n <= max_n {
        let l = n - len_short + 1;
        if l > 0 {
            let blocks = (len_long + l - 1) / l;
            let log2n = (n as u64).trailing_zeros() as u64;
            let cost = blocks as u64 * n as u64 * log2n;
            if cost < best_cost {
                best_cost = cost;
                best_n = n;
            }
        }
        n *= 2;
    }
    best_n
}

/// Partitioned "small × large" multiply (spec.md §4.6.3). `long` must have
/// `len_long >= THRESH * len_short`.
pub fn partitioned_multiply(long: &Buffer, short: &Buffer) -> Result<Buffer> {
    let len_long = long.len();
    let len_short = short.len();
    let n = choose_partition_size(len_long, len_short);
    let l = n - len_short + 1;

    let omega = Fp::principal_root(n as u64);
    let omega_inv = omega.pow(n as u64 - 1);

    let mut short_spectrum = limbs_to_fp(short, n);
    ntt::ntt_in_place(&mut short_spectrum, omega);

    // Wide accumulator for the overlap-add across blocks. Each block's
    // inverse-NTT output is `n` coefficients wide and the last block can
    // start as late as position `len_long - 1`, so `len_long + n` is a safe
    // upper bound regardless of how unevenly the final block divides.
    let mut acc = vec![0u64; len_long + n];

    let long_limbs = long.as_slice();
    let mut offset = 0usize;
    while offset < len_long {
        let block_len = l.min(len_long - offset);
        let mut block: Vec<Fp> = (0..n)
            .map(|i| {
                if i < block_len {
                    Fp::new(long_limbs[offset + i] as u32)
                } else {
                    Fp::ZERO
                }
            })
            .collect();

        ntt::ntt_in_place(&mut block, omega);
        for (x, y) in block.iter_mut().zip(short_spectrum.iter()) {
            *x = *x * *y;
        }
        ntt::intt_in_place(&mut block, omega_inv);

        for (i, coeff) in block.iter().enumerate() {
            acc[offset + i] += coeff.value() as u64;
        }

        offset += block_len;
    }

    Buffer::from_wide_digits(acc)
}

/// `floor((a * b) / 2^k)`. Used only inside Barrett reduction (spec.md
/// §4.6.5). When the exact product would exceed `MAX_LEN` limbs, splits
/// each operand at `MAX_LEN / 2` limbs and sums the (individually
/// in-range) partial products pre-shifted into position — Barrett's error
/// bound tolerates the resulting O(1)-limb rounding slack.
pub fn multiply_shr(a: &Buffer, b: &Buffer, k: u64) -> Result<Buffer> {
    if a.len() + b.len() <= MAX_LEN {
        let full = multiply_raw(a, b)?;
        return Ok(full.shr_bits(k));
    }

    let split = MAX_LEN / 2;
    let (a_lo, a_hi) = split_at(a, split);
    let (b_lo, b_hi) = split_at(b, split);
    let shift_bits = split as u64 * bigint_core::LIMB_BITS as u64;

    let hi_hi = multiply_raw(&a_hi, &b_hi)?;
    let lo_hi = multiply_raw(&a_lo, &b_hi)?;
    let hi_lo = multiply_raw(&a_hi, &b_lo)?;
    let lo_lo = multiply_raw(&a_lo, &b_lo)?;

    let cross = lo_hi.add_raw(&hi_lo)?;

    let term_hi_hi = shift_then_shr(&hi_hi, 2 * shift_bits, k)?;
    let term_cross = shift_then_shr(&cross, shift_bits, k)?;
    let term_lo_lo = shift_then_shr(&lo_lo, 0, k)?;

    let sum = term_hi_hi.add_raw(&term_cross)?.add_raw(&term_lo_lo)?;
    Ok(sum)
}

/// Computes `floor((term << block_shift) / 2^k)` without materializing the
/// (potentially oversized) intermediate `term << block_shift`.
fn shift_then_shr(term: &Buffer, block_shift: u64, k: u64) -> Result<Buffer> {
    if block_shift >= k {
        term.shl_bits(block_shift - k)
    } else {
        Ok(term.shr_bits(k - block_shift))
    }
}

/// Signed `floor((x * t) / 2^k)`, used by [`crate::newton::newton_inverse`]'s
/// iteration where the correction term `2^{k+1} - x*d` can be negative.
/// `floor` here means rounding towards negative infinity, matching the
/// mathematical floor function rather than truncation towards zero.
pub fn multiply_shr_signed(
    x_mag: &Buffer,
    x_sign: bool,
    t_mag: &Buffer,
    t_sign: bool,
    k: u64,
) -> Result<(Buffer, bool)> {
    if x_mag.is_zero() || t_mag.is_zero() {
        return Ok((Buffer::zero(), true));
    }
    let product_nonneg = x_sign == t_sign;

    if x_mag.len() + t_mag.len() <= MAX_LEN {
        let full = multiply_raw(x_mag, t_mag)?;
        let q = full.shr_bits(k);
        if product_nonneg {
            Ok((q, true))
        } else if has_nonzero_low_bits(&full, k) {
            let q1 = q.add_raw(&Buffer::one())?;
            Ok((q1, false))
        } else {
            let sign = q.is_zero();
            Ok((q, sign))
        }
    } else {
        // Overflow path: approximate via the unsigned multiply_shr split.
        // Barrett's error bound (spec.md §4.8) absorbs the resulting O(1)
        // slack; Newton in practice never reaches this branch since it
        // operates at bit-widths bounded by 2 * len(d) <= MAX_LEN.
        let q = multiply_shr(x_mag, t_mag, k)?;
        let sign = q.is_zero() || product_nonneg;
        Ok((q, sign))
    }
}

fn has_nonzero_low_bits(buf: &Buffer, k: u64) -> bool {
    let limb_k = (k / bigint_core::LIMB_BITS as u64) as usize;
    let bit_k = (k % bigint_core::LIMB_BITS as u64) as u32;
    for i in 0..limb_k.min(buf.len()) {
        if buf.limb(i) != 0 {
            return true;
        }
    }
    if bit_k > 0 && limb_k < buf.len() && (buf.limb(limb_k) & ((1u8 << bit_k) - 1)) != 0 {
        return true;
    }
    false
}

fn split_at(buf: &Buffer, limb: usize) -> (Buffer, Buffer) {
    let slice = buf.as_slice();
    let lo: Vec<u8> = slice.iter().take(limb).copied().collect();
    let hi: Vec<u8> = if slice.len() > limb {
        slice[limb..].to_vec()
    } else {
        vec![0]
    };
    (
        Buffer::from_limbs(lo).unwrap(),
        Buffer::from_limbs(hi).unwrap(),
    )
}

impl BigInt {
    /// `self * other`, sign `sign(self) == sign(other)` (spec.md §4.6.4).
    /// Fails with [`BigIntError::OutOfRange`] if the exact product would
    /// need more than `MAX_LEN` limbs (spec.md §4.6.5).
    pub fn checked_mul(&self, other: &BigInt) -> Result<BigInt> {
        let magnitude = multiply_raw(self.magnitude(), other.magnitude())?;
        let sign = self.is_nonnegative() == other.is_nonnegative();
        Ok(BigInt::from_parts(magnitude, sign))
    }
}

impl Mul for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: &BigInt) -> BigInt {
        self.checked_mul(rhs)
            .expect("product would exceed MAX_LEN limbs")
    }
}
impl Mul for BigInt {
    type Output = BigInt;
    fn mul(self, rhs: BigInt) -> BigInt {
        (&self).checked_mul(&rhs).expect("product would exceed MAX_LEN limbs")
    }
}
impl core::ops::MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        *self = (&*self).checked_mul(rhs).expect("product would exceed MAX_LEN limbs");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_from_u64(x: u64) -> Buffer {
        Buffer::from_limbs(x.to_le_bytes().to_vec()).unwrap()
    }

    fn buf_to_u64(b: &Buffer) -> u64 {
        let mut bytes = [0u8; 8];
        for (i, &l) in b.as_slice().iter().enumerate().take(8) {
            bytes[i] = l;
        }
        u64::from_le_bytes(bytes)
    }

    #[test]
    fn medium_multiply_matches_schoolbook() {
        let a = buf_from_u64(12345);
        let b = buf_from_u64(6789);
        let product = multiply_raw(&a, &b).unwrap();
        assert_eq!(buf_to_u64(&product), 12345 * 6789);
    }

    #[test]
    fn self_square() {
        let a = buf_from_u64(987);
        let sq = multiply_raw(&a, &a).unwrap();
        assert_eq!(buf_to_u64(&sq), 987 * 987);
    }

    #[test]
    fn partitioned_multiply_matches_schoolbook() {
        // Force a length ratio >= THRESH so the partitioned path is taken.
        let long = Buffer::from_limbs(vec![7u8; 40]).unwrap();
        let short = buf_from_u64(13);
        let product = multiply_raw(&long, &short).unwrap();

        // Cross-check by repeated doubling-free accumulation using u128 math
        // over the limb representation.
        let mut expected = vec![0u128; long.len() + short.len()];
        for (i, &la) in long.as_slice().iter().enumerate() {
            for (j, &sb) in short.as_slice().iter().enumerate() {
                expected[i + j] += la as u128 * sb as u128;
            }
        }
        let mut carry = 0u128;
        let mut got = Vec::new();
        for &d in expected.iter() {
            let total = d + carry;
            got.push((total & 0xff) as u8);
            carry = total >> 8;
        }
        while carry > 0 {
            got.push((carry & 0xff) as u8);
            carry >>= 8;
        }
        while got.len() > 1 && *got.last().unwrap() == 0 {
            got.pop();
        }
        assert_eq!(product.as_slice(), &got[..]);
    }

    #[test]
    fn power_of_two_squaring_scenario_s1() {
        // a = b = 2^1000; a*b should be 2^2000.
        let mut limbs = vec![0u8; 126];
        limbs[125] = 1u8 << (1000 - 125 * 8);
        let a = Buffer::from_limbs(limbs).unwrap();
        let product = multiply_raw(&a, &a).unwrap();
        assert_eq!(product.num_bits(), 2001);
    }
}
