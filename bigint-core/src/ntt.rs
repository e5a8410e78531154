//! In-place radix-2 number-theoretic transform.
//!
//! Directly grounded in `ff-fft/src/domain/radix2.rs::serial_radix2_fft`
//! and the bit-reversal permutation in `ff-fft/src/domain/utils.rs`: same
//! butterfly shape, generalized away from a generic `FftField` down to this
//! crate's one concrete field, [`Fp`](crate::fp::Fp).

use crate::fp::{Fp, P};
use unroll::unroll_for_loops;

/// Reverses the low `bits` bits of `n`.
#[inline]
fn bitreverse(mut n: u32, bits: u32) -> u32 {
    let mut r = 0u32;
    for _ in 0..bits {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// Forward NTT of `a` in place. `a.len()` must be a power of two; `omega`
/// must be a principal `a.len()`-th root of unity (see
/// [`Fp::principal_root`]).
pub fn ntt_in_place(a: &mut [Fp], omega: Fp) {
    let n = a.len() as u32;
    assert!(n.is_power_of_two(), "NTT length must be a power of two");
    let log_n = n.trailing_zeros();

    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            a.swap(rk as usize, k as usize);
        }
    }

    let mut m: u32 = 1;
    for _ in 0..log_n {
        let w_m = omega.pow((n / (2 * m)) as u64);

        let mut k = 0u32;
        while k < n {
            butterfly_block(a, k, m, w_m);
            k += 2 * m;
        }

        m *= 2;
    }
}

#[unroll_for_loops]
fn butterfly_block(a: &mut [Fp], k: u32, m: u32, w_m: Fp) {
    let mut w = Fp::ONE;
    for j in 0..m {
        let t = a[(k + j + m) as usize] * w;
        let top = a[(k + j) as usize];
        a[(k + j + m) as usize] = top - t;
        a[(k + j) as usize] = top + t;
        w = w * w_m;
    }
}

/// Inverse NTT of `a` in place: runs the forward transform with `omega^-1`
/// (the caller supplies `omega^{n-1}`, per spec.md §4.2) then rescales by
/// `n^{-1}`.
pub fn intt_in_place(a: &mut [Fp], omega_inv: Fp) {
    let n = a.len() as u32;
    ntt_in_place(a, omega_inv);
    let log_n = n.trailing_zeros();
    let n_inv = Fp::inv_pow2(log_n);
    for x in a.iter_mut() {
        *x = *x * n_inv;
    }
}

/// Convolves `a` and `b` (both zero-extended by the caller to a common
/// power-of-two length `n` at least `a.len() + b.len() - 1`) via forward
/// NTT, pointwise multiply, inverse NTT.
pub fn convolve(a: &mut [Fp], b: &mut [Fp]) {
    let n = a.len();
    assert_eq!(n, b.len());
    let omega = Fp::principal_root(n as u64);
    let omega_inv = omega.pow(n as u64 - 1);

    ntt_in_place(a, omega);
    ntt_in_place(b, omega);
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x = *x * *y;
    }
    intt_in_place(a, omega_inv);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_convolution(a: &[u64], b: &[u64]) -> Vec<u64> {
        let mut out = vec![0u64; a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                out[i + j] += x * y;
            }
        }
        out
    }

    #[test]
    fn round_trip_is_identity() {
        let n = 16usize;
        let omega = Fp::principal_root(n as u64);
        let omega_inv = omega.pow(n as u64 - 1);
        let mut a: Vec<Fp> = (0..n as u32).map(Fp::new).collect();
        let original = a.clone();
        ntt_in_place(&mut a, omega);
        intt_in_place(&mut a, omega_inv);
        for (got, want) in a.iter().zip(original.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn convolution_matches_naive() {
        let a_coeffs: Vec<u64> = vec![1, 2, 3, 4];
        let b_coeffs: Vec<u64> = vec![5, 6, 7];
        let want = naive_convolution(&a_coeffs, &b_coeffs);

        let n = (a_coeffs.len() + b_coeffs.len() - 1).next_power_of_two();
        let mut a: Vec<Fp> = a_coeffs.iter().map(|&x| Fp::new(x as u32)).collect();
        let mut b: Vec<Fp> = b_coeffs.iter().map(|&x| Fp::new(x as u32)).collect();
        a.resize(n, Fp::ZERO);
        b.resize(n, Fp::ZERO);

        convolve(&mut a, &mut b);

        for (i, &w) in want.iter().enumerate() {
            assert_eq!(a[i].value() as u64, w % P as u64);
        }
    }
}
