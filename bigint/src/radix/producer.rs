//! Digit production (spec.md §4.10): most-significant-digit-first streams
//! of a [`BigInt`] magnitude in a chosen radix.
//!
//! The exact/small-pow2/large-pow2 variants are grounded directly in
//! spec.md's own description (no teacher precedent — `algebra-core` never
//! does textual radix conversion). The generic/decimal divide-and-conquer
//! variant is grounded in `examples/original_source/Libs/BigInt.hpp`'s
//! digit-producer coroutine for the stack shape, simplified to push
//! already-resolved digits onto a plain queue rather than the original's
//! fixed-shape "trivial run" buffer object — an internal buffering detail
//! that does not change the emitted digit sequence (see DESIGN.md).

use crate::radix::{classify, RadixShape};
use crate::tower::decimal_tower_level;
use crate::tower::Tower;
use crate::value::BigInt;
use bigint_core::{BigIntError, Buffer, Result};
use std::collections::VecDeque;

/// A single emitted digit. `u64` comfortably covers every radix this
/// crate accepts (spec.md caps practical radices well under `2^64`).
pub type Digit = u64;

enum TowerSource {
    Decimal,
    Generic(Tower),
}

impl TowerSource {
    fn level(&mut self, k: u32) -> BigInt {
        match self {
            TowerSource::Decimal => decimal_tower_level(k as usize),
            TowerSource::Generic(t) => t.level(k as usize),
        }
    }
}

enum State {
    /// Already-exhausted or zero-valued producer: a single `0` digit.
    SingleZero(bool),
    Exact {
        buf: Buffer,
        next_idx: Option<usize>,
    },
    /// Shared by `SmallPow2`/`LargePow2`: `e`-bit-wide digits read directly
    /// off the bit representation, with groups aligned to bit 0 (so the
    /// top group may cover a handful of always-zero high bits when
    /// `num_bits` isn't a multiple of `e`), matching the consumer's
    /// positional reconstruction.
    Pow2 {
        buf: Buffer,
        e: u32,
        next_top_bit: i64,
    },
    Generic {
        stack: Vec<(BigInt, u32, u32)>,
        pending: VecDeque<Digit>,
        radix: BigInt,
        tower: TowerSource,
    },
}

pub struct DigitProducer {
    state: State,
}

impl DigitProducer {
    /// Builds a producer for `value`'s magnitude in the given `radix`.
    /// `radix < 2` is a [`BigIntError::DomainError`] (spec.md §7).
    pub fn new(value: &BigInt, radix: u32) -> Result<Self> {
        if radix < 2 {
            return Err(BigIntError::DomainError("radix must be >= 2"));
        }
        if value.is_zero() {
            return Ok(DigitProducer {
                state: State::SingleZero(false),
            });
        }

        let state = match classify(radix) {
            RadixShape::Exact => State::Exact {
                next_idx: Some(value.magnitude().len() - 1),
                buf: value.magnitude().clone(),
            },
            RadixShape::SmallPow2(e) | RadixShape::LargePow2(e) => {
                // Digit groups are aligned to LSB-based e-bit boundaries
                // (bit 0 starts a group), matching the consumer's
                // `acc = acc * 2^e + digit` reconstruction — not to
                // `num_bits` itself, which need not be a multiple of `e`.
                let num_bits = value.magnitude().num_bits() as i64;
                let e_bits = e as i64;
                let aligned_top = ((num_bits + e_bits - 1) / e_bits) * e_bits;
                State::Pow2 {
                    next_top_bit: aligned_top,
                    e,
                    buf: value.magnitude().clone(),
                }
            }
            RadixShape::Generic => {
                let radix_big = BigInt::from(radix);
                let mut tower = if radix == 10 {
                    TowerSource::Decimal
                } else {
                    TowerSource::Generic(Tower::new(radix_big.clone()))
                };
                let n = BigInt::from_parts(value.magnitude().clone(), true);
                let mut k = 0u32;
                loop {
                    let bk = tower.level(k);
                    if bk > n {
                        break;
                    }
                    k += 1;
                }
                State::Generic {
                    stack: vec![(n, k, 0)],
                    pending: VecDeque::new(),
                    radix: radix_big,
                    tower,
                }
            }
        };
        Ok(DigitProducer { state })
    }

    /// Yields the next digit, most significant first, or `None` once the
    /// stream is exhausted.
    pub fn next_digit(&mut self) -> Option<Digit> {
        match &mut self.state {
            State::SingleZero(done) => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(0)
                }
            }
            State::Exact { buf, next_idx } => {
                let idx = (*next_idx)?;
                let digit = buf.limb(idx) as Digit;
                *next_idx = if idx == 0 { None } else { Some(idx - 1) };
                Some(digit)
            }
            State::Pow2 { buf, e, next_top_bit } => {
                if *next_top_bit <= 0 {
                    return None;
                }
                let hi = *next_top_bit;
                let lo = (hi - *e as i64).max(0);
                let mut digit: Digit = 0;
                for bit in lo..hi {
                    if buf.get_bit(bit as usize) {
                        digit |= 1 << (bit - lo);
                    }
                }
                *next_top_bit = lo;
                Some(digit)
            }
            State::Generic {
                stack,
                pending,
                radix,
                tower,
            } => {
                while pending.is_empty() {
                    let Some((x, k, pad)) = stack.pop() else {
                        return None;
                    };
                    drive_generic_stack(x, k, pad, stack, pending, radix, tower);
                }
                pending.pop_front()
            }
        }
    }
}

/// One pop-and-process step of spec.md §4.10's generic producer
/// algorithm, pushing resolved digits into `pending` and/or further work
/// onto `stack`.
fn drive_generic_stack(
    x: BigInt,
    k: u32,
    pad: u32,
    stack: &mut Vec<(BigInt, u32, u32)>,
    pending: &mut VecDeque<Digit>,
    radix: &BigInt,
    tower: &mut TowerSource,
) {
    if x.is_zero() {
        for _ in 0..pad {
            pending.push_back(0);
        }
        return;
    }
    if &x < radix {
        if pad > 0 {
            for _ in 0..pad - 1 {
                pending.push_back(0);
            }
        }
        pending.push_back(bigint_to_digit(&x));
        return;
    }

    // Greatest j < k with B[j] <= x.
    let mut j = k - 1;
    loop {
        let bj = tower.level(j);
        if bj <= x {
            let is_equal = bj == x;
            if is_equal {
                let block_width = 1u32 << j;
                if pad > block_width {
                    for _ in 0..(pad - block_width) {
                        pending.push_back(0);
                    }
                }
                pending.push_back(1);
                for _ in 0..(block_width - 1) {
                    pending.push_back(0);
                }
            } else {
                let (q, r) = x
                    .checked_div_rem(&bj)
                    .expect("bj is nonzero by tower construction");
                let block_width = 1u32 << j;
                stack.push((r, j, block_width));
                stack.push((q, j, pad.saturating_sub(block_width)));
            }
            return;
        }
        if j == 0 {
            unreachable!("B[0] == radix <= x by the caller's x >= radix check");
        }
        j -= 1;
    }
}

fn bigint_to_digit(x: &BigInt) -> Digit {
    let slice = x.magnitude().as_slice();
    let mut bytes = [0u8; 8];
    bytes[..slice.len().min(8)].copy_from_slice(&slice[..slice.len().min(8)]);
    Digit::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(value: &BigInt, radix: u32) -> Vec<Digit> {
        let mut p = DigitProducer::new(value, radix).unwrap();
        let mut out = Vec::new();
        while let Some(d) = p.next_digit() {
            out.push(d);
        }
        out
    }

    #[test]
    fn zero_produces_single_zero_digit() {
        assert_eq!(collect(&BigInt::zero(), 10), vec![0]);
    }

    #[test]
    fn exact_radix_matches_limbs_top_to_bottom() {
        let v = BigInt::from(0x0102_0304u32);
        let digits = collect(&v, 256);
        assert_eq!(digits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn binary_radix_matches_bit_string() {
        let v = BigInt::from(0b1011u32);
        let digits = collect(&v, 2);
        assert_eq!(digits, vec![1, 0, 1, 1]);
    }

    #[test]
    fn hex_radix_matches_nibbles() {
        let v = BigInt::from(0xABCDu32);
        let digits = collect(&v, 16);
        assert_eq!(digits, vec![0xA, 0xB, 0xC, 0xD]);
    }

    #[test]
    fn decimal_radix_matches_decimal_digits() {
        let v = BigInt::from(1234567890u64);
        let digits = collect(&v, 10);
        assert_eq!(digits, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
    }

    #[test]
    fn decimal_radix_handles_trailing_zeros() {
        let v = BigInt::from(100000u64);
        let digits = collect(&v, 10);
        assert_eq!(digits, vec![1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn base_36_round_trips_through_digit_values() {
        let v = BigInt::from(36u32 * 36 + 5);
        let digits = collect(&v, 36);
        assert_eq!(digits, vec![1, 0, 5]);
    }
}
