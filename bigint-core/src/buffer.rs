//! The little-endian base-`2^8` magnitude buffer and its raw primitives.
//!
//! Grounded in `algebra-core/src/biginteger/mod.rs`'s `BigInteger` trait
//! (`add_nocarry`/`sub_noborrow`/`mul2`/`div2`/`muln`/`divn`/`num_bits`/
//! `get_bit`) and its `arithmetic::{adc, sbb}` carry helpers, generalized
//! from the teacher's fixed-width `[u64; N]` array to a growable,
//! capacity-rounded-to-power-of-two `Vec<u8>` per spec.md §4.3.

use crate::error::{BigIntError, Result};
use log::trace;

/// Limb width in bits. Chosen (spec.md §3) so limb×limb fits a 32-bit NTT
/// field element with headroom for accumulation.
pub const LIMB_BITS: u32 = 8;

/// Upper bound on the limb count of any buffer.
pub const MAX_LEN: usize = 32768;

/// A little-endian base-`2^8` magnitude: `limbs[0]` is least significant.
///
/// Invariants (spec.md §3): `limbs.len()` (the capacity) is always a power
/// of two, `len <= cap <= MAX_LEN`, and the highest meaningful limb is
/// nonzero unless `len == 1` (the canonical zero representation).
#[derive(Clone, Debug, Eq)]
pub struct Buffer {
    limbs: Vec<u8>,
    len: usize,
}

impl Buffer {
    /// The canonical representation of zero: one limb, value 0.
    pub fn zero() -> Self {
        Buffer {
            limbs: vec![0u8],
            len: 1,
        }
    }

    /// The value one.
    pub fn one() -> Self {
        Buffer {
            limbs: vec![1u8],
            len: 1,
        }
    }

    /// Builds a buffer from little-endian limbs, normalizing capacity and
    /// trimming trailing zeros (but keeping at least one limb).
    pub fn from_limbs(mut limbs: Vec<u8>) -> Result<Self> {
        if limbs.is_empty() {
            limbs.push(0);
        }
        let mut len = limbs.len();
        while len > 1 && limbs[len - 1] == 0 {
            len -= 1;
        }
        let mut buf = Buffer { limbs, len };
        buf.resize_cap(len)?;
        Ok(buf)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.limbs.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.len == 1 && self.limbs[0] == 0
    }

    /// The meaningful limbs, little-endian.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.limbs[..self.len]
    }

    #[inline]
    pub fn limb(&self, i: usize) -> u8 {
        if i < self.len {
            self.limbs[i]
        } else {
            0
        }
    }

    /// Number of bits needed to encode this value (0 for the zero value).
    pub fn num_bits(&self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        let top = self.limbs[self.len - 1];
        (self.len as u32 - 1) * LIMB_BITS + (8 - top.leading_zeros())
    }

    pub fn get_bit(&self, i: usize) -> bool {
        let limb_idx = i / LIMB_BITS as usize;
        let bit_idx = i % LIMB_BITS as usize;
        if limb_idx >= self.len {
            false
        } else {
            (self.limbs[limb_idx] >> bit_idx) & 1 == 1
        }
    }

    /// Ensures `cap` is a power of two `>= new_len`, growing or shrinking
    /// the backing storage in place when the rounded capacity is
    /// unchanged, reallocating otherwise. Does not change `len`.
    fn resize_cap(&mut self, new_len: usize) -> Result<()> {
        if new_len > MAX_LEN {
            return Err(BigIntError::OutOfRange("magnitude would exceed MAX_LEN limbs"));
        }
        let new_cap = new_len.max(1).next_power_of_two().min(MAX_LEN.next_power_of_two());
        if new_cap != self.limbs.len() {
            let mut grown = vec![0u8; new_cap];
            let keep = self.limbs.len().min(new_cap);
            grown[..keep].copy_from_slice(&self.limbs[..keep]);
            self.limbs = grown;
            trace!("buffer resized capacity to {}", new_cap);
        }
        Ok(())
    }

    /// `resize` per spec.md §4.3: sets the meaningful length to `new_len`,
    /// zero-filling any growth, failing if `new_len > MAX_LEN`.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.resize_cap(new_len)?;
        if new_len > self.len {
            for limb in &mut self.limbs[self.len..new_len] {
                *limb = 0;
            }
        }
        self.len = new_len.max(1);
        Ok(())
    }

    /// Drops trailing zero limbs, never taking `len` below 1.
    pub fn shrink_to_fit(&mut self) {
        while self.len > 1 && self.limbs[self.len - 1] == 0 {
            self.len -= 1;
        }
    }

    /// Limb-wise addition of `other` into a copy of `self`, followed by
    /// carry propagation. Spec.md §4.3 `addRaw`.
    pub fn add_raw(&self, other: &Buffer) -> Result<Buffer> {
        let out_len = self.len.max(other.len) + 1;
        let mut result = self.clone();
        result.resize(out_len)?;

        let mut carry: u16 = 0;
        for i in 0..out_len {
            let sum = result.limbs[i] as u16 + other.limb(i) as u16 + carry;
            result.limbs[i] = (sum & 0xff) as u8;
            carry = sum >> 8;
        }
        debug_assert_eq!(carry, 0, "carry must be absorbed by the extra limb");
        result.shrink_to_fit();
        Ok(result)
    }

    /// Limb-wise subtraction, requiring `self >= other` (spec.md §4.3
    /// `subRaw`). Returns `Underflow` if that precondition is violated.
    pub fn sub_raw(&self, other: &Buffer) -> Result<Buffer> {
        if compare_raw(self, other) < 0 {
            return Err(BigIntError::Underflow("sub_raw requires self >= other"));
        }
        let mut result = self.clone();
        let mut borrow: i16 = 0;
        for i in 0..result.len {
            let diff = result.limbs[i] as i16 - other.limb(i) as i16 - borrow;
            if diff < 0 {
                result.limbs[i] = (diff + 256) as u8;
                borrow = 1;
            } else {
                result.limbs[i] = diff as u8;
                borrow = 0;
            }
        }
        if borrow != 0 {
            return Err(BigIntError::Underflow("final borrow nonzero after sub_raw"));
        }
        result.shrink_to_fit();
        Ok(result)
    }

    /// Normalizes an arbitrary-width accumulator (each entry conceptually
    /// unbounded, not just `< 256`) into a proper base-256 [`Buffer`],
    /// sweeping low to high and extending length for residual carry. Used
    /// by the multiplication engine to turn NTT convolution output (whose
    /// entries can be much larger than a limb) back into limbs.
    pub fn from_wide_digits(mut digits: Vec<u64>) -> Result<Buffer> {
        let mut carry: u64 = 0;
        let mut i = 0;
        while i < digits.len() || carry != 0 {
            if i == digits.len() {
                digits.push(0);
            }
            let total = digits[i] + carry;
            digits[i] = total & 0xff;
            carry = total >> 8;
            i += 1;
            if digits.len() > MAX_LEN && carry != 0 {
                return Err(BigIntError::OutOfRange("carry propagation exceeded MAX_LEN"));
            }
        }
        let limbs: Vec<u8> = digits.into_iter().map(|d| d as u8).collect();
        Buffer::from_limbs(limbs)
    }

    /// Raw left shift by `bits` (no sign, no domain checks — the caller,
    /// [`crate`]'s consumer in the `bigint` crate, validates the shift
    /// count). Bits shifted beyond `MAX_LEN * LIMB_BITS` are discarded per
    /// spec.md §4.5.
    pub fn shl_bits(&self, bits: u64) -> Result<Buffer> {
        if self.is_zero() || bits == 0 {
            return Ok(self.clone());
        }
        let limb_shift = (bits / LIMB_BITS as u64) as usize;
        let bit_shift = (bits % LIMB_BITS as u64) as u32;

        let new_len = (self.len + limb_shift + 1).min(MAX_LEN);
        let mut limbs = vec![0u8; new_len];
        for i in 0..self.len {
            let dst = i + limb_shift;
            if dst >= new_len {
                break;
            }
            let val = (self.limbs[i] as u16) << bit_shift;
            limbs[dst] = limbs[dst].wrapping_add((val & 0xff) as u8);
            if dst + 1 < new_len {
                limbs[dst + 1] = limbs[dst + 1].wrapping_add((val >> 8) as u8);
            }
        }
        Buffer::from_limbs(limbs)
    }

    /// Raw right shift by `bits`. Shifting by more bits than the value has
    /// yields the zero buffer.
    pub fn shr_bits(&self, bits: u64) -> Buffer {
        if bits == 0 {
            return self.clone();
        }
        let limb_shift = (bits / LIMB_BITS as u64) as usize;
        let bit_shift = (bits % LIMB_BITS as u64) as u32;
        if limb_shift >= self.len {
            return Buffer::zero();
        }

        let src_len = self.len - limb_shift;
        let mut limbs = vec![0u8; src_len];
        for i in 0..src_len {
            let lo = (self.limbs[i + limb_shift] as u16) >> bit_shift;
            let hi = if bit_shift == 0 || i + limb_shift + 1 >= self.len {
                0
            } else {
                (self.limbs[i + limb_shift + 1] as u16) << (8 - bit_shift)
            };
            limbs[i] = ((lo | hi) & 0xff) as u8;
        }
        Buffer::from_limbs(limbs).expect("shrinking a buffer never exceeds MAX_LEN")
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        compare_raw(self, other) == 0
    }
}

/// By length first, then lexicographically from the top limb. Spec.md
/// §4.3 `compareRaw`.
pub fn compare_raw(a: &Buffer, b: &Buffer) -> i32 {
    if a.len != b.len {
        return if a.len < b.len { -1 } else { 1 };
    }
    for i in (0..a.len).rev() {
        if a.limbs[i] != b.limbs[i] {
            return if a.limbs[i] < b.limbs[i] { -1 } else { 1 };
        }
    }
    0
}
