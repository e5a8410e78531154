//! The signed [`BigInt`] value type: magnitude buffer + sign flag.
//!
//! Grounded in spec.md §4.4–§4.5. The trait-impl shape (`Add`, `Sub`,
//! `Neg`, `Ord`, ...) mirrors how `algebra-core/src/fields/models`
//! implements arithmetic traits for `Fp<P>` — idiomatic Rust operator
//! traits are the replacement for the C++ "operator overload surface"
//! spec.md §1 excludes (that exclusion names the *mechanism*, not the
//! existence of `+`/`-`/`<<`/`>>`/`==`/`<` in the language this is written
//! in).

use bigint_core::buffer::compare_raw;
use bigint_core::{BigIntError, Buffer, LIMB_BITS, MAX_LEN, Result};
use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Neg, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign};

/// A signed arbitrary-precision integer.
///
/// Invariant: if `magnitude` is zero, `sign` is `true`. There is no "null"
/// `BigInt` in user-visible state — [`BigInt::default`] is zero.
#[derive(Clone, Debug)]
pub struct BigInt {
    pub(crate) magnitude: Buffer,
    /// `true` means nonnegative.
    pub(crate) sign: bool,
}

impl BigInt {
    pub fn zero() -> Self {
        BigInt {
            magnitude: Buffer::zero(),
            sign: true,
        }
    }

    pub fn one() -> Self {
        BigInt {
            magnitude: Buffer::from_limbs(vec![1]).unwrap(),
            sign: true,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.sign && !self.is_zero()
    }

    pub fn is_nonnegative(&self) -> bool {
        self.sign
    }

    pub(crate) fn from_parts(magnitude: Buffer, sign: bool) -> Self {
        let canonical_sign = if magnitude.is_zero() { true } else { sign };
        BigInt {
            magnitude,
            sign: canonical_sign,
        }
    }

    pub(crate) fn magnitude(&self) -> &Buffer {
        &self.magnitude
    }

    pub fn num_bits(&self) -> u32 {
        self.magnitude.num_bits()
    }

    /// Compares magnitudes only, ignoring sign.
    pub(crate) fn magnitude_cmp(&self, other: &BigInt) -> Ordering {
        match compare_raw(&self.magnitude, &other.magnitude) {
            x if x < 0 => Ordering::Less,
            0 => Ordering::Equal,
            _ => Ordering::Greater,
        }
    }

    /// `self << k`. `k < 0` or `k >= MAX_LEN * LIMB_BITS` is a
    /// [`BigIntError::DomainError`]. Bits shifted beyond `MAX_LEN` limbs
    /// are silently discarded (spec.md §4.5 — a deliberate, documented
    /// choice to match the source exactly rather than the "safer"
    /// alternative of raising `OutOfRange`).
    pub fn shl(&self, k: i64) -> Result<BigInt> {
        if k < 0 {
            return Err(BigIntError::DomainError("negative shift count"));
        }
        let limit = MAX_LEN as u64 * LIMB_BITS as u64;
        if k as u64 >= limit {
            return Err(BigIntError::DomainError("shift count >= MAX_LEN * LIMB_BITS"));
        }
        let magnitude = self.magnitude.shl_bits(k as u64)?;
        Ok(BigInt::from_parts(magnitude, self.sign))
    }

    /// `self >> k`, a true right shift (spec.md §9 REDESIGN FLAG: the
    /// source's apparent `operator>>=` bug, which delegates to left-shift,
    /// is not reproduced here). `k < 0` is a `DomainError`. Shifting by at
    /// least as many bits as the value has yields zero.
    pub fn shr(&self, k: i64) -> Result<BigInt> {
        if k < 0 {
            return Err(BigIntError::DomainError("negative shift count"));
        }
        let magnitude = self.magnitude.shr_bits(k as u64);
        Ok(BigInt::from_parts(magnitude, self.sign))
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::zero()
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => self.magnitude_cmp(other),
            (false, false) => other.magnitude_cmp(self),
        }
    }
}

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt::from_parts(self.magnitude, !self.sign)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt::from_parts(self.magnitude.clone(), !self.sign)
    }
}

/// Dispatch on sign equality, per spec.md §4.4: same sign adds magnitudes;
/// opposite signs subtract the smaller from the larger and take the sign
/// of the larger.
fn add_impl(a: &BigInt, b: &BigInt) -> BigInt {
    if a.sign == b.sign {
        let magnitude = a.magnitude.add_raw(&b.magnitude).expect(
            "add_raw only fails past MAX_LEN, which BigInt addition cannot reach from two valid operands",
        );
        BigInt::from_parts(magnitude, a.sign)
    } else {
        match compare_raw(&a.magnitude, &b.magnitude) {
            cmp if cmp >= 0 => {
                let magnitude = a.magnitude.sub_raw(&b.magnitude).expect("a >= b by construction");
                BigInt::from_parts(magnitude, a.sign)
            }
            _ => {
                let magnitude = b.magnitude.sub_raw(&a.magnitude).expect("b > a by construction");
                BigInt::from_parts(magnitude, b.sign)
            }
        }
    }
}

impl Add for &BigInt {
    type Output = BigInt;
    fn add(self, rhs: &BigInt) -> BigInt {
        add_impl(self, rhs)
    }
}
impl Add for BigInt {
    type Output = BigInt;
    fn add(self, rhs: BigInt) -> BigInt {
        add_impl(&self, &rhs)
    }
}
impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        *self = add_impl(self, rhs);
    }
}
impl AddAssign for BigInt {
    fn add_assign(&mut self, rhs: BigInt) {
        *self = add_impl(self, &rhs);
    }
}

/// `x - y == x + (-y)` (spec.md §4.4).
impl Sub for &BigInt {
    type Output = BigInt;
    fn sub(self, rhs: &BigInt) -> BigInt {
        add_impl(self, &(-rhs))
    }
}
impl Sub for BigInt {
    type Output = BigInt;
    fn sub(self, rhs: BigInt) -> BigInt {
        add_impl(&self, &(-rhs))
    }
}
impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &BigInt) {
        *self = add_impl(self, &(-rhs));
    }
}
impl SubAssign for BigInt {
    fn sub_assign(&mut self, rhs: BigInt) {
        *self = add_impl(self, &(-rhs));
    }
}

impl Shl<i64> for &BigInt {
    type Output = BigInt;
    fn shl(self, k: i64) -> BigInt {
        BigInt::shl(self, k).expect("shift count out of range")
    }
}
impl ShlAssign<i64> for BigInt {
    fn shl_assign(&mut self, k: i64) {
        *self = BigInt::shl(self, k).expect("shift count out of range");
    }
}
impl Shr<i64> for &BigInt {
    type Output = BigInt;
    fn shr(self, k: i64) -> BigInt {
        BigInt::shr(self, k).expect("shift count out of range")
    }
}
impl ShrAssign<i64> for BigInt {
    fn shr_assign(&mut self, k: i64) {
        *self = BigInt::shr(self, k).expect("shift count out of range");
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> BigInt {
                    let bytes = (v as u128).to_le_bytes();
                    let magnitude = Buffer::from_limbs(bytes.to_vec()).unwrap();
                    BigInt::from_parts(magnitude, true)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> BigInt {
                    let sign = v >= 0;
                    let mag = v.unsigned_abs() as u128;
                    let bytes = mag.to_le_bytes();
                    let magnitude = Buffer::from_limbs(bytes.to_vec()).unwrap();
                    BigInt::from_parts(magnitude, sign)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);
