//! The NTT-friendly prime field `F_p`, `p = 15 * 2^27 + 1`.
//!
//! Grounded in `algebra-core/src/fields/arithmetic.rs`'s `adc`/`sbb`/
//! `mac_with_carry` carry-propagation idiom, specialized to a single fixed
//! modulus instead of a generic Montgomery-form field family — this crate
//! has exactly one field, so there is no need for the teacher's
//! const-generic-over-the-modulus machinery.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

/// The NTT prime: `p = 15 * 2^27 + 1 = 2013265921`.
pub const P: u32 = 2_013_265_921;

/// `log2` of the largest power-of-two order for which a root of unity
/// exists in this field.
pub const PRI_ORDER_LOG: u32 = 27;

/// `2^27`, the order of [`OMEGA`].
pub const PRI_ORDER: u64 = 1 << PRI_ORDER_LOG;

/// A generator of the order-`2^27` subgroup (`31^15 mod p`).
pub const OMEGA: u32 = 440_564_289;

/// `2^{-1} mod p`.
pub const INV2: u32 = 1_006_632_961;

/// An element of `Z/pZ`, always kept in `[0, p)`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Fp(u32);

impl Fp {
    pub const ZERO: Fp = Fp(0);
    pub const ONE: Fp = Fp(1);

    /// Wraps `x`, reducing mod `p` if necessary.
    #[inline]
    pub fn new(x: u32) -> Self {
        Fp(if x >= P { x - P } else { x })
    }

    /// Builds directly from a value already known to be `< p`.
    #[inline]
    pub fn from_reduced(x: u32) -> Self {
        debug_assert!(x < P);
        Fp(x)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Square-and-multiply exponentiation, `self^k`.
    pub fn pow(self, mut k: u64) -> Fp {
        let mut base = self;
        let mut acc = Fp::ONE;
        while k > 0 {
            if k & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            k >>= 1;
        }
        acc
    }

    /// The principal `n`-th root of unity, `n` a power of two dividing
    /// `2^27`. Panics (an internal invariant, not a user-facing error) if
    /// `n` is not such a power of two.
    pub fn principal_root(n: u64) -> Fp {
        assert!(n.is_power_of_two() && n <= PRI_ORDER, "n must divide 2^27");
        Fp::new(OMEGA).pow(PRI_ORDER / n)
    }

    /// `n^{-1} mod p` for `n` a power of two dividing `2^27`, computed as
    /// `(2^{-1})^{log2 n}` per spec.md §4.2.
    pub fn inv_pow2(log_n: u32) -> Fp {
        Fp::new(INV2).pow(log_n as u64)
    }
}

impl Add for Fp {
    type Output = Fp;
    #[inline]
    fn add(self, rhs: Fp) -> Fp {
        let sum = self.0 + rhs.0;
        Fp(if sum >= P { sum - P } else { sum })
    }
}

impl Sub for Fp {
    type Output = Fp;
    #[inline]
    fn sub(self, rhs: Fp) -> Fp {
        Fp(if self.0 >= rhs.0 {
            self.0 - rhs.0
        } else {
            P - (rhs.0 - self.0)
        })
    }
}

impl Neg for Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp {
        if self.0 == 0 {
            self
        } else {
            Fp(P - self.0)
        }
    }
}

impl Mul for Fp {
    type Output = Fp;
    #[inline]
    fn mul(self, rhs: Fp) -> Fp {
        let wide = (self.0 as u64) * (rhs.0 as u64);
        Fp((wide % P as u64) as u32)
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.0)
    }
}
