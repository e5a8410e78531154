//! Digit consumption (spec.md §4.11): rebuilding a [`BigInt`] magnitude
//! from a most-significant-digit-first stream.
//!
//! The exact/pow2 variants build the magnitude directly through
//! [`Buffer::shl_bits`]/`add_raw`. The generic/decimal variant implements
//! the binary-counter merge-on-push technique spec.md describes, tracking
//! each stack entry's block size explicitly alongside its value rather
//! than re-deriving merge points from `count`'s bit pattern on every push
//! — the two are equivalent by construction (see DESIGN.md), and explicit
//! sizes are far less error-prone to get right without a compiler to
//! check against.

use crate::radix::producer::Digit;
use crate::radix::{classify, RadixShape};
use crate::tower::{decimal_tower_level, Tower};
use crate::value::BigInt;
use bigint_core::{BigIntError, Buffer, Result};

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
    Exact {
        limbs: Vec<u8>,
    },
    Pow2 {
        e: u32,
        acc: Buffer,
    },
    Generic {
        /// `(value, level)`: `value` spans exactly `2^level` digits.
        stack: Vec<(BigInt, u32)>,
        tower: TowerSource,
    },
}

pub struct DigitConsumer {
    state: State,
    radix: u32,
}

impl DigitConsumer {
    /// Starts consuming digits for the given `radix` (`< 2` is a
    /// [`BigIntError::DomainError`]).
    pub fn new(radix: u32) -> Result<Self> {
        if radix < 2 {
            return Err(BigIntError::DomainError("radix must be >= 2"));
        }
        let state = match classify(radix) {
            RadixShape::Exact => State::Exact { limbs: Vec::new() },
            RadixShape::SmallPow2(e) | RadixShape::LargePow2(e) => State::Pow2 {
                e,
                acc: Buffer::zero(),
            },
            RadixShape::Generic => {
                let tower = if radix == 10 {
                    TowerSource::Decimal
                } else {
                    TowerSource::Generic(Tower::new(BigInt::from(radix)))
                };
                State::Generic {
                    stack: Vec::new(),
                    tower,
                }
            }
        };
        Ok(DigitConsumer { state, radix })
    }

    /// Feeds one digit, most significant first. `digit >= radix` is a
    /// [`BigIntError::DomainError`].
    pub fn read_digit(&mut self, digit: Digit) -> Result<()> {
        if digit >= self.radix as Digit {
            return Err(BigIntError::DomainError("digit out of range for radix"));
        }
        match &mut self.state {
            State::Exact { limbs } => {
                limbs.push(digit as u8);
            }
            State::Pow2 { e, acc } => {
                let shifted = acc.shl_bits(*e as u64)?;
                let digit_buf = Buffer::from_limbs(digit.to_le_bytes().to_vec())?;
                *acc = shifted.add_raw(&digit_buf)?;
            }
            State::Generic { stack, tower } => {
                let mut value = BigInt::from(digit);
                let mut level = 0u32;
                while let Some(&(_, top_level)) = stack.last() {
                    if top_level != level {
                        break;
                    }
                    let (older, _) = stack.pop().unwrap();
                    let b = tower.level(level);
                    let product = &older * &b;
                    value = &product + &value;
                    level += 1;
                }
                stack.push((value, level));
            }
        }
        Ok(())
    }

    /// Finalizes the accumulated digits into a magnitude.
    pub fn finish(self) -> Result<Buffer> {
        match self.state {
            State::Exact { mut limbs } => {
                limbs.reverse();
                Buffer::from_limbs(limbs)
            }
            State::Pow2 { acc, .. } => Ok(acc),
            State::Generic { stack, mut tower } => {
                if stack.is_empty() {
                    return Ok(Buffer::zero());
                }
                let mut iter = stack.into_iter().rev();
                let (mut result, _) = iter.next().expect("checked non-empty above");
                for (value, level) in iter {
                    let b = tower.level(level);
                    let product = &result * &b;
                    result = &product + &value;
                }
                Ok(result.magnitude().clone())
            }
        }
    }
}
