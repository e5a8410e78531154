//! Radix conversion: turning a [`crate::value::BigInt`] magnitude into a
//! digit stream and back (spec.md §4.10–§4.11).

pub mod consumer;
pub mod producer;

pub use consumer::DigitConsumer;
pub use producer::DigitProducer;

/// The four closed variants spec.md §4.10/§4.11 dispatch over, shared by
/// both the producer and consumer sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RadixShape {
    /// `radix == 2^LIMB_BITS`: one digit per limb exactly.
    Exact,
    /// `radix == 2^e`, `0 < e < LIMB_BITS`.
    SmallPow2(u32),
    /// `radix == 2^e`, `e > LIMB_BITS`.
    LargePow2(u32),
    /// Anything not a power of two (decimal included).
    Generic,
}

pub(crate) fn classify(radix: u32) -> RadixShape {
    if radix.is_power_of_two() {
        let e = radix.trailing_zeros();
        match e.cmp(&bigint_core::LIMB_BITS) {
            core::cmp::Ordering::Equal => RadixShape::Exact,
            core::cmp::Ordering::Less => RadixShape::SmallPow2(e),
            core::cmp::Ordering::Greater => RadixShape::LargePow2(e),
        }
    } else {
        RadixShape::Generic
    }
}
