//! A signed arbitrary-precision integer built on `bigint-core`'s NTT: the
//! public [`BigInt`] value type, its NTT-backed multiplication engine,
//! Newton-inverse + Barrett-reduction division, radix-conversion digit
//! streams, and text I/O.
//!
//! Mirrors the split between `algebra-core` (field/bigint internals) and
//! `ff-fft` (the layer that consumes them) — here, `bigint-core` plays
//! the `algebra-core` role and this crate plays `ff-fft`'s.

pub mod barrett;
pub mod div;
pub mod io;
pub mod mul;
pub mod newton;
pub mod radix;
pub mod tower;
pub mod value;

pub use bigint_core::{BigIntError, Result};
pub use io::parse_literal;
pub use radix::{DigitConsumer, DigitProducer};
pub use value::BigInt;

impl BigInt {
    /// A streaming, most-significant-digit-first view of this value's
    /// magnitude in `radix` (spec.md §6 `get_digit_producer`).
    pub fn get_digit_producer(&self, radix: u32) -> Result<DigitProducer> {
        DigitProducer::new(self, radix)
    }

    /// A streaming sink for digits of the given `radix`, finalizable into
    /// a `BigInt` (spec.md §6 `get_digit_consumer`). `sign` applies to
    /// the value once assembled; the consumer itself only ever builds an
    /// unsigned magnitude.
    pub fn get_digit_consumer(radix: u32) -> Result<DigitConsumer> {
        DigitConsumer::new(radix)
    }

    /// Finalizes a digit consumer into a signed `BigInt`.
    pub fn from_digit_consumer(consumer: DigitConsumer, sign: bool) -> Result<BigInt> {
        Ok(BigInt::from_parts(consumer.finish()?, sign))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use crate::value::BigInt;
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BigInt {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for BigInt {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse::<BigInt>().map_err(DeError::custom)
        }
    }
}

#[cfg(test)]
mod integration_smoke {
    use super::*;

    #[test]
    fn producer_consumer_round_trip_through_public_api() {
        let value = BigInt::from(123456789i64);
        let mut producer = value.get_digit_producer(16).unwrap();
        let mut consumer = BigInt::get_digit_consumer(16).unwrap();
        while let Some(d) = producer.next_digit() {
            consumer.read_digit(d).unwrap();
        }
        let rebuilt = BigInt::from_digit_consumer(consumer, true).unwrap();
        assert_eq!(rebuilt, value);
    }
}
