//! Modular field arithmetic, the radix-2 NTT engine, and the raw
//! digit-buffer primitives that back the `bigint` crate.
//!
//! This crate has no notion of sign, radix, or division — it is pure
//! limb-buffer mechanics (`buffer`) and the one finite field
//! (`fp::Fp`, `p = 2013265921`) the NTT (`ntt`) runs over. See
//! `bigint::value::BigInt` for the signed, user-facing type built on top.
//!
//! The `std` feature is on by default. A full `no_std` + `alloc` build is
//! structurally straightforward (every hot path is `Vec<u8>`-backed, no
//! std-only types) but is not wired up yet — see DESIGN.md.

pub mod buffer;
pub mod error;
pub mod fp;
pub mod ntt;

pub use buffer::{Buffer, LIMB_BITS, MAX_LEN};
pub use error::{BigIntError, Result};
pub use fp::Fp;
