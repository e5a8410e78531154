use core::fmt;

/// The closed set of failure kinds the core can raise.
///
/// Modeled on `algebra-core::serialize::error::SerializationError`: a plain
/// enum with hand-written `Display`, no `thiserror`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigIntError {
    /// Magnitude growth would exceed `MAX_LEN` limbs, or a shift count is
    /// `>= MAX_LEN * LIMB_BITS`.
    OutOfRange(&'static str),
    /// Negative shift count, division/modulus by zero, or an invalid radix.
    DomainError(&'static str),
    /// `subRaw` preconditions were violated: `self < other`. Never surfaces
    /// under correct core logic; a bug in a caller if it does.
    Underflow(&'static str),
    /// Text input parsing failed (grouping mismatch, sign with no digits,
    /// empty body, digit out of range for the given radix).
    InputFailure(&'static str),
}

impl fmt::Display for BigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigIntError::OutOfRange(msg) => write!(f, "out of range: {}", msg),
            BigIntError::DomainError(msg) => write!(f, "domain error: {}", msg),
            BigIntError::Underflow(msg) => write!(f, "underflow (internal bug): {}", msg),
            BigIntError::InputFailure(msg) => write!(f, "input failure: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BigIntError {}

pub type Result<T> = core::result::Result<T, BigIntError>;
