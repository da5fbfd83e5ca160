/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `flake53` can produce.
///
/// Identifier generation itself is infallible; errors only arise from the
/// text codecs ([`radix`](crate::parse_radix) and
/// [`human`](crate::parse_human)) and from deserializing out-of-range raw
/// values. Callers that prefer the permissive zero-on-failure contract can
/// use the `*_lossy` variants instead of matching on these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested radix is outside the supported `2..=36` range.
    #[error("radix {radix} is out of range, expected 2..=36")]
    RadixOutOfRange { radix: u32 },

    /// A byte in the input is not a digit of the given radix.
    #[error("invalid digit {byte:#04x} at index {index} for radix {radix}")]
    InvalidDigit { byte: u8, index: usize, radix: u32 },

    /// The input was empty where at least one digit is required.
    #[error("empty id string")]
    EmptyInput,

    /// The value does not fit in the 53-bit id space.
    #[error("value exceeds the 53-bit id space")]
    Overflow,

    /// The human-readable form must be exactly 21 ascii characters.
    #[error("human-readable id must be 21 ascii characters, got {len} bytes")]
    MalformedHuman { len: usize },

    /// The 14-digit timestamp prefix does not name a valid local time.
    #[error("invalid timestamp in human-readable id")]
    InvalidHumanTimestamp,

    /// A zero-padded numeric field of the human-readable form failed to
    /// parse.
    #[error("invalid {field} field in human-readable id")]
    InvalidHumanField { field: &'static str },
}
