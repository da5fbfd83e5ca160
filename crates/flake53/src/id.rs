use crate::error::{Error, Result};
use core::fmt;

/// A packed 53-bit identifier.
///
/// The value always fits in an `f64` without precision loss, which keeps it
/// usable as a plain `Number` in JavaScript and other double-precision
/// environments.
///
/// ## Bit layout
///
/// The ID is packed from **MSB to LSB**:
///
/// ```text
///  Bit Index:  high bits                          low bits
///              +--------------+---------------+----------+
///  Field:      | seconds (32) | sequence (16) | node (5) |
///              +--------------+---------------+----------+
///              |<---- MSB ---- 53 bits ------- LSB ----->|
/// ```
///
/// The seconds field is relative to a generator-configured epoch; the raw
/// value carries no epoch of its own, so decoding an ID produced under a
/// different epoch or node width yields meaningless components.
///
/// `Flake` orders exactly like its raw integer. Because seconds occupy the
/// highest bits, IDs from one generator sort by creation time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flake {
    id: u64,
}

const _: () = {
    // Compile-time check: the packed width must stay within the f64
    // safe-integer range.
    assert!(
        Flake::TIMESTAMP_BITS + Flake::SEQUENCE_BITS + Flake::NODE_BITS <= 53,
        "Flake layout exceeds the 53-bit safe-integer range"
    );
};

impl Flake {
    pub const TIMESTAMP_BITS: u32 = 32;
    pub const SEQUENCE_BITS: u32 = 16;
    pub const NODE_BITS: u32 = 5;

    pub const NODE_SHIFT: u32 = 0;
    pub const SEQUENCE_SHIFT: u32 = Self::NODE_SHIFT + Self::NODE_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;

    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;
    pub const NODE_MASK: u64 = (1 << Self::NODE_BITS) - 1;

    /// Largest raw value a `Flake` can hold (`2^53 - 1`).
    pub const MAX_RAW: u64 =
        (1 << (Self::TIMESTAMP_BITS + Self::SEQUENCE_BITS + Self::NODE_BITS)) - 1;

    /// Packs epoch-relative seconds, a sequence number, and a node id into a
    /// single identifier.
    ///
    /// Each component is masked to its field width before shifting;
    /// out-of-range values truncate silently rather than erroring.
    pub const fn from_components(seconds: u64, sequence: u64, node: u64) -> Self {
        let t = (seconds & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let q = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        let n = (node & Self::NODE_MASK) << Self::NODE_SHIFT;
        Self { id: t | q | n }
    }

    /// Extracts the epoch-relative seconds field.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the per-second sequence field.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Extracts the node field.
    pub const fn node(&self) -> u64 {
        (self.id >> Self::NODE_SHIFT) & Self::NODE_MASK
    }

    /// Returns the maximum representable seconds value.
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum representable sequence value.
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable node value.
    pub const fn max_node() -> u64 {
        Self::NODE_MASK
    }

    /// Converts this identifier into its raw integer representation.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw integer into an identifier, masking to 53 bits.
    ///
    /// Every 53-bit value maps to some `(seconds, sequence, node)` triple,
    /// so this cannot fail; higher bits are discarded. Use
    /// [`Self::try_from_raw`] to reject out-of-range input instead.
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            id: raw & Self::MAX_RAW,
        }
    }

    /// Converts a raw integer into an identifier, rejecting values wider
    /// than 53 bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if `raw` exceeds [`Self::MAX_RAW`].
    pub fn try_from_raw(raw: u64) -> Result<Self> {
        if raw > Self::MAX_RAW {
            return Err(Error::Overflow);
        }
        Ok(Self { id: raw })
    }
}

/// The unpacked components of a [`Flake`], with seconds resolved to an
/// absolute Unix timestamp.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlakeParts {
    /// Absolute Unix seconds (field value plus the generator's epoch).
    pub seconds: u64,
    /// Per-second sequence number.
    pub sequence: u64,
    /// Node id.
    pub node: u64,
}

impl fmt::Display for Flake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for Flake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flake")
            .field("raw", &format_args!("{} ({:#x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("node", &self.node())
            .finish()
    }
}
