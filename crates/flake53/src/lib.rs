//! # flake53
//!
//! Compact, time-ordered, unique 53-bit identifiers for distributed use
//! without central coordination. Every ID fits in an `f64` without
//! precision loss, so values survive a round-trip through JavaScript,
//! JSON-parsing-as-double, and anything else limited to 53-bit integers.
//!
//! An ID packs three fields, MSB to LSB: 32 bits of seconds since a
//! configurable epoch, a 16-bit per-second sequence, and a 5-bit node id.
//! One [`FlakeGenerator`] per node hands out IDs under a single lock;
//! when a second's sequence space is exhausted it borrows the next second
//! rather than blocking, so generation is always O(1) and never fails.
//!
//! ## Example
//!
//! ```
//! use flake53::{FlakeGenerator, encode_radix, DEFAULT_RADIX};
//!
//! let generator = FlakeGenerator::new(1);
//!
//! let id = generator.next_id();
//! let parts = generator.decode(id);
//! assert_eq!(parts.node, 1);
//!
//! // Compact text form for transport.
//! let text = encode_radix(id, DEFAULT_RADIX).unwrap();
//! assert!(text.len() <= 11);
//! ```
//!
//! ## Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Flake`] as its raw integer,
//!   validating the 53-bit range on the way in.
//! - `tracing`: trace-level instrumentation of generator operations.

mod error;
mod generator;
mod human;
mod id;
mod radix;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::human::*;
pub use crate::id::*;
pub use crate::radix::*;
pub use crate::time::*;
