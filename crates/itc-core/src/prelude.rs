//! ITC prelude.
//!
//! Curated re-exports for actors that carry a clock.

pub use crate::codec::{decode_stamp, encode_stamp, parse_stamp};
pub use crate::{CausalOrder, DecodeLimits, Event, Id, ItcError, Stamp};
