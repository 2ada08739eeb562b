//! Text and binary encodings for ids, event trees and stamps
//!
//! # Text form
//!
//! ```text
//! stamp := "(" id "," event ")"
//! id    := "0" | "1" | "(" id "," id ")"
//! event := uint | "(" uint "," event "," event ")"
//! ```
//!
//! No whitespace is accepted. The text form is what `Display` prints and what
//! `FromStr` and the serde impls read.
//!
//! # Binary form
//!
//! Bit packed, most significant bit first, zero padded to a byte boundary.
//! See [`binary`] for the layout.
//!
//! Both decoders rebuild trees exactly as written, without normalizing, and
//! enforce [`DecodeLimits`](crate::config::DecodeLimits).

pub mod binary;
pub mod text;

pub use binary::{decode_event, decode_id, decode_stamp, encode_event, encode_id, encode_stamp};
pub use text::{parse_event, parse_id, parse_stamp};
