//! # ITC Core - Interval Tree Clocks
//!
//! Logical clocks for a dynamically changing set of actors. Each actor holds
//! a [`Stamp`]: an [`Id`] describing its share of the identity space and an
//! [`Event`] tree describing the causal history it has seen.
//!
//! ## Operations
//!
//! - [`Stamp::seed`]: the first actor's clock
//! - [`Stamp::fork`]: split identity to spawn a sibling actor
//! - [`Stamp::event`]: inflate before recording a local event
//! - [`Stamp::peek`]: identity-less snapshot for messages
//! - [`Stamp::join`]: merge a received clock
//! - [`Stamp::leq`] / [`Stamp::causal_order`]: compare histories
//!
//! ## Laws
//!
//! - `Event::join` is a join-semilattice: commutative, associative,
//!   idempotent on normal form, and `a ≤ a ⊔ b`
//! - `Event::leq` is a partial order
//! - `s ≤ s.event()` strictly for every stamp that owns identity
//! - `fork` yields disjoint ids summing to the original
//!
//! ```
//! use itc_core::Stamp;
//!
//! let (alice, bob) = Stamp::seed().fork();
//! let alice = alice.event()?;
//! let bob = bob.event()?;
//! assert!(alice.is_concurrent_with(&bob));
//!
//! let merged = alice.join(&bob)?;
//! assert!(alice.leq(&merged) && bob.leq(&merged));
//! assert_eq!(merged.to_string(), "(1,1)");
//! # Ok::<(), itc_core::ItcError>(())
//! ```

#![forbid(unsafe_code)]

/// Text and binary encodings
pub mod codec;

/// Decoder limits
pub mod config;

/// Unified error handling
pub mod errors;

/// Causal history trees
pub mod event;

/// Identity ownership trees
pub mod id;

/// Causal ordering between histories
pub mod order;

/// Curated re-exports
pub mod prelude;

/// Actor clocks
pub mod stamp;

mod serde_impls;

pub use config::DecodeLimits;
pub use errors::{ItcError, Result};
pub use event::Event;
pub use id::Id;
pub use order::CausalOrder;
pub use stamp::{Stamp, LEAF_SPLIT_COST};
