//! Stamps: the clock value held by one actor
//!
//! A [`Stamp`] pairs an [`Id`] with an [`Event`] tree. Actors start from
//! [`Stamp::seed`], inflate with [`Stamp::event`] before recording a local
//! occurrence, hand out identity with [`Stamp::fork`], publish history with
//! [`Stamp::peek`] and fold in received history with [`Stamp::join`].
//!
//! Stamps are immutable values; every operation returns a new stamp and
//! shares unchanged subtrees with its input.

use std::borrow::Cow;
use std::cmp;
use std::sync::Arc;

use crate::errors::{ItcError, Result};
use crate::event::{split_leaf, Event};
use crate::id::Id;

/// Extra cost charged when growth has to split an event leaf into a node.
///
/// Large enough that growing inside existing structure always wins over
/// introducing a new node.
pub const LEAF_SPLIT_COST: u64 = 1000;

/// An actor's logical clock: identity share plus causal history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stamp {
    id: Id,
    event: Event,
}

impl Stamp {
    /// Sole owner of the identity space with an empty history
    pub fn seed() -> Self {
        Self {
            id: Id::One,
            event: Event::zero(),
        }
    }

    /// Assemble a stamp from its parts
    pub fn new(id: Id, event: Event) -> Self {
        Self { id, event }
    }

    /// Identity share
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Causal history
    pub fn event_tree(&self) -> &Event {
        &self.event
    }

    /// Split into identity share and history
    pub fn into_parts(self) -> (Id, Event) {
        (self.id, self.event)
    }

    /// True if this stamp owns no identity and may only observe history
    pub fn is_anonymous(&self) -> bool {
        self.id.is_zero()
    }

    /// Normalize both the identity and the history trees
    pub fn normalize(&self) -> Self {
        Self {
            id: self.id.normalize(),
            event: self.event.normalize(),
        }
    }

    /// Happened-before-or-equal, decided on history alone
    pub fn leq(&self, other: &Stamp) -> bool {
        self.event.leq(&other.event)
    }

    /// Split identity into two disjoint shares that both keep this history
    pub fn fork(&self) -> (Stamp, Stamp) {
        let (left, right) = self.id.split();
        (
            Self::new(left, self.event.clone()),
            Self::new(right, self.event.clone()),
        )
    }

    /// Anonymous copy of this history, safe to put in a message
    pub fn peek(&self) -> Stamp {
        Self::new(Id::Zero, self.event.clone())
    }

    /// Inflate the history to record a new local event.
    ///
    /// Prefers filling owned parts of the tree up to history that is already
    /// known elsewhere; only grows the tree when filling gains nothing.
    /// Works on the normal form of both trees, so decoded stamps written in
    /// any shape inflate the same way as their canonical equivalents.
    pub fn event(&self) -> Result<Stamp> {
        if self.id.owns_nothing() {
            return Err(ItcError::AnonymousInflate);
        }
        self.check_headroom()?;

        let stamp = self.normal_form();
        let filled = fill(&stamp.id, &stamp.event);
        if !filled.leq(&stamp.event) {
            tracing::trace!(stamp = %self, filled = %filled, "inflated by fill");
            return Ok(Self::new(stamp.id.clone(), filled));
        }

        let (grown, cost) = stamp.grow_normal()?;
        tracing::trace!(stamp = %self, grown = %grown, cost, "inflated by grow");
        Ok(Self::new(stamp.id.clone(), grown))
    }

    /// Merge another stamp's identity and history into this one.
    ///
    /// Fails with [`ItcError::Overlap`] if the two identities are not
    /// disjoint.
    pub fn join(&self, other: &Stamp) -> Result<Stamp> {
        let id = self.id.sum(&other.id)?;
        Ok(Self::new(id, self.event.join(&other.event)))
    }

    /// Record an event and produce the message payload announcing it.
    ///
    /// Returns the inflated stamp to keep and an anonymous stamp to send.
    pub fn send(&self) -> Result<(Stamp, Stamp)> {
        let next = self.event()?;
        let message = next.peek();
        Ok((next, message))
    }

    /// Fold a received message into this stamp and record the receipt
    pub fn receive(&self, message: &Stamp) -> Result<Stamp> {
        self.join(message)?.event()
    }

    /// Merge two stamps and split the result back into two shares
    pub fn sync(&self, other: &Stamp) -> Result<(Stamp, Stamp)> {
        Ok(self.join(other)?.fork())
    }

    /// Raise owned parts of the history as far as already-known history
    /// allows, without adding tree nodes
    pub fn fill(&self) -> Event {
        fill(&self.id, &self.event)
    }

    /// Increment one leaf of the history, choosing the cheapest position.
    ///
    /// Returns the grown tree together with its cost. Fails with
    /// [`ItcError::CounterOverflow`] if a count is already at `u64::MAX`, and
    /// with [`ItcError::Malformed`] if the identity does not fit the tree.
    pub fn grow(&self) -> Result<(Event, u64)> {
        self.check_headroom()?;
        self.normal_form().grow_normal()
    }

    fn grow_normal(&self) -> Result<(Event, u64)> {
        grow(&self.id, &self.event).ok_or_else(|| ItcError::Malformed {
            stamp: self.to_string(),
        })
    }

    /// Borrow `self` if both trees are already canonical
    fn normal_form(&self) -> Cow<'_, Stamp> {
        if self.id.is_normalized() && self.event.is_normalized() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.normalize())
        }
    }

    /// Inflation raises the largest count by at most one, so it is safe
    /// whenever that count is below `u64::MAX`.
    fn check_headroom(&self) -> Result<()> {
        match self.event.checked_max() {
            Some(max) if max < u64::MAX => Ok(()),
            _ => Err(ItcError::CounterOverflow {
                stamp: self.to_string(),
            }),
        }
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Self::seed()
    }
}

fn fill(id: &Id, event: &Event) -> Event {
    match (id, event) {
        (Id::Zero, _) => event.clone(),
        (Id::One, _) => Event::Leaf(event.max()),
        (Id::Node(..), Event::Leaf(_)) => event.clone(),
        (Id::Node(il, ir), Event::Node(n, el, er)) if il.is_one() => {
            let er = fill(ir, er);
            let el = Event::Leaf(cmp::max(el.max(), er.min()));
            Event::node(*n, el, er)
        }
        (Id::Node(il, ir), Event::Node(n, el, er)) if ir.is_one() => {
            let el = fill(il, el);
            let er = Event::Leaf(cmp::max(er.max(), el.min()));
            Event::node(*n, el, er)
        }
        (Id::Node(il, ir), Event::Node(n, el, er)) => Event::node(*n, fill(il, el), fill(ir, er)),
    }
}

fn grow(id: &Id, event: &Event) -> Option<(Event, u64)> {
    match (id, event) {
        (Id::One, Event::Leaf(n)) => Some((Event::Leaf(n + 1), 0)),
        (_, Event::Leaf(n)) => {
            let (grown, cost) = grow(id, &split_leaf(*n))?;
            Some((grown, cost + LEAF_SPLIT_COST))
        }
        (Id::Node(il, ir), Event::Node(n, el, er)) if il.is_zero() => {
            let (er, cost) = grow(ir, er)?;
            Some((Event::Node(*n, Arc::clone(el), Arc::new(er)), cost + 1))
        }
        (Id::Node(il, ir), Event::Node(n, el, er)) if ir.is_zero() => {
            let (el, cost) = grow(il, el)?;
            Some((Event::Node(*n, Arc::new(el), Arc::clone(er)), cost + 1))
        }
        (Id::Node(il, ir), Event::Node(n, el, er)) => {
            let (grown_l, cost_l) = grow(il, el)?;
            let (grown_r, cost_r) = grow(ir, er)?;
            if cost_l < cost_r {
                Some((Event::Node(*n, Arc::new(grown_l), Arc::clone(er)), cost_l + 1))
            } else {
                Some((Event::Node(*n, Arc::clone(el), Arc::new(grown_r)), cost_r + 1))
            }
        }
        (Id::Zero | Id::One, Event::Node(..)) => None,
    }
}
