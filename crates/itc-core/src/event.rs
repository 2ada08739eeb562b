//! Event trees
//!
//! An [`Event`] is a compressed map from the identity space to event counts.
//! A leaf assigns one count to its whole subspace. A node carries a base
//! count shared by both halves plus per-half increments.
//!
//! In normal form the smallest increment below every node is zero and no
//! node has two equal leaf children, which makes the representation of a
//! given history unique. [`Event::join`] always returns normal form;
//! [`Event::node`] normalizes one level assuming normalized children.

use std::cmp;
use std::sync::Arc;

/// Causal history tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// Uniform count over the whole subspace
    Leaf(u64),
    /// Base count plus left and right increments
    Node(u64, Arc<Event>, Arc<Event>),
}

impl Event {
    /// Empty history
    pub fn zero() -> Self {
        Self::Leaf(0)
    }

    /// Build a node and hoist the children's common minimum into its base.
    ///
    /// `base` plus the children's counts must fit in a `u64`; see [`Event::lift`].
    pub fn node(base: u64, left: Event, right: Event) -> Self {
        match (&left, &right) {
            (Self::Leaf(a), Self::Leaf(b)) if a == b => Self::Leaf(base + a),
            _ => {
                let m = cmp::min(left.min(), right.min());
                Self::Node(base + m, Arc::new(left.sink(m)), Arc::new(right.sink(m)))
            }
        }
    }

    /// Count stored at the root
    pub fn value(&self) -> u64 {
        match self {
            Self::Leaf(n) | Self::Node(n, _, _) => *n,
        }
    }

    /// Smallest count anywhere in the tree
    pub fn min(&self) -> u64 {
        match self {
            Self::Leaf(n) => *n,
            Self::Node(n, l, r) => n + cmp::min(l.min(), r.min()),
        }
    }

    /// Largest count anywhere in the tree
    pub fn max(&self) -> u64 {
        match self {
            Self::Leaf(n) => *n,
            Self::Node(n, l, r) => n + cmp::max(l.max(), r.max()),
        }
    }

    /// Largest count, or `None` if it does not fit in a `u64`
    pub(crate) fn checked_max(&self) -> Option<u64> {
        match self {
            Self::Leaf(n) => Some(*n),
            Self::Node(n, l, r) => n.checked_add(cmp::max(l.checked_max()?, r.checked_max()?)),
        }
    }

    /// Raise every count by `m`.
    ///
    /// Counts are added unchecked. Decoders reject trees whose largest count
    /// overflows and [`Stamp::event`](crate::Stamp::event) refuses to inflate
    /// past `u64::MAX`, so trees built by this crate stay in range.
    pub fn lift(&self, m: u64) -> Self {
        debug_assert!(self.checked_max().and_then(|max| max.checked_add(m)).is_some());
        match self {
            Self::Leaf(n) => Self::Leaf(n + m),
            Self::Node(n, l, r) => Self::Node(n + m, Arc::clone(l), Arc::clone(r)),
        }
    }

    /// Lower every count by `m`, which must not exceed [`Event::min`]
    pub fn sink(&self, m: u64) -> Self {
        match self {
            Self::Leaf(n) => Self::Leaf(n - m),
            Self::Node(n, l, r) if *n >= m => Self::Node(n - m, Arc::clone(l), Arc::clone(r)),
            // Base smaller than `m` only happens on unnormalized trees; push
            // the remainder into both children.
            Self::Node(n, l, r) => {
                let rest = m - n;
                Self::Node(0, Arc::new(l.sink(rest)), Arc::new(r.sink(rest)))
            }
        }
    }

    /// Canonical form of this tree
    pub fn normalize(&self) -> Self {
        match self {
            Self::Leaf(_) => self.clone(),
            Self::Node(n, l, r) => Self::node(*n, l.normalize(), r.normalize()),
        }
    }

    /// Check whether this tree is already in canonical form
    pub fn is_normalized(&self) -> bool {
        match self {
            Self::Leaf(_) => true,
            Self::Node(_, l, r) => {
                let collapsible = matches!((&**l, &**r), (Self::Leaf(a), Self::Leaf(b)) if a == b);
                !collapsible
                    && cmp::min(l.min(), r.min()) == 0
                    && l.is_normalized()
                    && r.is_normalized()
            }
        }
    }

    /// Happened-before-or-equal: every count in `self` is at most the
    /// corresponding count in `other`
    pub fn leq(&self, other: &Event) -> bool {
        leq_lifted(self, 0, other, 0)
    }

    /// Least upper bound: pointwise maximum of the two histories
    pub fn join(&self, other: &Event) -> Event {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Self::Leaf(cmp::max(*a, *b)),
            (Self::Leaf(a), Self::Node(..)) => split_leaf(*a).join(other),
            (Self::Node(..), Self::Leaf(b)) => self.join(&split_leaf(*b)),
            (Self::Node(n1, _, _), Self::Node(n2, _, _)) if n1 > n2 => other.join(self),
            (Self::Node(n1, l1, r1), Self::Node(n2, l2, r2)) => {
                let d = n2 - n1;
                Self::node(*n1, l1.join(&l2.lift(d)), r1.join(&r2.lift(d)))
            }
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::zero()
    }
}

/// Degenerate node with the same history as `Leaf(n)`
pub(crate) fn split_leaf(n: u64) -> Event {
    Event::Node(n, Arc::new(Event::Leaf(0)), Arc::new(Event::Leaf(0)))
}

/// Compare `a + da` against `b + db` without materializing lifted trees
fn leq_lifted(a: &Event, da: u64, b: &Event, db: u64) -> bool {
    match (a, b) {
        (Event::Leaf(x), _) => x + da <= b.min() + db,
        (Event::Node(..), Event::Leaf(y)) => a.max() + da <= y + db,
        (Event::Node(n1, l1, r1), Event::Node(n2, l2, r2)) => {
            let base_a = n1 + da;
            let base_b = n2 + db;
            leq_lifted(l1, base_a, l2, base_b) && leq_lifted(r1, base_a, r2, base_b)
        }
    }
}
