//! Identity trees
//!
//! An [`Id`] records which slice of the identity space an actor owns. The
//! space is infinitely divisible: a leaf owns either nothing or everything
//! below it, and a node splits ownership between a left and a right half.
//!
//! Ids are immutable. [`Id::split`] hands out two disjoint shares and
//! [`Id::sum`] recombines disjoint shares. Subtrees are shared through
//! [`Arc`], so forking an identity never deep-copies it.

use std::sync::Arc;

use crate::errors::{ItcError, Result};

/// Ownership tree over the identity space
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    /// Owns nothing in this subspace
    Zero,
    /// Owns everything in this subspace
    One,
    /// Ownership split between the left and right halves
    Node(Arc<Id>, Arc<Id>),
}

impl Id {
    /// Build a leaf from its numeric ownership bit
    pub fn leaf(value: u64) -> Result<Self> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            _ => Err(ItcError::InvalidIdLeaf { value }),
        }
    }

    /// Build a node, collapsing `(0,0)` and `(1,1)` into a leaf
    pub fn node(left: Id, right: Id) -> Self {
        match (&left, &right) {
            (Self::Zero, Self::Zero) => Self::Zero,
            (Self::One, Self::One) => Self::One,
            _ => Self::Node(Arc::new(left), Arc::new(right)),
        }
    }

    /// True for the `0` leaf
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// True for the `1` leaf
    pub fn is_one(&self) -> bool {
        matches!(self, Self::One)
    }

    /// True if no position of the identity space is owned
    pub fn owns_nothing(&self) -> bool {
        match self {
            Self::Zero => true,
            Self::One => false,
            Self::Node(l, r) => l.owns_nothing() && r.owns_nothing(),
        }
    }

    /// True if every position of the identity space is owned
    pub fn owns_everything(&self) -> bool {
        match self {
            Self::Zero => false,
            Self::One => true,
            Self::Node(l, r) => l.owns_everything() && r.owns_everything(),
        }
    }

    /// Canonical form of this id
    pub fn normalize(&self) -> Self {
        match self {
            Self::Zero | Self::One => self.clone(),
            Self::Node(l, r) => Self::node(l.normalize(), r.normalize()),
        }
    }

    /// Check that no position is owned by both ids
    pub fn is_disjoint(&self, other: &Id) -> bool {
        match (self, other) {
            (Self::Zero, _) | (_, Self::Zero) => true,
            (Self::One, i) | (i, Self::One) => i.owns_nothing(),
            (Self::Node(l1, r1), Self::Node(l2, r2)) => l1.is_disjoint(l2) && r1.is_disjoint(r2),
        }
    }

    /// Check whether this id is already in canonical form
    pub fn is_normalized(&self) -> bool {
        match self {
            Self::Zero | Self::One => true,
            Self::Node(l, r) => {
                !matches!((&**l, &**r), (Self::Zero, Self::Zero) | (Self::One, Self::One))
                    && l.is_normalized()
                    && r.is_normalized()
            }
        }
    }

    /// Partition ownership into two disjoint shares whose sum is `self`.
    ///
    /// When both halves are owned, the left half is divided and the right
    /// half goes whole to the second share. Ids not in normal form are
    /// normalized first, so a subtree such as `(0,0)` counts as unowned.
    pub fn split(&self) -> (Id, Id) {
        if self.is_normalized() {
            split_normal(self)
        } else {
            split_normal(&self.normalize())
        }
    }

    /// Union of two disjoint ids.
    ///
    /// Fails with [`ItcError::Overlap`] if any position is owned by both.
    pub fn sum(&self, other: &Id) -> Result<Id> {
        sum_disjoint(self, other).ok_or_else(|| {
            tracing::debug!(left = %self, right = %other, "rejected sum of overlapping ids");
            ItcError::Overlap {
                left: self.to_string(),
                right: other.to_string(),
            }
        })
    }
}

fn split_normal(id: &Id) -> (Id, Id) {
    match id {
        Id::Zero => (Id::Zero, Id::Zero),
        Id::One => (
            Id::Node(Arc::new(Id::One), Arc::new(Id::Zero)),
            Id::Node(Arc::new(Id::Zero), Arc::new(Id::One)),
        ),
        Id::Node(l, r) if l.is_zero() => {
            let (r1, r2) = split_normal(r);
            (Id::node(Id::Zero, r1), Id::node(Id::Zero, r2))
        }
        Id::Node(l, r) if r.is_zero() => {
            let (l1, l2) = split_normal(l);
            (Id::node(l1, Id::Zero), Id::node(l2, Id::Zero))
        }
        Id::Node(l, r) => {
            let (l1, l2) = split_normal(l);
            (Id::node(l1, Id::Zero), Id::node(l2, (**r).clone()))
        }
    }
}

fn sum_disjoint(a: &Id, b: &Id) -> Option<Id> {
    match (a, b) {
        (Id::Zero, i) | (i, Id::Zero) => Some(i.normalize()),
        (Id::One, i) | (i, Id::One) => i.owns_nothing().then_some(Id::One),
        (Id::Node(l1, r1), Id::Node(l2, r2)) => {
            Some(Id::node(sum_disjoint(l1, l2)?, sum_disjoint(r1, r2)?))
        }
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::One
    }
}
